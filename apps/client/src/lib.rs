pub mod admin;
pub mod ai;
pub mod api_client;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod extraction;
pub mod format;
pub mod models;
pub mod notice;
pub mod sections;
pub mod state;
pub mod validation;
