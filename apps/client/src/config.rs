use std::time::Duration;

use anyhow::{Context, Result};

/// Client configuration loaded from environment variables.
/// Fails at startup if the backend origin is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub http_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_secs = std::env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            api_base_url: require_env("API_BASE_URL")?
                .trim_end_matches('/')
                .to_string(),
            api_token: std::env::var("API_TOKEN").ok().filter(|t| !t.is_empty()),
            http_timeout: Duration::from_secs(timeout_secs),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Configuration pointing at an explicit origin, used by tests and embedders.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Config {
            api_base_url: base_url.trim_end_matches('/').to_string(),
            api_token: None,
            http_timeout: Duration::from_secs(30),
            rust_log: "info".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
