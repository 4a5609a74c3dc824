use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One project bullet under an experience entry. `description` is stored escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectItem {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRecord {
    pub id: String,
    pub user_id: String,
    pub company: String,
    pub location: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub projects: Vec<ProjectItem>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperiencePayload {
    pub company: String,
    pub location: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub projects: Vec<ProjectItem>,
}
