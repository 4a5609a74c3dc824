use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub date_range: String,
    pub tech_stack: String,
    #[serde(default)]
    pub github_link: Option<String>,
    /// Stored escaped.
    #[serde(default)]
    pub subpoints: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPayload {
    pub name: String,
    pub date_range: String,
    pub tech_stack: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    pub subpoints: Vec<String>,
}
