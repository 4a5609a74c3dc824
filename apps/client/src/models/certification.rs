use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub date_range: String,
    #[serde(default)]
    pub instructor: Option<String>,
    pub platform: String,
    #[serde(default)]
    pub certification_link: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationPayload {
    pub title: String,
    pub date_range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification_link: Option<String>,
}
