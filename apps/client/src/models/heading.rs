use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingRecord {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub custom_links: Vec<CustomLink>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    pub custom_links: Vec<CustomLink>,
}
