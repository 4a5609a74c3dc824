use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerRecord {
    pub id: String,
    pub user_id: String,
    pub organization: String,
    pub location: String,
    /// Stored escaped.
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerPayload {
    pub organization: String,
    pub location: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
}
