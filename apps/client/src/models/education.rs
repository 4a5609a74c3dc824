use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::format::Centi;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub id: String,
    pub user_id: String,
    pub institution: String,
    pub location: String,
    pub degree: String,
    #[serde(default)]
    pub gpa: Option<Centi>,
    #[serde(default)]
    pub max_gpa: Option<Centi>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub courses: Option<Vec<String>>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationPayload {
    pub institution: String,
    pub location: String,
    pub degree: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<Centi>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_gpa: Option<Centi>,
    pub start_date: String,
    pub end_date: String,
    pub courses: Vec<String>,
}
