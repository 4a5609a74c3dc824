use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub credits: i64,
    pub max_resume: i64,
    pub resume_count: i64,
    pub pdfs_generated: i64,
    pub ai_calls_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentCustomResume {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub cloudinary_url: Option<String>,
    pub updated_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPdf {
    pub id: String,
    pub resume_name: String,
    pub cloudinary_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub generated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementCounts {
    #[serde(default)]
    pub headings: u32,
    #[serde(default)]
    pub educations: u32,
    #[serde(default)]
    pub experiences: u32,
    #[serde(default)]
    pub projects: u32,
    #[serde(default)]
    pub skills: u32,
    #[serde(default)]
    pub certifications: u32,
    #[serde(default)]
    pub awards: u32,
    #[serde(default)]
    pub volunteers: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardActivity {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub description: String,
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub resume_id: Option<String>,
    #[serde(default)]
    pub resume_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_resumes: Vec<RecentCustomResume>,
    pub recent_pdfs: Vec<RecentPdf>,
    pub element_counts: ElementCounts,
    pub recent_activity: Vec<DashboardActivity>,
}
