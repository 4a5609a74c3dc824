use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserAnalytics {
    #[serde(default)]
    pub ai_calls_count: u64,
    #[serde(default)]
    pub pdfs_generated_count: u64,
    #[serde(default)]
    pub pdfs_downloaded_count: u64,
    #[serde(default)]
    pub tokens_used: u64,
    #[serde(default)]
    pub last_ai_call_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub last_pdf_generated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWithAnalytics {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_revoked: bool,
    #[serde(default)]
    pub credits: i64,
    #[serde(default)]
    pub max_resume: i64,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub analytics: UserAnalytics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUsersResponse {
    pub users: Vec<UserWithAnalytics>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformStats {
    pub total_users: u64,
    pub total_ai_calls: u64,
    pub total_pdfs_generated: u64,
    pub total_pdfs_downloaded: u64,
    pub active_users_last_30_days: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminStatsResponse {
    pub stats: PlatformStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiUsageStats {
    pub user_id: String,
    pub user_email: String,
    pub total_calls: u64,
    pub total_tokens: u64,
    #[serde(default)]
    pub last_call_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfStats {
    pub user_id: String,
    pub user_email: String,
    pub pdfs_generated: u64,
    pub pdfs_downloaded: u64,
    #[serde(default)]
    pub last_generated_at: Option<NaiveDateTime>,
}

/// `GET /api/admin/ai-usage`: heaviest AI users first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminAiUsageResponse {
    pub usage: Vec<AiUsageStats>,
    pub total_calls: u64,
    pub total_tokens: u64,
}

/// `GET /api/admin/pdf-stats`: most PDFs generated first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminPdfStatsResponse {
    pub stats: Vec<PdfStats>,
    pub total_generated: u64,
    pub total_downloaded: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUserDetailResponse {
    pub user: UserWithAnalytics,
    pub ai_usage: Vec<AiUsageStats>,
    pub pdf_stats: PdfStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateAdminRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateCreditsRequest {
    pub credits: u32,
}

/// Acknowledgement returned by every admin mutation. Fields beyond
/// `message` vary per endpoint and are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminAck {
    pub message: String,
}
