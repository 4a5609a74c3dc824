use tracing::debug;

use crate::api_client::ApiClient;
use crate::errors::ClientError;
use crate::models::dashboard::DashboardResponse;

pub async fn fetch_dashboard(client: &ApiClient) -> Result<DashboardResponse, ClientError> {
    let dashboard: DashboardResponse = client.get("/api/dashboard/").await?;
    debug!(
        "Dashboard: {} credits, {} recent resumes, {} activity items",
        dashboard.stats.credits,
        dashboard.recent_resumes.len(),
        dashboard.recent_activity.len()
    );
    Ok(dashboard)
}

/// Remaining resume slots; never negative.
pub fn free_resume_slots(dashboard: &DashboardResponse) -> i64 {
    (dashboard.stats.max_resume - dashboard.stats.resume_count).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_and_free_slots() {
        let dashboard: DashboardResponse = serde_json::from_value(serde_json::json!({
            "stats": {
                "credits": 7,
                "max_resume": 3,
                "resume_count": 5,
                "pdfs_generated": 2,
                "ai_calls_count": 11
            },
            "recent_resumes": [],
            "recent_pdfs": [],
            "element_counts": { "educations": 2, "skills": 4 },
            "recent_activity": [{
                "type": "pdf_generated",
                "description": "Generated Backend CV",
                "timestamp": "2024-03-02T18:20:00"
            }]
        }))
        .unwrap();

        assert_eq!(dashboard.element_counts.skills, 4);
        assert_eq!(dashboard.element_counts.awards, 0);
        assert_eq!(dashboard.recent_activity[0].activity_type, "pdf_generated");
        assert_eq!(free_resume_slots(&dashboard), 0);
    }
}
