//! Admin console: paginated user list, platform stats and per-user actions.
//! Every mutation refetches the page currently on screen.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::api_client::ApiClient;
use crate::errors::{ClientError, FieldError};
use crate::models::admin::{
    AdminAck, AdminAiUsageResponse, AdminPdfStatsResponse, AdminStatsResponse,
    AdminUserDetailResponse, AdminUsersResponse, CreateAdminRequest, PlatformStats,
    UpdateCreditsRequest, UserWithAnalytics,
};
use crate::notice::Notice;
use crate::sections::{Dialog, Fetched, Generation, Ticket};
use crate::validation::{FieldChecks, Rule};

pub const PAGE_SIZE: u32 = 20;
pub const MAX_CREDITS: u32 = 100_000;
/// Rows per AI usage or PDF stats report.
pub const REPORT_LIMIT: u32 = 100;

#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn users(&self, skip: u32, limit: u32) -> Result<AdminUsersResponse, ClientError>;
    async fn stats(&self) -> Result<PlatformStats, ClientError>;
    async fn user_detail(&self, user_id: &str) -> Result<AdminUserDetailResponse, ClientError>;
    async fn update_credits(&self, user_id: &str, credits: u32) -> Result<AdminAck, ClientError>;
    async fn revoke(&self, user_id: &str) -> Result<AdminAck, ClientError>;
    async fn unrevoke(&self, user_id: &str) -> Result<AdminAck, ClientError>;
    async fn delete_user(&self, user_id: &str) -> Result<AdminAck, ClientError>;
    async fn create_admin(&self, email: &str) -> Result<AdminAck, ClientError>;
    async fn ai_usage(&self, skip: u32, limit: u32) -> Result<AdminAiUsageResponse, ClientError>;
    async fn pdf_stats(&self, skip: u32, limit: u32) -> Result<AdminPdfStatsResponse, ClientError>;
}

#[async_trait]
impl AdminApi for ApiClient {
    async fn users(&self, skip: u32, limit: u32) -> Result<AdminUsersResponse, ClientError> {
        self.get_with_query("/api/admin/users", &[("skip", skip), ("limit", limit)])
            .await
    }

    async fn stats(&self) -> Result<PlatformStats, ClientError> {
        let response: AdminStatsResponse = self.get("/api/admin/stats").await?;
        Ok(response.stats)
    }

    async fn user_detail(&self, user_id: &str) -> Result<AdminUserDetailResponse, ClientError> {
        self.get(&format!("/api/admin/user/{user_id}")).await
    }

    async fn update_credits(&self, user_id: &str, credits: u32) -> Result<AdminAck, ClientError> {
        self.put(
            &format!("/api/admin/users/{user_id}/credits"),
            &UpdateCreditsRequest { credits },
        )
        .await
    }

    async fn revoke(&self, user_id: &str) -> Result<AdminAck, ClientError> {
        self.post_empty(&format!("/api/admin/users/{user_id}/revoke"))
            .await
    }

    async fn unrevoke(&self, user_id: &str) -> Result<AdminAck, ClientError> {
        self.post_empty(&format!("/api/admin/users/{user_id}/unrevoke"))
            .await
    }

    async fn delete_user(&self, user_id: &str) -> Result<AdminAck, ClientError> {
        let body = self
            .delete_path(&format!("/api/admin/users/{user_id}"))
            .await?;
        Ok(serde_json::from_value(body).unwrap_or_else(|_| AdminAck {
            message: "User deleted successfully".to_string(),
        }))
    }

    async fn create_admin(&self, email: &str) -> Result<AdminAck, ClientError> {
        self.post("/api/admin/create-admin", &CreateAdminRequest { email })
            .await
    }

    async fn ai_usage(&self, skip: u32, limit: u32) -> Result<AdminAiUsageResponse, ClientError> {
        self.get_with_query("/api/admin/ai-usage", &[("skip", skip), ("limit", limit)])
            .await
    }

    async fn pdf_stats(&self, skip: u32, limit: u32) -> Result<AdminPdfStatsResponse, ClientError> {
        self.get_with_query("/api/admin/pdf-stats", &[("skip", skip), ("limit", limit)])
            .await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// State
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminState {
    pub users: Vec<UserWithAnalytics>,
    pub total: u64,
    /// Zero-based page index.
    pub page: u32,
    pub loading: bool,
    pub dialog: Dialog,
    pub field_error: Option<FieldError>,
    generation: Generation,
}

impl AdminState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_page(mut self, page: u32) -> (Self, Ticket) {
        let ticket = self.generation.issue();
        self.page = page;
        self.loading = true;
        (self, ticket)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.is_current(ticket)
    }

    /// Applies a page response unless a newer page request has been issued since.
    pub fn receive_page(mut self, ticket: Ticket, response: AdminUsersResponse) -> Self {
        if !self.generation.is_current(ticket) {
            debug!("Dropping stale admin page {:?}", ticket);
            return self;
        }
        self.users = response.users;
        self.total = response.total;
        self.loading = false;
        self
    }

    pub fn receive_failure(mut self, ticket: Ticket) -> Self {
        if self.generation.is_current(ticket) {
            self.loading = false;
        }
        self
    }

    pub fn page_count(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(PAGE_SIZE));
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    pub fn request_delete(mut self, user_id: impl Into<String>) -> Self {
        self.dialog = Dialog::ConfirmDelete { id: user_id.into() };
        self
    }

    pub fn close_dialog(mut self) -> Self {
        self.dialog = Dialog::Closed;
        self
    }

    pub fn pending_delete(&self) -> Option<&str> {
        match &self.dialog {
            Dialog::ConfirmDelete { id } => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct AdminOutcome {
    pub state: AdminState,
    pub notices: Vec<Notice>,
}

impl AdminOutcome {
    fn new(state: AdminState) -> Self {
        Self {
            state,
            notices: Vec::new(),
        }
    }

    fn with(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    pub fn has_error(&self) -> bool {
        self.notices.iter().any(Notice::is_error)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Console
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AdminConsole {
    api: Arc<dyn AdminApi>,
}

impl AdminConsole {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self { api }
    }

    /// Requests a page and applies it while holding the state. Views that
    /// allow paging on while a request is in flight use `begin_page`,
    /// [`Self::fetch_page`] and [`Self::apply_page`] instead.
    pub async fn load_page(&self, state: AdminState, page: u32) -> AdminOutcome {
        let (state, ticket) = state.begin_page(page);
        let fetched = self.fetch_page(ticket, page).await;
        Self::apply_page(state, fetched)
    }

    pub async fn fetch_page(&self, ticket: Ticket, page: u32) -> Fetched<AdminUsersResponse> {
        Fetched {
            ticket,
            result: self.api.users(page * PAGE_SIZE, PAGE_SIZE).await,
        }
    }

    pub fn apply_page(state: AdminState, fetched: Fetched<AdminUsersResponse>) -> AdminOutcome {
        let Fetched { ticket, result } = fetched;
        match result {
            Ok(response) => {
                debug!("Admin page returned {} of {} users", response.users.len(), response.total);
                AdminOutcome::new(state.receive_page(ticket, response))
            }
            Err(err) if !state.is_current(ticket) => {
                debug!("Ignoring failed stale admin page: {err}");
                AdminOutcome::new(state)
            }
            Err(err) => {
                warn!("Failed to load admin users: {err}");
                AdminOutcome::new(state.receive_failure(ticket)).with(err.admin_notice())
            }
        }
    }

    pub async fn stats(&self) -> Result<PlatformStats, ClientError> {
        self.api.stats().await
    }

    pub async fn ai_usage(&self) -> Result<AdminAiUsageResponse, ClientError> {
        let report = self.api.ai_usage(0, REPORT_LIMIT).await?;
        debug!(
            "AI usage: {} users, {} calls, {} tokens",
            report.usage.len(),
            report.total_calls,
            report.total_tokens
        );
        Ok(report)
    }

    pub async fn pdf_stats(&self) -> Result<AdminPdfStatsResponse, ClientError> {
        self.api.pdf_stats(0, REPORT_LIMIT).await
    }

    pub async fn user_detail(&self, user_id: &str) -> Result<AdminUserDetailResponse, ClientError> {
        self.api.user_detail(user_id).await
    }

    /// `raw` is the credits input as typed; it must be a whole number in `0..=100000`.
    pub async fn update_credits(&self, state: AdminState, user_id: &str, raw: &str) -> AdminOutcome {
        let credits = match parse_credits(raw) {
            Ok(credits) => credits,
            Err(err) => return Self::rejected_locally(state, err),
        };
        let result = self.api.update_credits(user_id, credits).await;
        self.finish(state, result).await
    }

    pub async fn revoke(&self, state: AdminState, user_id: &str) -> AdminOutcome {
        let result = self.api.revoke(user_id).await;
        self.finish(state, result).await
    }

    pub async fn unrevoke(&self, state: AdminState, user_id: &str) -> AdminOutcome {
        let result = self.api.unrevoke(user_id).await;
        self.finish(state, result).await
    }

    pub async fn promote(&self, state: AdminState, email: &str) -> AdminOutcome {
        let checked = FieldChecks::new()
            .field("email", "Email", Some(email), &[Rule::Required, Rule::Email])
            .finish();
        if let Err(err) = checked {
            return Self::rejected_locally(state, err);
        }
        let result = self.api.create_admin(email.trim()).await;
        self.finish(state, result).await
    }

    pub async fn confirm_delete(&self, state: AdminState) -> AdminOutcome {
        let Some(user_id) = state.pending_delete().map(str::to_string) else {
            return AdminOutcome::new(state).with(ClientError::ConfirmationRequired.notice());
        };
        let result = self.api.delete_user(&user_id).await;
        self.finish(state.close_dialog(), result).await
    }

    fn rejected_locally(mut state: AdminState, err: FieldError) -> AdminOutcome {
        let notice = Notice::error(err.message.clone());
        state.field_error = Some(err);
        AdminOutcome::new(state).with(notice)
    }

    async fn finish(&self, mut state: AdminState, result: Result<AdminAck, ClientError>) -> AdminOutcome {
        state.field_error = None;
        let notice = match result {
            Ok(ack) => {
                info!("Admin action: {}", ack.message);
                Notice::success(ack.message)
            }
            Err(err) => {
                warn!("Admin action failed: {err}");
                err.admin_notice()
            }
        };
        let page = state.page;
        let mut outcome = self.load_page(state, page).await;
        outcome.notices.insert(0, notice);
        outcome
    }
}

fn parse_credits(raw: &str) -> Result<u32, FieldError> {
    FieldChecks::new()
        .field(
            "credits",
            "Credits",
            Some(raw),
            &[
                Rule::Required,
                Rule::WholeNumber,
                Rule::Range {
                    min: 0.0,
                    max: f64::from(MAX_CREDITS),
                },
            ],
        )
        .finish()?;
    raw.trim()
        .parse()
        .map_err(|_| FieldError::new("credits", "Credits must be a whole number"))
}
