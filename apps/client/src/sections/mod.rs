//! Section editors, one per resume section. Each runs the same cycle:
//! validate, map to a payload, send, then refetch the list.

pub mod award;
pub mod certification;
pub mod custom_resume;
pub mod education;
pub mod experience;
pub mod heading;
pub mod project;
pub mod skill;
pub mod state;
pub mod volunteer;

use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::api_client::ResourceApi;
use crate::errors::{ClientError, FieldError};
use crate::models::Identified;
use crate::notice::Notice;

pub use award::Awards;
pub use certification::Certifications;
pub use custom_resume::CustomResumes;
pub use education::Educations;
pub use experience::Experiences;
pub use heading::Headings;
pub use project::Projects;
pub use skill::Skills;
pub use state::{Dialog, Fetched, FormStatus, Generation, SectionState, Ticket};
pub use volunteer::Volunteers;

/// The contract every resume section implements: which backend resource it
/// lives at, how its form is validated, and how form state maps to and
/// from the wire.
pub trait Section: Send + Sync + 'static {
    /// Path segment under `/api/`.
    const RESOURCE: &'static str;
    /// Human-readable name used in notices ("Education added successfully").
    const LABEL: &'static str;

    type Record: Identified + DeserializeOwned + Clone + Send;
    type Form: Clone + Default + Send + Sync;
    type Payload: Serialize;

    /// Per-field checks first, then cross-field rules in their fixed order.
    fn validate(form: &Self::Form) -> Result<(), FieldError>;

    /// Form state (camelCase, unescaped) → request body (snake_case, escaped).
    fn to_payload(form: &Self::Form) -> Self::Payload;

    /// Stored record → pre-populated edit form.
    fn to_form(record: &Self::Record) -> Self::Form;
}

/// Result of one user action: the next state plus any notices to show.
#[derive(Debug)]
pub struct Outcome<R> {
    pub state: SectionState<R>,
    pub notices: Vec<Notice>,
}

impl<R> Outcome<R> {
    fn new(state: SectionState<R>) -> Self {
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

pub struct SectionEditor<S: Section> {
    api: Arc<dyn ResourceApi>,
    _section: PhantomData<S>,
}

impl<S: Section> Clone for SectionEditor<S> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            _section: PhantomData,
        }
    }
}

impl<S: Section> SectionEditor<S> {
    pub fn new(api: Arc<dyn ResourceApi>) -> Self {
        Self {
            api,
            _section: PhantomData,
        }
    }

    /// GET the full list for this section.
    pub async fn fetch(&self) -> Result<Vec<S::Record>, ClientError> {
        let value = self.api.list(S::RESOURCE).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// GET one entry by id.
    pub async fn get(&self, id: &str) -> Result<S::Record, ClientError> {
        let value = self.api.get_one(S::RESOURCE, id).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Begins a refresh, fetches and applies the result in one step.
    ///
    /// The state is held for the whole request, so no newer refresh can
    /// start meanwhile. A view that keeps rendering (and may refresh again)
    /// while the request runs calls `begin_refresh`, [`Self::load`] and
    /// [`Self::apply`] itself; a late response is then dropped.
    pub async fn refresh(&self, state: SectionState<S::Record>) -> Outcome<S::Record> {
        let (state, ticket) = state.begin_refresh();
        let fetched = self.load(ticket).await;
        Self::apply(state, fetched)
    }

    /// Fetches the list for a ticket from [`SectionState::begin_refresh`].
    pub async fn load(&self, ticket: Ticket) -> Fetched<Vec<S::Record>> {
        Fetched {
            ticket,
            result: self.fetch().await,
        }
    }

    /// Applies a list response. One requested before the latest refresh is
    /// dropped, failures included.
    pub fn apply(
        state: SectionState<S::Record>,
        fetched: Fetched<Vec<S::Record>>,
    ) -> Outcome<S::Record> {
        let Fetched { ticket, result } = fetched;
        match result {
            Ok(items) => {
                debug!("Fetched {} {} entries", items.len(), S::RESOURCE);
                Outcome::new(state.receive_list(ticket, items))
            }
            Err(err) if !state.is_current(ticket) => {
                debug!("Ignoring failed stale {} fetch: {err}", S::RESOURCE);
                Outcome::new(state)
            }
            Err(err) => {
                warn!("Failed to fetch {}: {err}", S::RESOURCE);
                Outcome::new(state.receive_list_failure(ticket)).with(err.notice())
            }
        }
    }

    pub async fn create(
        &self,
        state: SectionState<S::Record>,
        form: &S::Form,
    ) -> Outcome<S::Record> {
        if let Err(err) = S::validate(form) {
            return Self::rejected_locally(state, err);
        }
        let state = state.submitting();
        let result = match Self::payload(form) {
            Ok(body) => self.api.create(S::RESOURCE, body).await.map(|_| ()),
            Err(err) => Err(err),
        };
        self.finish_mutation(state, result, "added").await
    }

    pub async fn update(
        &self,
        state: SectionState<S::Record>,
        id: &str,
        form: &S::Form,
    ) -> Outcome<S::Record> {
        if let Err(err) = S::validate(form) {
            return Self::rejected_locally(state, err);
        }
        let state = state.submitting();
        let result = match Self::payload(form) {
            Ok(body) => self.api.update(S::RESOURCE, id, body).await.map(|_| ()),
            Err(err) => Err(err),
        };
        self.finish_mutation(state, result, "updated").await
    }

    /// Opens the editor for an existing entry and returns its pre-populated form.
    pub fn open_edit(
        state: SectionState<S::Record>,
        id: &str,
    ) -> (SectionState<S::Record>, Option<S::Form>) {
        let form = state.items.iter().find(|r| r.id() == id).map(S::to_form);
        match form {
            Some(form) => (state.open_edit(id), Some(form)),
            None => (state, None),
        }
    }

    /// First step of a delete: only opens the confirmation dialog.
    pub fn request_delete(state: SectionState<S::Record>, id: &str) -> SectionState<S::Record> {
        state.request_delete(id)
    }

    pub fn cancel_delete(state: SectionState<S::Record>) -> SectionState<S::Record> {
        state.close_dialog()
    }

    /// Issues the DELETE for the entry held by the open confirmation dialog.
    /// Without a pending confirmation no request is made.
    pub async fn confirm_delete(&self, state: SectionState<S::Record>) -> Outcome<S::Record> {
        let Some(id) = state.pending_delete().map(str::to_string) else {
            return Outcome::new(state).with(ClientError::ConfirmationRequired.notice());
        };

        let state = state.submitting();
        match self.api.delete(S::RESOURCE, &id).await {
            Ok(()) => {
                info!("Deleted {} {}", S::RESOURCE, id);
                let notice = Notice::success(format!("{} deleted successfully", S::LABEL));
                self.refresh(state.submitted()).await.with(notice)
            }
            Err(ClientError::NotFound(detail)) => {
                warn!("{} {} was already gone", S::RESOURCE, id);
                let notice = Notice::error(not_found_message(S::LABEL, &detail));
                self.refresh(state.submitted()).await.with(notice)
            }
            Err(err) => {
                warn!("Failed to delete {} {}: {err}", S::RESOURCE, id);
                Outcome::new(state.close_dialog().failed(&err)).with(err.notice())
            }
        }
    }

    fn payload(form: &S::Form) -> Result<serde_json::Value, ClientError> {
        Ok(serde_json::to_value(S::to_payload(form))?)
    }

    fn rejected_locally(state: SectionState<S::Record>, err: FieldError) -> Outcome<S::Record> {
        debug!("{} form rejected on {}: {}", S::RESOURCE, err.field, err.message);
        let err = ClientError::Validation(err);
        let notice = err.notice();
        Outcome::new(state.failed(&err)).with(notice)
    }

    async fn finish_mutation(
        &self,
        state: SectionState<S::Record>,
        result: Result<(), ClientError>,
        verb: &str,
    ) -> Outcome<S::Record> {
        match result {
            Ok(()) => {
                info!("{} {}", S::RESOURCE, verb);
                let notice = Notice::success(format!("{} {verb} successfully", S::LABEL));
                self.refresh(state.submitted()).await.with(notice)
            }
            Err(err) => {
                warn!("{} submission failed: {err}", S::RESOURCE);
                let err = match err {
                    ClientError::NotFound(detail) => {
                        ClientError::NotFound(not_found_message(S::LABEL, &detail))
                    }
                    other => other,
                };
                let notice = err.notice();
                Outcome::new(state.failed(&err)).with(notice)
            }
        }
    }
}

/// The backend's own detail when it has one, otherwise "`<Label>` not found".
fn not_found_message(label: &str, detail: &str) -> String {
    let detail = detail.trim();
    if detail.is_empty() || detail.eq_ignore_ascii_case("not found") {
        format!("{label} not found")
    } else {
        detail.to_string()
    }
}

/// Trims a required text input.
pub(crate) fn text(value: &str) -> String {
    value.trim().to_string()
}

/// Normalises an optional input: blank means "not provided".
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

pub(crate) fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory stand-in for the backend, shared by the section tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::api_client::ResourceApi;
    use crate::errors::ClientError;

    #[derive(Default)]
    pub struct FakeBackend {
        pub rows: Mutex<HashMap<String, Vec<Value>>>,
        pub calls: Mutex<Vec<String>>,
        next_id: Mutex<u32>,
        pub reject_with: Mutex<Option<(u16, String)>>,
    }

    impl FakeBackend {
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub fn stored(&self, resource: &str) -> Vec<Value> {
            self.rows
                .lock()
                .unwrap()
                .get(resource)
                .cloned()
                .unwrap_or_default()
        }

        pub fn reject_next(&self, status: u16, message: &str) {
            *self.reject_with.lock().unwrap() = Some((status, message.to_string()));
        }

        fn record(&self, call: String) -> Result<(), ClientError> {
            self.calls.lock().unwrap().push(call);
            match self.reject_with.lock().unwrap().take() {
                Some((status, message)) => Err(ClientError::Rejected { status, message }),
                None => Ok(()),
            }
        }
    }

    fn label(resource: &str) -> String {
        let mut chars = resource.chars();
        match chars.next() {
            Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }

    #[async_trait]
    impl ResourceApi for FakeBackend {
        async fn list(&self, resource: &str) -> Result<Value, ClientError> {
            self.record(format!("GET {resource}"))?;
            Ok(Value::Array(self.stored(resource)))
        }

        async fn get_one(&self, resource: &str, id: &str) -> Result<Value, ClientError> {
            self.record(format!("GET {resource} {id}"))?;
            if resource == "custom-resume" && id == "user-elements" {
                return Ok(json!({
                    "headings": self.stored("heading"),
                    "educations": self.stored("education"),
                    "experiences": self.stored("experience"),
                    "projects": self.stored("project"),
                    "skills": self.stored("skill"),
                    "volunteers": self.stored("volunteer"),
                    "certifications": self.stored("certification"),
                    "awards": self.stored("award"),
                }));
            }
            self.stored(resource)
                .into_iter()
                .find(|r| r["id"] == json!(id))
                .ok_or_else(|| ClientError::NotFound(format!("{} not found", label(resource))))
        }

        async fn create(&self, resource: &str, mut body: Value) -> Result<Value, ClientError> {
            self.record(format!("POST {resource}"))?;
            let id = {
                let mut next = self.next_id.lock().unwrap();
                *next += 1;
                format!("id{next}")
            };
            if let Value::Object(map) = &mut body {
                map.insert("id".into(), json!(id));
                map.insert("user_id".into(), json!("user1"));
                map.insert("created_at".into(), json!("2024-05-01T10:00:00"));
                map.insert("updated_at".into(), json!("2024-05-01T10:00:00"));
            }
            self.rows
                .lock()
                .unwrap()
                .entry(resource.to_string())
                .or_default()
                .push(body.clone());
            Ok(body)
        }

        async fn update(&self, resource: &str, id: &str, body: Value) -> Result<Value, ClientError> {
            self.record(format!("PUT {resource} {id}"))?;
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .get_mut(resource)
                .and_then(|rows| rows.iter_mut().find(|r| r["id"] == json!(id)))
                .ok_or_else(|| ClientError::NotFound(format!("{} not found", label(resource))))?;
            if let (Value::Object(target), Value::Object(source)) = (row, body) {
                for (k, v) in source {
                    target.insert(k, v);
                }
            }
            Ok(Value::Null)
        }

        async fn delete(&self, resource: &str, id: &str) -> Result<(), ClientError> {
            self.record(format!("DELETE {resource} {id}"))?;
            let mut rows = self.rows.lock().unwrap();
            let rows = rows.entry(resource.to_string()).or_default();
            let before = rows.len();
            rows.retain(|r| r["id"] != json!(id));
            if rows.len() == before {
                return Err(ClientError::NotFound(format!("{} not found", label(resource))));
            }
            Ok(())
        }
    }
}
