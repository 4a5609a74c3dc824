use tracing::debug;

use crate::errors::{ClientError, FieldError};

/// Per-form submission status: `idle → submitting → idle | error`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Error(String),
}

/// Which dialog (if any) a section view has open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Dialog {
    #[default]
    Closed,
    /// `editing` is `None` when creating a new entry.
    Editor { editing: Option<String> },
    ConfirmDelete { id: String },
}

/// Request-generation number handed out when a list fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Issues tickets and recognises the newest one. Responses carrying an
/// older ticket are stale and must not overwrite newer data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation {
    latest: u64,
}

impl Generation {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

/// A response tagged with the ticket it was requested under, so it can be
/// applied after other requests have started.
#[derive(Debug)]
pub struct Fetched<T> {
    pub ticket: Ticket,
    pub result: Result<T, ClientError>,
}

/// Everything a section view renders. Actions consume the state and return
/// the next one; the list is only ever replaced wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionState<R> {
    pub items: Vec<R>,
    pub loading: bool,
    pub form: FormStatus,
    pub dialog: Dialog,
    pub field_error: Option<FieldError>,
    generation: Generation,
}

impl<R> Default for SectionState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            form: FormStatus::Idle,
            dialog: Dialog::Closed,
            field_error: None,
            generation: Generation::default(),
        }
    }
}

impl<R> SectionState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_refresh(mut self) -> (Self, Ticket) {
        let ticket = self.generation.issue();
        self.loading = true;
        (self, ticket)
    }

    /// Whether `ticket` belongs to the most recent refresh.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.is_current(ticket)
    }

    pub fn receive_list(mut self, ticket: Ticket, items: Vec<R>) -> Self {
        if !self.generation.is_current(ticket) {
            debug!("Dropping stale list response {:?}", ticket);
            return self;
        }
        self.items = items;
        self.loading = false;
        self
    }

    /// A failed fetch leaves the previous list in place.
    pub fn receive_list_failure(mut self, ticket: Ticket) -> Self {
        if self.generation.is_current(ticket) {
            self.loading = false;
        }
        self
    }

    pub fn open_create(mut self) -> Self {
        self.dialog = Dialog::Editor { editing: None };
        self.form = FormStatus::Idle;
        self.field_error = None;
        self
    }

    pub fn open_edit(mut self, id: impl Into<String>) -> Self {
        self.dialog = Dialog::Editor {
            editing: Some(id.into()),
        };
        self.form = FormStatus::Idle;
        self.field_error = None;
        self
    }

    pub fn request_delete(mut self, id: impl Into<String>) -> Self {
        self.dialog = Dialog::ConfirmDelete { id: id.into() };
        self.form = FormStatus::Idle;
        self
    }

    pub fn close_dialog(mut self) -> Self {
        self.dialog = Dialog::Closed;
        self.form = FormStatus::Idle;
        self.field_error = None;
        self
    }

    /// The id awaiting confirmation, if the confirm dialog is open.
    pub fn pending_delete(&self) -> Option<&str> {
        match &self.dialog {
            Dialog::ConfirmDelete { id } => Some(id),
            _ => None,
        }
    }

    pub fn submitting(mut self) -> Self {
        self.form = FormStatus::Submitting;
        self.field_error = None;
        self
    }

    pub fn submitted(self) -> Self {
        self.close_dialog()
    }

    pub fn failed(mut self, err: &ClientError) -> Self {
        self.form = FormStatus::Error(err.notice().message);
        self.field_error = match err {
            ClientError::Validation(field_error) => Some(field_error.clone()),
            _ => None,
        };
        self
    }

    pub fn is_submitting(&self) -> bool {
        self.form == FormStatus::Submitting
    }
}
