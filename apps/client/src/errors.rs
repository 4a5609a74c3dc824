use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notice::Notice;

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";
pub const ADMIN_ACCESS_REQUIRED: &str = "Admin access required";

/// A validation failure attached to one form input.
/// `field` is the camelCase form key, with dotted indices for nested items
/// (`projects.0.description`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Client-level error type.
/// Every variant maps to exactly one user-visible notice via [`ClientError::notice`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(#[from] FieldError),

    #[error("Rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response (status {status}): {message}")]
    Unexpected { status: u16, message: String },

    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Deletion was not confirmed")]
    ConfirmationRequired,
}

impl ClientError {
    /// The field a validation failure belongs to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            ClientError::Validation(e) => Some(&e.field),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }

    /// Converts the error into the notice a section view shows.
    pub fn notice(&self) -> Notice {
        let message = match self {
            ClientError::Validation(e) => e.message.clone(),
            ClientError::Rejected { message, .. } => message.clone(),
            ClientError::NotFound(message) => message.clone(),
            ClientError::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            ClientError::Forbidden => {
                "You do not have permission to perform this action.".to_string()
            }
            ClientError::InvalidUpload(message) => message.clone(),
            ClientError::ConfirmationRequired => "Please confirm the deletion first.".to_string(),
            ClientError::Network(e) => {
                tracing::error!("Network error: {e}");
                GENERIC_FAILURE.to_string()
            }
            ClientError::Unexpected { status, message } => {
                tracing::error!("Unexpected response {status}: {message}");
                GENERIC_FAILURE.to_string()
            }
            ClientError::Decode(e) => {
                tracing::error!("Decode error: {e}");
                GENERIC_FAILURE.to_string()
            }
        };
        Notice::error(message)
    }

    /// Admin views report authorization failures with their own message.
    pub fn admin_notice(&self) -> Notice {
        match self {
            ClientError::Unauthorized | ClientError::Forbidden => {
                Notice::error(ADMIN_ACCESS_REQUIRED)
            }
            other => other.notice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_surfaces_verbatim() {
        let err = ClientError::Rejected {
            status: 400,
            message: "Insufficient credits".to_string(),
        };
        assert_eq!(err.notice().message, "Insufficient credits");
        assert!(err.notice().is_error());
    }

    #[test]
    fn test_unexpected_uses_generic_message() {
        let err = ClientError::Unexpected {
            status: 502,
            message: "<html>bad gateway</html>".to_string(),
        };
        assert_eq!(err.notice().message, GENERIC_FAILURE);
    }

    #[test]
    fn test_admin_notice_for_forbidden() {
        assert_eq!(
            ClientError::Forbidden.admin_notice().message,
            ADMIN_ACCESS_REQUIRED
        );
        assert_ne!(ClientError::Forbidden.notice().message, ADMIN_ACCESS_REQUIRED);
    }

    #[test]
    fn test_validation_exposes_field() {
        let err = ClientError::from(FieldError::new("maxGpa", "Maximum GPA is required"));
        assert_eq!(err.field(), Some("maxGpa"));
        assert_eq!(err.notice().message, "Maximum GPA is required");
    }
}
