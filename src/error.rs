//! Error types for AnimaLineage API operations.

use thiserror::Error;

use crate::envelope::FieldErrors;

/// Errors that can occur when talking to (or simulating) the AnimaLineage API.
#[derive(Debug, Error)]
pub enum LineageError {
    /// Configuration is missing or incomplete.
    #[error("AnimaLineage configuration required: {0}")]
    ConfigMissing(String),

    /// The operation is not available for this entity.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// A request body had an unexpected shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Missing or rejected credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Per-field validation failure (HTTP 422).
    #[error("Validation failed: {}", summarize(.0))]
    Validation(FieldErrors),

    /// API request failed.
    #[error("AnimaLineage API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// The backend never answered the readiness probe.
    #[error("Backend not ready after {attempts} attempts")]
    NotReady { attempts: u32 },
}

impl LineageError {
    /// Returns true when the failure is on the backend side (5xx or transport),
    /// as opposed to a problem with the request itself.
    pub fn is_server_failure(&self) -> bool {
        match self {
            LineageError::ApiError {
                status_code: Some(code),
                ..
            } => *code >= 500,
            LineageError::ApiError {
                status_code: None, ..
            } => true,
            LineageError::HttpError(e) => !e.is_decode() && !e.is_builder(),
            LineageError::NotReady { .. } => true,
            _ => false,
        }
    }
}

fn summarize(errors: &FieldErrors) -> String {
    errors
        .iter()
        .filter(|(_, messages)| !messages.is_empty())
        .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for AnimaLineage operations.
pub type Result<T> = core::result::Result<T, LineageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_lists_only_failing_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("nom".to_string(), vec!["Le nom est requis".to_string()]);
        errors.insert("email".to_string(), vec![]);

        let err = LineageError::Validation(errors);
        assert_eq!(err.to_string(), "Validation failed: nom: Le nom est requis");
    }

    #[test]
    fn test_server_failure_classification() {
        let server = LineageError::ApiError {
            message: "boom".to_string(),
            status_code: Some(503),
        };
        assert!(server.is_server_failure());

        let client = LineageError::ApiError {
            message: "bad".to_string(),
            status_code: Some(400),
        };
        assert!(!client.is_server_failure());

        assert!(!LineageError::Unauthorized("nope".to_string()).is_server_failure());
        assert!(LineageError::NotReady { attempts: 3 }.is_server_failure());
    }

    #[test]
    fn test_unsupported_is_a_client_error() {
        let err = LineageError::Unsupported("animals cannot be deleted".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported operation: animals cannot be deleted"
        );
        assert!(!err.is_server_failure());
    }
}
