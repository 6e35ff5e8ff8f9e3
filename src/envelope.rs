//! Uniform response envelope.
//!
//! Every simulated endpoint answers with one of three JSON shapes:
//!
//! ```json
//! {"status": 200, "data": ...}
//! {"status": 422, "errors": {"nom": ["Le nom est requis"], "email": []}}
//! {"status": 404, "message": "Élevage non trouvé"}
//! ```
//!
//! The same type is used by the mock server to build responses and by the
//! client to decode them.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LineageError, Result};

/// Per-field validation messages. An empty list means the field is valid.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_UNAUTHORIZED: u16 = 401;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_UNPROCESSABLE: u16 = 422;
pub const STATUS_SERVER_ERROR: u16 = 500;

/// A response envelope.
///
/// Variant order matters for untagged deserialization: a body carrying
/// `data` is tried first, then `errors`, then `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    /// Successful payload.
    Data { status: u16, data: Value },
    /// Validation failure with per-field messages.
    Errors { status: u16, errors: FieldErrors },
    /// Plain message, used for both errors and payload-less successes.
    Message { status: u16, message: String },
}

impl Envelope {
    /// 200 with a serialized payload.
    pub fn success<T: Serialize + ?Sized>(data: &T) -> Result<Self> {
        Self::with_data(STATUS_OK, data)
    }

    /// 201 with a serialized payload.
    pub fn created<T: Serialize + ?Sized>(data: &T) -> Result<Self> {
        Self::with_data(STATUS_CREATED, data)
    }

    /// Arbitrary status with a serialized payload.
    pub fn with_data<T: Serialize + ?Sized>(status: u16, data: &T) -> Result<Self> {
        Ok(Envelope::Data {
            status,
            data: serde_json::to_value(data)?,
        })
    }

    pub fn message(status: u16, message: impl Into<String>) -> Self {
        Envelope::Message {
            status,
            message: message.into(),
        }
    }

    pub fn validation(errors: FieldErrors) -> Self {
        Envelope::Errors {
            status: STATUS_UNPROCESSABLE,
            errors,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::message(STATUS_UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::message(STATUS_NOT_FOUND, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::message(STATUS_SERVER_ERROR, message)
    }

    /// The status code carried by the envelope.
    pub fn status(&self) -> u16 {
        match self {
            Envelope::Data { status, .. }
            | Envelope::Errors { status, .. }
            | Envelope::Message { status, .. } => *status,
        }
    }

    /// True for 2xx envelopes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// The message, if this is a message envelope.
    pub fn message_text(&self) -> Option<&str> {
        match self {
            Envelope::Message { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Convert into an error for non-success envelopes.
    ///
    /// Returns `Ok(self)` unchanged when the status is 2xx.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }

        Err(match self {
            Envelope::Errors { errors, .. } => LineageError::Validation(errors),
            Envelope::Message {
                status: STATUS_UNAUTHORIZED,
                message,
            } => LineageError::Unauthorized(message),
            Envelope::Message { status, message } => LineageError::ApiError {
                message,
                status_code: Some(status),
            },
            Envelope::Data { status, data } => LineageError::ApiError {
                message: data.to_string(),
                status_code: Some(status),
            },
        })
    }

    /// Decode the payload of a successful data envelope.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        match self.error_for_status()? {
            Envelope::Data { data, .. } => Ok(serde_json::from_value(data)?),
            other => Err(LineageError::ApiError {
                message: format!("expected a data envelope, got status {}", other.status()),
                status_code: Some(other.status()),
            }),
        }
    }

    /// Decode a payload-less success and return its message.
    pub fn into_message(self) -> Result<String> {
        match self.error_for_status()? {
            Envelope::Message { message, .. } => Ok(message),
            Envelope::Data { data, .. } => Ok(data.to_string()),
            Envelope::Errors { status, .. } => Err(LineageError::ApiError {
                message: "unexpected validation envelope".to_string(),
                status_code: Some(status),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_envelope_shape() {
        let envelope = Envelope::success(&json!({"id": 1})).unwrap();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"status": 200, "data": {"id": 1}})
        );
    }

    #[test]
    fn test_validation_envelope_shape() {
        let mut errors = FieldErrors::new();
        errors.insert("nom".to_string(), vec!["Le nom est requis".to_string()]);
        errors.insert("email".to_string(), vec![]);

        let value = serde_json::to_value(Envelope::validation(errors)).unwrap();
        assert_eq!(
            value,
            json!({"status": 422, "errors": {"nom": ["Le nom est requis"], "email": []}})
        );
    }

    #[test]
    fn test_deserialize_picks_matching_variant() {
        let data: Envelope = serde_json::from_str(r#"{"status":200,"data":[1,2]}"#).unwrap();
        assert!(matches!(data, Envelope::Data { status: 200, .. }));

        let msg: Envelope =
            serde_json::from_str(r#"{"status":404,"message":"Élevage non trouvé"}"#).unwrap();
        assert_eq!(msg.message_text(), Some("Élevage non trouvé"));

        let errs: Envelope =
            serde_json::from_str(r#"{"status":422,"errors":{"nom":[]}}"#).unwrap();
        assert!(matches!(errs, Envelope::Errors { status: 422, .. }));
    }

    #[test]
    fn test_error_for_status_mapping() {
        let err = Envelope::unauthorized("Token d'authentification requis")
            .error_for_status()
            .unwrap_err();
        assert!(matches!(err, LineageError::Unauthorized(_)));

        let err = Envelope::server_error("Erreur interne du serveur")
            .error_for_status()
            .unwrap_err();
        assert!(matches!(
            err,
            LineageError::ApiError {
                status_code: Some(500),
                ..
            }
        ));

        let err = Envelope::validation(FieldErrors::new())
            .error_for_status()
            .unwrap_err();
        assert!(matches!(err, LineageError::Validation(_)));
    }

    #[test]
    fn test_into_data_decodes_payload() {
        let envelope = Envelope::created(&vec![1u64, 2, 3]).unwrap();
        let ids: Vec<u64> = envelope.into_data().unwrap();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_into_message_on_success() {
        let message = Envelope::message(200, "Déconnexion réussie")
            .into_message()
            .unwrap();
        assert_eq!(message, "Déconnexion réussie");
    }
}
