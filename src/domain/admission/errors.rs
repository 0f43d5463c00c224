//! Admission error taxonomy with HTTP status mapping.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that terminate a consult-request submission.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// Missing or malformed input. Never mutates state.
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The professional has switched off new requests and no valid
    /// emergency code was supplied.
    #[error("Professional is not accepting new requests")]
    Blocked,

    /// The pending cap is reached and no valid emergency code was supplied.
    #[error("Pending request capacity reached ({pending}/{cap})")]
    CapacityReached { pending: u32, cap: u32 },

    /// Datastore unavailable or a write failed. The submission fails closed
    /// and the caller may retry with backoff.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AdmissionError {
    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AdmissionError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the caller should retry the submission later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AdmissionError::Storage(_))
    }

    /// Maps the error to an HTTP status code.
    ///
    /// Capacity and blocked rejections share 429 so callers treat both as
    /// "professional unavailable, try later or use an emergency code".
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdmissionError::Validation { .. } => StatusCode::BAD_REQUEST,
            AdmissionError::Blocked | AdmissionError::CapacityReached { .. } => {
                StatusCode::TOO_MANY_REQUESTS
            }
            AdmissionError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<crate::domain::foundation::DomainError> for AdmissionError {
    fn from(err: crate::domain::foundation::DomainError) -> Self {
        AdmissionError::Storage(err.to_string())
    }
}

impl From<crate::domain::foundation::ValidationError> for AdmissionError {
    fn from(err: crate::domain::foundation::ValidationError) -> Self {
        AdmissionError::Validation {
            field: "input".to_string(),
            reason: err.to_string(),
        }
    }
}
