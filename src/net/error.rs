//! Failure taxonomy for backend requests.
//!
//! ERROR HANDLING
//! ==============
//! Every failed request maps onto exactly one `ApiError` variant, mirroring
//! the classification the transport layer applies before re-raising. The
//! backend's error envelope is `{message?, details?}`; when both are absent
//! the caller falls back to a generic notification.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

/// Error envelope returned by the backend on non-success statuses.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    /// Single human-readable message, when the backend provides one.
    pub message: Option<String>,
    /// Field-level validation messages accompanying a 422.
    pub details: Option<Vec<String>>,
}

/// A classified request failure.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was received (DNS, connect, timeout, broken transport).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The credential was rejected; the session has been torn down globally.
    #[error("session expired")]
    Unauthorized,
    /// 403 or 404; the request itself was refused.
    #[error("request rejected (HTTP {status})")]
    Rejected { status: u16, message: Option<String> },
    /// 422 with optional field-level detail messages.
    #[error("validation failed")]
    Validation {
        message: Option<String>,
        details: Vec<String>,
    },
    /// 429.
    #[error("rate limited")]
    RateLimited,
    /// Any 5xx.
    #[error("server error (HTTP {status})")]
    Server { status: u16 },
    /// Any other non-success status.
    #[error("unexpected response (HTTP {status})")]
    Unexpected { status: u16, message: Option<String> },
    /// A success status whose body did not match the expected schema.
    #[error("response decode failed: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// The backend-provided message embedded in this error, if any.
    ///
    /// Session operations wrap transport failures into message-only errors;
    /// this is where the server's wording is recovered before falling back
    /// to a per-operation default.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. }
            | Self::Validation { message, .. }
            | Self::Unexpected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
