//! Backend-related errors.

use thiserror::Error;

/// Errors that can occur when talking to the shop backend.
///
/// Every variant is a network failure from the caller's point of view: the
/// request either never completed or the backend refused it. Container shape
/// mismatches are not errors; list decoding normalizes them to empty lists.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("Backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status.
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("Backend response error: {0}")]
    Decode(String),

    /// Endpoint path could not be joined onto the configured origin.
    #[error("Invalid backend URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP status reported by the backend, if it answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
