//! Remote fetch errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while fetching a remote resource.
///
/// Carries only owned strings and numbers so a single failure can be cloned
/// into every subscriber of a cache entry.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum FetchError {
    /// Connection failure, DNS failure, reset, etc.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Request did not complete within the fetch timeout
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Upstream answered with a non-2xx status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// The fetch itself broke (panicked, or could not form a request)
    #[error("Internal fetch failure: {message}")]
    Internal { message: String },
}

impl FetchError {
    /// Check whether the retry/backoff path should run for this error.
    ///
    /// Client errors (4xx) other than 429 fail fast, and a shape mismatch
    /// will not fix itself on retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Timeout { .. } => true,
            Self::Server { status, .. } => !is_permanent_client_error(*status),
            Self::MalformedResponse { .. } | Self::Internal { .. } => false,
        }
    }

    /// Check if this is a client error (4xx equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Server { status, .. } if (400..500).contains(status))
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn is_permanent_client_error(status: u16) -> bool {
    (400..500).contains(&status) && status != 429
}
