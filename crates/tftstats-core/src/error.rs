//! Unified error types for TFT Stats Core.

use serde::Serialize;
use tftstats_client::ClientError;
use tftstats_types::{ConfigError, FetchError};
use thiserror::Error;

/// Main error type for operations outside the query cache.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    /// Remote fetch failed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// HTTP client could not be constructed.
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Configuration loading or validation failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// File system I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Logging could not be initialised.
    #[error("Logging error: {0}")]
    Logging(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

/// Result type alias for TFT Stats operations.
pub type AppResult<T> = Result<T, AppError>;
