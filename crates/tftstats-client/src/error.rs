//! Error types for building the client.

use thiserror::Error;

/// Errors that can occur while constructing a [`crate::RemoteDataClient`].
///
/// Request failures are reported as [`tftstats_types::FetchError`] instead.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The configured base URL is not usable.
    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The underlying HTTP client could not be built.
    #[error("HTTP client builder failed: {0}")]
    Build(#[from] reqwest::Error),
}
