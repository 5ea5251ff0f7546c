//! Errors raised while loading, checking, or saving `tftstats.json`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why the settings file could not be used.
///
/// Environment overrides report through the same variants, with the
/// variable name in `field`.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// An explicitly requested file, or the home directory, is missing
    #[error("Settings file missing: {path}")]
    NotFound { path: String },

    #[error("Unreadable settings: {message}")]
    ParseError { message: String },

    /// A value was read but is unusable, e.g. a zero timeout
    #[error("Bad setting {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Could not save settings: {message}")]
    WriteError { message: String },
}

impl ConfigError {
    pub fn from_json_error(e: &serde_json::Error) -> Self {
        Self::ParseError { message: e.to_string() }
    }

    /// Saving is the only IO path that maps here; reads map their own errors.
    pub fn from_io_error(e: &std::io::Error) -> Self {
        Self::WriteError { message: e.to_string() }
    }

    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationError { field: field.to_string(), message: message.into() }
    }
}
