//! Typed error definitions for TFT Stats.
//!
//! This module provides a structured error hierarchy with specific error types
//! for different domains. All errors are designed to be:
//!
//! - **Serializable** for CLI JSON output via serde
//! - **Displayable** for logging via Display trait
//! - **Matchable** for retry decisions via enum variants
//! - **Cloneable** so one failure can be handed to every cache subscriber

mod config;
mod fetch;

pub use config::ConfigError;
pub use fetch::FetchError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type that wraps all domain-specific errors.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "domain", content = "error")]
pub enum TypedError {
    /// Wraps a remote fetch error
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Wraps a configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Standard Result type using TypedError.
pub type Result<T> = std::result::Result<T, TypedError>;
