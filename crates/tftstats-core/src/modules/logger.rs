//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. Fails instead of
/// panicking when a global subscriber is already set.
pub fn init_tracing(default_level: &str) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| AppError::Logging(format!("invalid log filter '{}': {}", default_level, e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
