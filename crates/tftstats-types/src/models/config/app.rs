//! Application-level configuration.

use serde::{Deserialize, Serialize};

use super::sections::{CacheSettings, ClientSettings, TooltipSettings};
use crate::error::ConfigError;

/// Full application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Remote data source settings
    #[serde(default)]
    pub client: ClientSettings,
    /// Query cache staleness and retry settings
    #[serde(default)]
    pub cache: CacheSettings,
    /// Tooltip timing and placement settings
    #[serde(default)]
    pub tooltip: TooltipSettings,
}

impl AppConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values the runtime cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.client.base_url)
            .map_err(|e| ConfigError::invalid("client.base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "client.base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.client.timeout_ms == 0 {
            return Err(ConfigError::invalid("client.timeout_ms", "must be greater than zero"));
        }
        if self.cache.retry_base_delay_ms > self.cache.retry_max_delay_ms {
            return Err(ConfigError::invalid(
                "cache.retry_base_delay_ms",
                "must not exceed cache.retry_max_delay_ms",
            ));
        }
        if !self.tooltip.margin.is_finite() || self.tooltip.margin < 0.0 {
            return Err(ConfigError::invalid("tooltip.margin", "must be a non-negative number"));
        }
        Ok(())
    }
}
