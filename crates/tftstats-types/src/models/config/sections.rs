//! Configuration sections.

use serde::{Deserialize, Serialize};

/// Remote data source settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of the stats site
    pub base_url: String,
    /// Path of the bundled comps document, relative to `base_url`
    pub bundle_path: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "https://tftstats.gg".to_string(),
            bundle_path: "/_next/data/current/comps.json".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Query cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheSettings {
    /// Age after which cached data is revalidated on the next subscription
    pub stale_time_ms: u64,
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// First backoff delay
    pub retry_base_delay_ms: u64,
    /// Upper bound for any backoff delay
    pub retry_max_delay_ms: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            stale_time_ms: 5 * 60 * 1000,
            max_retries: 3,
            retry_base_delay_ms: 1000,
            retry_max_delay_ms: 30_000,
        }
    }
}

/// Tooltip settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TooltipSettings {
    /// Minimum distance kept from the trigger and the viewport edges
    pub margin: f64,
    /// Debounce before a hide takes effect
    pub hide_delay_ms: u64,
    /// Hover-intent delay for pointer input
    pub show_delay_ms: u64,
    /// Show delay for touch input
    pub touch_show_delay_ms: u64,
}

impl Default for TooltipSettings {
    fn default() -> Self {
        Self { margin: 10.0, hide_delay_ms: 100, show_delay_ms: 200, touch_show_delay_ms: 0 }
    }
}
