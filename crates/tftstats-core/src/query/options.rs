//! Staleness, timeout, and retry settings for the query cache.

use std::time::Duration;
use tftstats_types::{AppConfig, FetchError};

/// Exponential backoff policy applied to failed fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first failed attempt
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(30_000),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based): `min(base * 2^attempt, max)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2_u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Whether a failure after `retries_done` retries should be retried.
    pub fn should_retry(&self, error: &FetchError, retries_done: u32) -> bool {
        retries_done < self.max_retries && error.is_retryable()
    }
}

/// Options shared by every entry of a [`super::QueryCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Age after which cached data is revalidated on the next subscription
    pub stale_time: Duration,
    /// Upper bound for a single fetch attempt
    pub fetch_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(5 * 60),
            fetch_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

impl From<&AppConfig> for QueryOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            stale_time: Duration::from_millis(config.cache.stale_time_ms),
            fetch_timeout: Duration::from_millis(config.client.timeout_ms),
            retry: RetryPolicy {
                max_retries: config.cache.max_retries,
                base_delay: Duration::from_millis(config.cache.retry_base_delay_ms),
                max_delay: Duration::from_millis(config.cache.retry_max_delay_ms),
            },
        }
    }
}
