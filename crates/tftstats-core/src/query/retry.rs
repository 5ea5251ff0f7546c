//! Retry loop with exponential backoff.

use std::time::Duration;
use tftstats_types::FetchError;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use super::key::QueryKey;
use super::options::QueryOptions;
use super::Fetcher;

/// Run `fetcher` until it succeeds, fails with a non-retryable error, or
/// the retry budget is spent.
///
/// `on_failure` receives the number of failed attempts so far.
pub(crate) async fn run_with_retry<T>(
    key: &QueryKey,
    fetcher: &Fetcher<T>,
    options: &QueryOptions,
    mut on_failure: impl FnMut(u32),
) -> Result<T, FetchError> {
    let mut attempt: u32 = 0;
    loop {
        let error = match attempt_once(fetcher, options.fetch_timeout).await {
            Ok(data) => return Ok(data),
            Err(e) => e,
        };
        on_failure(attempt + 1);

        if !options.retry.should_retry(&error, attempt) {
            if error.is_retryable() {
                warn!(key = %key, attempts = attempt + 1, "retries exhausted: {}", error);
            } else {
                warn!(key = %key, "non-retryable fetch error: {}", error);
            }
            return Err(error);
        }

        let delay = options.retry.delay_for(attempt);
        info!(
            key = %key,
            attempt = attempt + 1,
            max_retries = options.retry.max_retries,
            delay_ms = delay.as_millis() as u64,
            "retrying fetch after error: {}",
            error
        );
        sleep(delay).await;
        attempt += 1;
    }
}

async fn attempt_once<T>(fetcher: &Fetcher<T>, limit: Duration) -> Result<T, FetchError> {
    match timeout(limit, fetcher()).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout { timeout_ms: limit.as_millis() as u64 }),
    }
}
