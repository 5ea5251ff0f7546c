//! Observable query state.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tftstats_types::FetchError;

/// Lifecycle status of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    /// Never fetched, or the first fetch was abandoned
    Idle,
    /// First fetch running, no data yet
    Loading,
    /// Last completed fetch succeeded
    Success,
    /// Last completed fetch failed after exhausting retries
    Error,
}

impl std::fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryStatus::Idle => write!(f, "idle"),
            QueryStatus::Loading => write!(f, "loading"),
            QueryStatus::Success => write!(f, "success"),
            QueryStatus::Error => write!(f, "error"),
        }
    }
}

/// Snapshot of one cache entry as handed to consumers.
///
/// `data` is shared: every subscriber of a key sees the same allocation.
#[derive(Debug)]
pub struct QueryResult<T> {
    pub status: QueryStatus,
    pub data: Option<Arc<T>>,
    pub error: Option<FetchError>,
    /// A fetch (first load, background revalidation, or refetch) is running
    pub is_fetching: bool,
    /// Failed attempts of the running or last fetch
    pub failure_count: u32,
    pub data_updated_at: Option<DateTime<Utc>>,
}

impl<T> QueryResult<T> {
    pub(crate) fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            is_fetching: false,
            failure_count: 0,
            data_updated_at: None,
        }
    }

    /// No data yet and a first fetch is running.
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }
}

// Manual impl: `T` itself does not need to be Clone behind the Arc.
impl<T> Clone for QueryResult<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
            is_fetching: self.is_fetching,
            failure_count: self.failure_count,
            data_updated_at: self.data_updated_at,
        }
    }
}
