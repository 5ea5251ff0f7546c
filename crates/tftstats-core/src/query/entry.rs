//! Per-key cache entry.

use chrono::{DateTime, Utc};
use futures::FutureExt;
use parking_lot::Mutex;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tftstats_types::FetchError;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio::time::Instant;

use super::key::QueryKey;
use super::options::QueryOptions;
use super::retry::run_with_retry;
use super::state::{QueryResult, QueryStatus};
use super::Fetcher;

/// Mutable state of one entry. Only touched under `QueryEntry::state`.
pub(crate) struct EntryState<T> {
    pub(crate) status: QueryStatus,
    pub(crate) data: Option<Arc<T>>,
    pub(crate) error: Option<FetchError>,
    pub(crate) fetched_at: Option<Instant>,
    pub(crate) data_updated_at: Option<DateTime<Utc>>,
    pub(crate) is_fetching: bool,
    pub(crate) failure_count: u32,
    pub(crate) subscribers: usize,
    pub(crate) invalidated: bool,
    /// Sequence number of the most recently issued fetch
    pub(crate) seq: u64,
    pub(crate) task: Option<AbortHandle>,
    pub(crate) fetcher: Option<Fetcher<T>>,
    /// Per-key override of the cache-wide options
    pub(crate) options: Option<QueryOptions>,
}

impl<T> EntryState<T> {
    fn new() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            fetched_at: None,
            data_updated_at: None,
            is_fetching: false,
            failure_count: 0,
            subscribers: 0,
            invalidated: false,
            seq: 0,
            task: None,
            fetcher: None,
            options: None,
        }
    }

    pub(crate) fn snapshot(&self) -> QueryResult<T> {
        QueryResult {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
            is_fetching: self.is_fetching,
            failure_count: self.failure_count,
            data_updated_at: self.data_updated_at,
        }
    }

    /// Options in force for this entry: its override, else the cache's.
    pub(crate) fn effective_options<'a>(&'a self, defaults: &'a QueryOptions) -> &'a QueryOptions {
        self.options.as_ref().unwrap_or(defaults)
    }

    /// Whether a new subscriber should trigger a fetch.
    pub(crate) fn needs_fetch(&self, defaults: &QueryOptions) -> bool {
        let stale_time = self.effective_options(defaults).stale_time;
        if self.is_fetching {
            return false;
        }
        match self.status {
            QueryStatus::Idle | QueryStatus::Error => true,
            QueryStatus::Loading => false,
            QueryStatus::Success => {
                self.invalidated
                    || self.fetched_at.map_or(true, |at| at.elapsed() >= stale_time)
            },
        }
    }
}

pub(crate) struct QueryEntry<T> {
    pub(crate) key: QueryKey,
    pub(crate) state: Mutex<EntryState<T>>,
    tx: watch::Sender<QueryResult<T>>,
}

impl<T: Send + Sync + 'static> QueryEntry<T> {
    pub(crate) fn new(key: QueryKey) -> Self {
        let (tx, _) = watch::channel(QueryResult::idle());
        Self { key, state: Mutex::new(EntryState::new()), tx }
    }

    pub(crate) fn receiver(&self) -> watch::Receiver<QueryResult<T>> {
        self.tx.subscribe()
    }

    pub(crate) fn publish(&self, state: &EntryState<T>) {
        self.tx.send_replace(state.snapshot());
    }

    /// Start a fetch with the stored fetcher, superseding any running one.
    ///
    /// Returns false when no fetcher has been registered for this key.
    pub(crate) fn start_fetch(
        self: &Arc<Self>,
        state: &mut EntryState<T>,
        defaults: &QueryOptions,
    ) -> bool {
        let Some(fetcher) = state.fetcher.clone() else {
            return false;
        };

        if let Some(task) = state.task.take() {
            task.abort();
            tracing::debug!(key = %self.key, seq = state.seq, "superseding in-flight fetch");
        }

        state.seq += 1;
        let seq = state.seq;
        state.is_fetching = true;
        state.failure_count = 0;
        if state.data.is_none() {
            state.status = QueryStatus::Loading;
            state.error = None;
        }

        tracing::debug!(key = %self.key, seq, background = state.data.is_some(), "starting fetch");

        let entry = Arc::clone(self);
        let options = state.effective_options(defaults).clone();
        let handle = tokio::spawn(async move {
            let attempts = run_with_retry(&entry.key, &fetcher, &options, |failures| {
                entry.record_failure(seq, failures);
            });
            // A panicking fetcher must still settle the entry.
            let outcome = AssertUnwindSafe(attempts).catch_unwind().await.unwrap_or_else(|panic| {
                let message = panic_message(panic.as_ref());
                tracing::error!(key = %entry.key, seq, "fetcher panicked: {}", message);
                Err(FetchError::Internal { message: format!("fetcher panicked: {}", message) })
            });
            entry.resolve(seq, outcome);
        });
        state.task = Some(handle.abort_handle());
        true
    }

    fn record_failure(&self, seq: u64, failures: u32) {
        let mut state = self.state.lock();
        if state.seq != seq {
            return;
        }
        state.failure_count = failures;
        self.publish(&state);
    }

    /// Apply a finished fetch, unless a newer one was issued since.
    fn resolve(&self, seq: u64, outcome: Result<T, FetchError>) {
        let mut state = self.state.lock();
        if state.seq != seq {
            tracing::debug!(key = %self.key, seq, latest = state.seq, "discarding superseded result");
            return;
        }

        state.task = None;
        state.is_fetching = false;
        match outcome {
            Ok(data) => {
                state.status = QueryStatus::Success;
                state.data = Some(Arc::new(data));
                state.error = None;
                state.failure_count = 0;
                state.fetched_at = Some(Instant::now());
                state.data_updated_at = Some(Utc::now());
                state.invalidated = false;
                tracing::debug!(key = %self.key, seq, "fetch succeeded");
            },
            Err(error) => {
                state.status = QueryStatus::Error;
                state.error = Some(error);
            },
        }
        self.publish(&state);
    }

    /// Drop one subscriber; the last one out cancels a running fetch.
    pub(crate) fn release(&self) {
        let mut state = self.state.lock();
        state.subscribers = state.subscribers.saturating_sub(1);
        if state.subscribers > 0 || !state.is_fetching {
            return;
        }

        if let Some(task) = state.task.take() {
            task.abort();
        }
        // Invalidate any resolution already past the abort point.
        state.seq += 1;
        state.is_fetching = false;
        if state.status == QueryStatus::Loading {
            state.status = QueryStatus::Idle;
        }
        tracing::debug!(key = %self.key, "last subscriber left, fetch cancelled");
        self.publish(&state);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
