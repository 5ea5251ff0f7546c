//! Subscriber handle.

use std::sync::Arc;
use tokio::sync::watch;

use super::cache::QueryCache;
use super::entry::QueryEntry;
use super::key::QueryKey;
use super::state::QueryResult;

/// A live interest in one query.
///
/// Dropping the handle unsubscribes. When the last subscriber of a key goes
/// away while a fetch is running, that fetch is cancelled and its result
/// is never applied.
pub struct QuerySubscription<T: Send + Sync + 'static> {
    cache: Arc<QueryCache<T>>,
    entry: Arc<QueryEntry<T>>,
    rx: watch::Receiver<QueryResult<T>>,
}

impl<T: Send + Sync + 'static> QuerySubscription<T> {
    pub(crate) fn new(
        cache: Arc<QueryCache<T>>,
        entry: Arc<QueryEntry<T>>,
        rx: watch::Receiver<QueryResult<T>>,
    ) -> Self {
        Self { cache, entry, rx }
    }

    pub fn key(&self) -> &QueryKey {
        &self.entry.key
    }

    /// Latest state of the query.
    pub fn current(&self) -> QueryResult<T> {
        self.rx.borrow().clone()
    }

    /// Wait for the next state change and return it.
    pub async fn changed(&mut self) -> QueryResult<T> {
        // The sender lives in the entry we hold, so this cannot fail.
        let _ = self.rx.changed().await;
        self.rx.borrow_and_update().clone()
    }

    /// Wait until no fetch is running and return that state.
    pub async fn settled(&mut self) -> QueryResult<T> {
        let settled = match self.rx.wait_for(|state| !state.is_fetching).await {
            Ok(state) => Some(state.clone()),
            Err(_) => None,
        };
        settled.unwrap_or_else(|| self.current())
    }

    /// Fetch again regardless of staleness. Existing data stays visible
    /// until the new result arrives.
    pub fn refetch(&self) {
        let mut state = self.entry.state.lock();
        if self.entry.start_fetch(&mut state, self.cache.options()) {
            self.entry.publish(&state);
        }
    }
}

impl<T: Send + Sync + 'static> Drop for QuerySubscription<T> {
    fn drop(&mut self) {
        self.entry.release();
    }
}
