//! Query cache service.

use dashmap::DashMap;
use std::sync::Arc;

use super::entry::QueryEntry;
use super::key::QueryKey;
use super::options::QueryOptions;
use super::state::QueryResult;
use super::subscription::QuerySubscription;
use super::Fetcher;

/// Process-wide cache of remote queries producing `T`.
///
/// Entries are created on first subscription and live as long as the cache.
/// Subscribing spawns fetch tasks, so it must happen inside a tokio runtime.
pub struct QueryCache<T> {
    entries: DashMap<QueryKey, Arc<QueryEntry<T>>>,
    options: QueryOptions,
}

impl<T: Send + Sync + 'static> QueryCache<T> {
    /// Create an empty cache.
    pub fn new(options: QueryOptions) -> Arc<Self> {
        Arc::new(Self { entries: DashMap::new(), options })
    }

    /// Cache-wide defaults.
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Attach to `key`, fetching when the entry is empty, failed, or stale.
    ///
    /// A subscriber arriving while a fetch is running joins it instead of
    /// issuing another request.
    pub fn subscribe(self: &Arc<Self>, key: QueryKey, fetcher: Fetcher<T>) -> QuerySubscription<T> {
        self.attach(key, fetcher, None)
    }

    /// Like [`subscribe`](Self::subscribe), but `options` replace the
    /// cache-wide ones for this key, including for later subscribers that
    /// do not bring their own.
    pub fn subscribe_with(
        self: &Arc<Self>,
        key: QueryKey,
        fetcher: Fetcher<T>,
        options: QueryOptions,
    ) -> QuerySubscription<T> {
        self.attach(key, fetcher, Some(options))
    }

    fn attach(
        self: &Arc<Self>,
        key: QueryKey,
        fetcher: Fetcher<T>,
        options: Option<QueryOptions>,
    ) -> QuerySubscription<T> {
        let entry = self.entry(key);
        let rx = {
            let mut state = entry.state.lock();
            state.subscribers += 1;
            state.fetcher = Some(fetcher);
            if options.is_some() {
                state.options = options;
            }
            if state.needs_fetch(&self.options) && entry.start_fetch(&mut state, &self.options) {
                entry.publish(&state);
            }
            entry.receiver()
        };
        QuerySubscription::new(Arc::clone(self), entry, rx)
    }

    /// Fetch `key` if needed and wait for the result, without staying
    /// subscribed.
    pub async fn prefetch(self: &Arc<Self>, key: QueryKey, fetcher: Fetcher<T>) -> QueryResult<T> {
        let mut subscription = self.subscribe(key, fetcher);
        subscription.settled().await
    }

    /// Current state of `key`, if it has ever been subscribed.
    pub fn state(&self, key: &QueryKey) -> Option<QueryResult<T>> {
        self.entries.get(key).map(|entry| entry.state.lock().snapshot())
    }

    pub fn keys(&self) -> Vec<QueryKey> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn subscriber_count(&self, key: &QueryKey) -> usize {
        self.entries.get(key).map_or(0, |entry| entry.state.lock().subscribers)
    }

    /// Mark `key` stale so the next subscription revalidates it.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let Some(entry) = self.lookup(key) else {
            return false;
        };
        entry.state.lock().invalidated = true;
        tracing::debug!(key = %key, "entry invalidated");
        true
    }

    /// Force a fetch of `key` with its last registered fetcher.
    pub fn refetch(&self, key: &QueryKey) -> bool {
        let Some(entry) = self.lookup(key) else {
            return false;
        };
        let mut state = entry.state.lock();
        let started = entry.start_fetch(&mut state, &self.options);
        if started {
            entry.publish(&state);
        }
        started
    }

    fn lookup(&self, key: &QueryKey) -> Option<Arc<QueryEntry<T>>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    fn entry(&self, key: QueryKey) -> Arc<QueryEntry<T>> {
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| Arc::new(QueryEntry::new(key)));
        Arc::clone(entry.value())
    }
}
