//! Deduplicating query cache.
//!
//! One [`QueryCache`] is built at startup and shared by reference with every
//! consumer. For each [`QueryKey`] it keeps a single entry that:
//! - runs at most one fetch at a time, shared by all subscribers
//! - serves cached data immediately and revalidates it in the background
//!   once it is older than the stale time
//! - retries failures with exponential backoff before surfacing an error
//! - applies only the result of the most recently issued fetch
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  QueryCache<T>                                                │
//! │  ├── entries: DashMap<QueryKey, Arc<QueryEntry<T>>>          │
//! │  │     ├── state: Mutex<EntryState<T>>  (status, data, seq)  │
//! │  │     └── tx: watch::Sender<QueryResult<T>>                 │
//! │  └── options: QueryOptions (stale time, timeout, retry)      │
//! └──────────────────────────────────────────────────────────────┘
//!            ▲ subscribe()                │ watch::Receiver
//!            │                            ▼
//!      QuerySubscription<T>  ──  current() / changed() / settled()
//! ```

mod cache;
mod entry;
mod key;
mod options;
mod retry;
mod state;
mod subscription;

#[cfg(test)]
mod tests;

pub use cache::QueryCache;
pub use key::QueryKey;
pub use options::{QueryOptions, RetryPolicy};
pub use state::{QueryResult, QueryStatus};
pub use subscription::QuerySubscription;

use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;
use tftstats_types::FetchError;

/// Shared, re-invocable fetch function for one query.
pub type Fetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, FetchError>> + Send + Sync>;

/// Wrap an async closure as a [`Fetcher`].
pub fn fetcher<T, F, Fut>(f: F) -> Fetcher<T>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
{
    Arc::new(move || f().boxed())
}
