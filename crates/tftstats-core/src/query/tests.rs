use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tftstats_types::FetchError;
use tokio::time::{advance, sleep, Instant};

use super::*;

fn key() -> QueryKey {
    QueryKey::new(["comps", "metaDecks"])
}

/// Fetcher returning `v<n>` for the n-th call after `delay`.
fn counting(calls: Arc<AtomicUsize>, delay: Duration) -> Fetcher<String> {
    fetcher(move || {
        let calls = Arc::clone(&calls);
        async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            sleep(delay).await;
            Ok(format!("v{n}"))
        }
    })
}

fn failing(calls: Arc<AtomicUsize>, error: FetchError) -> Fetcher<String> {
    fetcher(move || {
        let calls = Arc::clone(&calls);
        let error = error.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(error)
        }
    })
}

fn network_error() -> FetchError {
    FetchError::Network { message: "connection reset".to_string() }
}

fn data(result: &QueryResult<String>) -> Option<String> {
    result.data.as_deref().cloned()
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_subscribers_share_one_fetch() {
    let cache = QueryCache::new(QueryOptions::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let fetch = counting(Arc::clone(&calls), Duration::from_millis(50));

    let mut subs: Vec<_> = (0..5).map(|_| cache.subscribe(key(), Arc::clone(&fetch))).collect();
    assert!(subs.iter().all(|s| s.current().is_loading()));
    assert_eq!(cache.subscriber_count(&key()), 5);

    let mut results = Vec::new();
    for sub in &mut subs {
        results.push(sub.settled().await);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let first = results[0].data.clone().expect("data");
    for result in &results {
        assert!(result.is_success());
        assert!(Arc::ptr_eq(result.data.as_ref().expect("data"), &first));
    }
    assert!(results[0].data_updated_at.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_fresh_entry_is_reused() {
    let cache = QueryCache::new(QueryOptions::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let fetch = counting(Arc::clone(&calls), Duration::from_millis(10));

    cache.prefetch(key(), Arc::clone(&fetch)).await;
    advance(Duration::from_secs(60)).await;

    let sub = cache.subscribe(key(), fetch);
    let state = sub.current();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!state.is_fetching);
    assert!(!state.is_loading());
    assert_eq!(data(&state).as_deref(), Some("v1"));
}

#[tokio::test(start_paused = true)]
async fn test_stale_entry_served_while_revalidating() {
    let cache = QueryCache::new(QueryOptions::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let fetch = counting(Arc::clone(&calls), Duration::from_millis(10));

    cache.prefetch(key(), Arc::clone(&fetch)).await;
    advance(Duration::from_secs(5 * 60 + 1)).await;

    let mut sub = cache.subscribe(key(), fetch);
    let during = sub.current();
    assert!(!during.is_loading());
    assert!(during.is_fetching);
    assert_eq!(data(&during).as_deref(), Some("v1"));

    let after = sub.settled().await;
    assert!(!after.is_fetching);
    assert_eq!(data(&after).as_deref(), Some("v2"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_retries_with_backoff_until_success() {
    let cache = QueryCache::new(QueryOptions::default());
    let attempts = Arc::new(Mutex::new(Vec::<Instant>::new()));
    let recorded = Arc::clone(&attempts);
    let fetch = fetcher(move || {
        let recorded = Arc::clone(&recorded);
        async move {
            let mut attempts = recorded.lock();
            attempts.push(Instant::now());
            if attempts.len() < 3 {
                Err(FetchError::Network { message: "flaky".to_string() })
            } else {
                Ok("payload".to_string())
            }
        }
    });

    let mut sub = cache.subscribe(key(), fetch);
    let result = sub.settled().await;

    assert!(result.is_success());
    assert_eq!(data(&result).as_deref(), Some("payload"));
    assert_eq!(result.failure_count, 0);

    let attempts = attempts.lock();
    assert_eq!(attempts.len(), 3);
    let first_gap = attempts[1] - attempts[0];
    let second_gap = attempts[2] - attempts[1];
    assert!(first_gap >= Duration::from_millis(1000));
    assert!(second_gap >= first_gap);
    assert!(second_gap <= Duration::from_millis(30_000));
}

#[tokio::test(start_paused = true)]
async fn test_retries_exhausted_surface_error() {
    let cache = QueryCache::new(QueryOptions::default());
    let calls = Arc::new(AtomicUsize::new(0));

    let mut sub = cache.subscribe(key(), failing(Arc::clone(&calls), network_error()));
    let result = sub.settled().await;

    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert!(result.is_error());
    assert!(result.data.is_none());
    assert_eq!(result.error, Some(network_error()));
    assert_eq!(result.failure_count, 4);
}

#[tokio::test(start_paused = true)]
async fn test_client_and_shape_errors_fail_fast() {
    let cache = QueryCache::new(QueryOptions::default());

    for error in [
        FetchError::Server { status: 404, message: "missing".to_string() },
        FetchError::MalformedResponse { message: "no dehydratedState".to_string() },
    ] {
        let calls = Arc::new(AtomicUsize::new(0));
        let key = QueryKey::new(["fail-fast", error.to_string().as_str()]);
        let mut sub = cache.subscribe(key, failing(Arc::clone(&calls), error.clone()));

        let result = sub.settled().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "{error}");
        assert_eq!(result.error, Some(error));
    }
}

#[tokio::test(start_paused = true)]
async fn test_rate_limited_is_retried() {
    let cache = QueryCache::new(QueryOptions::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let error = FetchError::Server { status: 429, message: "slow down".to_string() };

    let mut sub = cache.subscribe(key(), failing(Arc::clone(&calls), error));
    sub.settled().await;

    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test(start_paused = true)]
async fn test_slow_fetch_times_out() {
    let options = QueryOptions {
        fetch_timeout: Duration::from_secs(10),
        retry: RetryPolicy { max_retries: 0, ..RetryPolicy::default() },
        ..QueryOptions::default()
    };
    let cache = QueryCache::new(options);
    let calls = Arc::new(AtomicUsize::new(0));

    let mut sub = cache.subscribe(key(), counting(Arc::clone(&calls), Duration::from_secs(20)));
    let result = sub.settled().await;

    assert_eq!(result.error, Some(FetchError::Timeout { timeout_ms: 10_000 }));
    assert!(result.data.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_refetch_keeps_data_visible() {
    let cache = QueryCache::new(QueryOptions::default());
    let calls = Arc::new(AtomicUsize::new(0));

    let mut sub = cache.subscribe(key(), counting(Arc::clone(&calls), Duration::from_millis(100)));
    sub.settled().await;

    sub.refetch();
    let during = sub.current();
    assert!(during.is_fetching);
    assert!(during.is_success());
    assert_eq!(data(&during).as_deref(), Some("v1"));

    let after = sub.settled().await;
    assert_eq!(data(&after).as_deref(), Some("v2"));
}

#[tokio::test(start_paused = true)]
async fn test_failed_refetch_keeps_last_data() {
    let options = QueryOptions {
        retry: RetryPolicy { max_retries: 0, ..RetryPolicy::default() },
        ..QueryOptions::default()
    };
    let cache = QueryCache::new(options);
    let broken = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&broken);
    let fetch = fetcher(move || {
        let flag = Arc::clone(&flag);
        async move {
            if flag.load(Ordering::SeqCst) {
                Err(FetchError::Server { status: 500, message: "boom".to_string() })
            } else {
                Ok("good".to_string())
            }
        }
    });

    let mut sub = cache.subscribe(key(), fetch);
    sub.settled().await;

    broken.store(true, Ordering::SeqCst);
    sub.refetch();
    let result = sub.settled().await;

    assert!(result.is_error());
    assert_eq!(data(&result).as_deref(), Some("good"));
}

#[tokio::test(start_paused = true)]
async fn test_latest_refetch_wins() {
    let cache = QueryCache::new(QueryOptions::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    // First call is slow, every later call is fast.
    let fetch = fetcher(move || {
        let counter = Arc::clone(&counter);
        async move {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            let delay = if n == 1 { 500 } else { 10 };
            sleep(Duration::from_millis(delay)).await;
            Ok(format!("v{n}"))
        }
    });

    let mut sub = cache.subscribe(key(), fetch);
    tokio::task::yield_now().await;
    sub.refetch();

    let result = sub.settled().await;
    assert_eq!(data(&result).as_deref(), Some("v2"));

    sleep(Duration::from_secs(1)).await;
    assert_eq!(data(&sub.current()).as_deref(), Some("v2"));
}

#[tokio::test(start_paused = true)]
async fn test_last_unsubscribe_cancels_fetch() {
    let cache = QueryCache::new(QueryOptions::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let fetch = counting(Arc::clone(&calls), Duration::from_secs(1));

    let sub = cache.subscribe(key(), Arc::clone(&fetch));
    tokio::task::yield_now().await;
    drop(sub);

    let state = cache.state(&key()).expect("entry exists");
    assert_eq!(state.status, QueryStatus::Idle);
    assert!(!state.is_fetching);

    sleep(Duration::from_secs(2)).await;
    let state = cache.state(&key()).expect("entry exists");
    assert!(state.data.is_none());
    assert_eq!(cache.subscriber_count(&key()), 0);

    let mut sub = cache.subscribe(key(), fetch);
    assert!(sub.current().is_loading());
    assert!(sub.settled().await.is_success());
}

#[tokio::test(start_paused = true)]
async fn test_remaining_subscriber_keeps_fetch_alive() {
    let cache = QueryCache::new(QueryOptions::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let fetch = counting(Arc::clone(&calls), Duration::from_millis(100));

    let first = cache.subscribe(key(), Arc::clone(&fetch));
    let mut second = cache.subscribe(key(), fetch);
    drop(first);

    assert!(second.settled().await.is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_invalidate_and_refetch_by_key() {
    let cache = QueryCache::new(QueryOptions::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let fetch = counting(Arc::clone(&calls), Duration::from_millis(10));

    assert!(!cache.invalidate(&key()));
    assert!(!cache.refetch(&key()));

    cache.prefetch(key(), Arc::clone(&fetch)).await;
    assert_eq!(cache.keys(), vec![key()]);

    assert!(cache.invalidate(&key()));
    let mut sub = cache.subscribe(key(), fetch);
    assert!(sub.current().is_fetching);
    assert_eq!(data(&sub.settled().await).as_deref(), Some("v2"));

    assert!(cache.refetch(&key()));
    assert_eq!(data(&sub.settled().await).as_deref(), Some("v3"));
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_observe_transitions() {
    let cache = QueryCache::new(QueryOptions::default());
    let calls = Arc::new(AtomicUsize::new(0));

    let mut sub = cache.subscribe(key(), counting(Arc::clone(&calls), Duration::from_millis(10)));
    assert_eq!(sub.current().status, QueryStatus::Loading);

    let next = sub.changed().await;
    assert_eq!(next.status, QueryStatus::Success);
    assert_eq!(sub.key(), &key());
}

fn panicking(calls: Arc<AtomicUsize>) -> Fetcher<String> {
    fetcher(move || {
        let calls = Arc::clone(&calls);
        async move {
            if calls.fetch_add(1, Ordering::SeqCst) < usize::MAX {
                panic!("decoder blew up");
            }
            Ok(String::new())
        }
    })
}

#[tokio::test(start_paused = true)]
async fn test_panicking_fetcher_settles_as_error() {
    let cache = QueryCache::new(QueryOptions::default());
    let panics = Arc::new(AtomicUsize::new(0));

    let mut broken = cache.subscribe(key(), panicking(Arc::clone(&panics)));
    let result = broken.settled().await;

    assert_eq!(panics.load(Ordering::SeqCst), 1);
    assert!(result.is_error());
    assert!(!result.is_fetching);
    assert!(
        matches!(&result.error, Some(FetchError::Internal { message }) if message.contains("decoder blew up")),
        "{:?}",
        result.error
    );

    // The entry is not wedged: the next subscriber fetches again.
    let calls = Arc::new(AtomicUsize::new(0));
    let mut healthy = cache.subscribe(key(), counting(Arc::clone(&calls), Duration::from_millis(10)));
    assert!(healthy.current().is_fetching);
    let result = healthy.settled().await;
    assert!(result.is_success());
    assert_eq!(data(&result).as_deref(), Some("v1"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_per_key_stale_time_override() {
    let cache = QueryCache::new(QueryOptions::default());
    let bundle_key = key();
    let items_key = QueryKey::new(["stats", "items"]);
    let bundle_calls = Arc::new(AtomicUsize::new(0));
    let items_calls = Arc::new(AtomicUsize::new(0));
    let bundle_fetch = counting(Arc::clone(&bundle_calls), Duration::from_millis(10));
    let items_fetch = counting(Arc::clone(&items_calls), Duration::from_millis(10));
    let short = QueryOptions { stale_time: Duration::from_secs(30), ..QueryOptions::default() };

    cache.prefetch(bundle_key.clone(), Arc::clone(&bundle_fetch)).await;
    cache
        .subscribe_with(items_key.clone(), Arc::clone(&items_fetch), short)
        .settled()
        .await;
    advance(Duration::from_secs(60)).await;

    // Plain subscribers keep the override already stored on the entry.
    let bundle = cache.subscribe(bundle_key, bundle_fetch);
    let mut items = cache.subscribe(items_key, items_fetch);
    assert!(!bundle.current().is_fetching);
    assert!(items.current().is_fetching);

    let refreshed = items.settled().await;
    assert_eq!(data(&refreshed).as_deref(), Some("v2"));
    assert_eq!(bundle_calls.load(Ordering::SeqCst), 1);
    assert_eq!(items_calls.load(Ordering::SeqCst), 2);
}
