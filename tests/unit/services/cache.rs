//! Unit tests for the TTL provider cache

use async_trait::async_trait;
use macrobias::models::YieldReading;
use macrobias::services::{CachedProvider, DataProvider};
use macrobias::ProviderError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

/// Returns a rising yield on every call; call numbers in `fail_on` error out
struct CountingProvider {
    calls: AtomicUsize,
    fail_on: Vec<usize>,
}

impl CountingProvider {
    fn new() -> Self {
        Self::failing_on(Vec::new())
    }

    fn failing_on(fail_on: Vec<usize>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataProvider<YieldReading> for CountingProvider {
    async fn fetch(&self) -> Result<YieldReading, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on.contains(&call) {
            return Err(ProviderError::Unavailable {
                provider: "counting".to_string(),
                reason: "down".to_string(),
            });
        }
        Ok(YieldReading::new(4.0 + call as f64 / 100.0, 0.01))
    }

    fn name(&self) -> &str {
        "counting"
    }
}

#[tokio::test]
async fn serves_cached_value_within_ttl() {
    let inner = Arc::new(CountingProvider::new());
    let cache = CachedProvider::new(inner.clone(), Duration::from_secs(3600));

    let first = assert_ok!(cache.fetch().await);
    let second = assert_ok!(cache.fetch().await);

    assert_eq!(first, second);
    assert_eq!(inner.calls(), 1);
    assert_eq!(cache.name(), "counting");
}

#[tokio::test]
async fn refetches_after_expiry() {
    let inner = Arc::new(CountingProvider::new());
    let cache = CachedProvider::new(inner.clone(), Duration::ZERO);

    let first = assert_ok!(cache.fetch().await);
    let second = assert_ok!(cache.fetch().await);

    assert_ne!(first, second);
    assert_eq!(inner.calls(), 2);
}

#[tokio::test]
async fn invalidate_forces_refetch() {
    let inner = Arc::new(CountingProvider::new());
    let cache = CachedProvider::new(inner.clone(), Duration::from_secs(3600));

    assert_ok!(cache.fetch().await);
    cache.invalidate().await;
    assert_ok!(cache.fetch().await);

    assert_eq!(inner.calls(), 2);
}

#[tokio::test]
async fn failures_are_not_cached() {
    let inner = Arc::new(CountingProvider::failing_on(vec![1]));
    let cache = CachedProvider::new(inner.clone(), Duration::from_secs(3600));

    assert_err!(cache.fetch().await);
    let value = assert_ok!(cache.fetch().await);
    let cached = assert_ok!(cache.fetch().await);

    assert_eq!(value, cached);
    assert_eq!(inner.calls(), 2);
}
