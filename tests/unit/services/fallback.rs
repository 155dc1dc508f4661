//! Unit tests for the retry-then-fallback provider wrapper

use async_trait::async_trait;
use macrobias::metrics::Metrics;
use macrobias::models::{DataOrigin, MacroReadings};
use macrobias::services::{
    DataProvider, FallbackProvider, RetryPolicy, StaticProvider, UnavailableProvider,
};
use macrobias::ProviderError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Fails the first `failures` calls, then returns `value`
struct FlakyProvider {
    failures: usize,
    calls: AtomicUsize,
    value: MacroReadings,
}

impl FlakyProvider {
    fn new(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
            value: MacroReadings::new(5.25, 3.75, 3.1, 2.4),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataProvider<MacroReadings> for FlakyProvider {
    async fn fetch(&self) -> Result<MacroReadings, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(ProviderError::Unavailable {
                provider: "flaky".to_string(),
                reason: format!("attempt {} timed out", call + 1),
            });
        }
        Ok(self.value)
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

fn fast_retry(attempts: usize) -> RetryPolicy {
    RetryPolicy::new(attempts, Duration::from_millis(1))
}

#[tokio::test]
async fn live_value_is_returned() {
    let live = MacroReadings::new(5.0, 4.0, 3.0, 2.0);
    let provider = FallbackProvider::new(
        Arc::new(StaticProvider::new("manual", live)),
        MacroReadings::default(),
        RetryPolicy::none(),
    );

    let sourced = provider.fetch_or_fallback().await;
    assert_eq!(sourced.value, live);
    assert_eq!(sourced.origin, DataOrigin::Live);
}

#[tokio::test]
async fn falls_back_after_retries_are_exhausted() {
    let flaky = Arc::new(FlakyProvider::new(usize::MAX));
    let provider = FallbackProvider::new(flaky.clone(), MacroReadings::default(), fast_retry(2));

    let sourced = provider.fetch_or_fallback().await;
    assert_eq!(sourced.value, MacroReadings::default());
    assert!(sourced.origin.is_fallback());
    assert_eq!(flaky.calls(), 3);

    match sourced.origin {
        DataOrigin::Fallback { reason } => assert!(reason.contains("flaky")),
        DataOrigin::Live => panic!("expected fallback origin"),
    }
}

#[tokio::test]
async fn recovers_on_retry() {
    let flaky = Arc::new(FlakyProvider::new(1));
    let provider = FallbackProvider::new(flaky.clone(), MacroReadings::default(), fast_retry(2));

    let sourced = provider.fetch_or_fallback().await;
    assert_eq!(sourced.origin, DataOrigin::Live);
    assert_eq!(sourced.value, MacroReadings::new(5.25, 3.75, 3.1, 2.4));
    assert_eq!(flaky.calls(), 2);
}

#[tokio::test]
async fn invalid_live_value_triggers_fallback() {
    let broken = MacroReadings::new(5.0, f64::NAN, 3.0, 2.0);
    let provider = FallbackProvider::new(
        Arc::new(StaticProvider::new("broken", broken)),
        MacroReadings::default(),
        RetryPolicy::none(),
    );

    let sourced = provider.fetch_or_fallback().await;
    assert_eq!(sourced.value, MacroReadings::default());
    match sourced.origin {
        DataOrigin::Fallback { reason } => assert!(reason.contains("policy_rate_b")),
        DataOrigin::Live => panic!("expected fallback origin"),
    }
}

#[tokio::test]
async fn fallback_is_counted_in_metrics() {
    let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
    let provider = FallbackProvider::new(
        Arc::new(UnavailableProvider::new("offline-macro")),
        MacroReadings::default(),
        RetryPolicy::none(),
    )
    .with_metrics(metrics.clone());

    assert_eq!(provider.name(), "offline-macro");
    let sourced = provider.fetch_or_fallback().await;
    assert!(sourced.origin.is_fallback());

    let exported = metrics.export().unwrap();
    assert!(exported.contains("provider_fallbacks_total{provider=\"offline-macro\"} 1"));
}
