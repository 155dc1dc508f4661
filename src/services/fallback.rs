//! Retry-then-fallback wrapper around a provider

use crate::error::ProviderError;
use crate::metrics::Metrics;
use crate::models::DataOrigin;
use crate::services::provider::{DataProvider, Reading};
use backon::{ExponentialBuilder, Retryable};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub attempts: usize,
    pub min_delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: usize, min_delay: Duration) -> Self {
        Self {
            attempts,
            min_delay,
        }
    }

    /// Single attempt, no retries
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_times(self.attempts)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_millis(200))
    }
}

/// A value together with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub value: T,
    pub origin: DataOrigin,
}

/// Never fails: live value when the provider answers with valid data,
/// otherwise the configured fallback and the reason it was used.
pub struct FallbackProvider<T: Reading> {
    inner: Arc<dyn DataProvider<T>>,
    fallback: T,
    retry: RetryPolicy,
    metrics: Option<Arc<Metrics>>,
}

impl<T: Reading> FallbackProvider<T> {
    pub fn new(inner: Arc<dyn DataProvider<T>>, fallback: T, retry: RetryPolicy) -> Self {
        Self {
            inner,
            fallback,
            retry,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn fallback(&self) -> &T {
        &self.fallback
    }

    pub async fn fetch_or_fallback(&self) -> Sourced<T> {
        let inner = &self.inner;
        let provider = inner.name();

        let result = (|| async move {
            let value: T = inner.fetch().await?;
            value.validate()?;
            Ok::<T, ProviderError>(value)
        })
        .retry(self.retry.backoff())
        .notify(|err: &ProviderError, retry_in: Duration| {
            warn!(
                provider,
                error = %err,
                retry_in_ms = retry_in.as_millis() as u64,
                "Provider fetch failed, retrying"
            );
        })
        .await;

        match result {
            Ok(value) => Sourced {
                value,
                origin: DataOrigin::Live,
            },
            Err(e) => {
                warn!(provider, error = %e, "Provider unavailable, using fallback values");
                if let Some(metrics) = &self.metrics {
                    metrics.record_fallback(provider);
                }
                Sourced {
                    value: self.fallback.clone(),
                    origin: DataOrigin::Fallback {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }
}
