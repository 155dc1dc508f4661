//! Time-to-live cache in front of a provider

use crate::error::ProviderError;
use crate::services::provider::{DataProvider, Reading};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Serves the last valid reading until it is older than `ttl`.
/// Failed or invalid fetches are never cached.
pub struct CachedProvider<T: Reading> {
    inner: Arc<dyn DataProvider<T>>,
    ttl: Duration,
    entry: RwLock<Option<(Instant, T)>>,
}

impl<T: Reading> CachedProvider<T> {
    pub fn new(inner: Arc<dyn DataProvider<T>>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entry: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drop the cached reading so the next fetch goes to the provider
    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }
}

#[async_trait]
impl<T: Reading> DataProvider<T> for CachedProvider<T> {
    async fn fetch(&self) -> Result<T, ProviderError> {
        {
            let entry = self.entry.read().await;
            if let Some((fetched_at, value)) = entry.as_ref() {
                if fetched_at.elapsed() < self.ttl {
                    debug!(provider = self.inner.name(), "Serving cached reading");
                    return Ok(value.clone());
                }
            }
        }

        let value: T = self.inner.fetch().await?;
        value.validate()?;
        *self.entry.write().await = Some((Instant::now(), value.clone()));
        Ok(value)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
