//! Data provider collaborator interface.
//!
//! Providers yield already-normalized readings. The engine never calls them;
//! the snapshot assembler does, through the fallback and cache wrappers.

use crate::error::ProviderError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Arc;

/// A value a provider can return. `validate` rejects non-finite or empty data.
pub trait Reading: Clone + Send + Sync + 'static {
    fn validate(&self) -> Result<(), ProviderError>;
}

#[async_trait]
pub trait DataProvider<T: Reading>: Send + Sync {
    async fn fetch(&self) -> Result<T, ProviderError>;

    fn name(&self) -> &str;
}

#[async_trait]
impl<T: Reading, P: DataProvider<T> + ?Sized> DataProvider<T> for Arc<P> {
    async fn fetch(&self) -> Result<T, ProviderError> {
        (**self).fetch().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Provider returning a fixed value, e.g. manually entered readings
pub struct StaticProvider<T> {
    name: String,
    value: T,
}

impl<T: Reading> StaticProvider<T> {
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[async_trait]
impl<T: Reading> DataProvider<T> for StaticProvider<T> {
    async fn fetch(&self) -> Result<T, ProviderError> {
        Ok(self.value.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Provider that is never reachable, for deployments without a live source
pub struct UnavailableProvider {
    name: String,
}

impl UnavailableProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl<T: Reading> DataProvider<T> for UnavailableProvider {
    async fn fetch(&self) -> Result<T, ProviderError> {
        Err(ProviderError::Unavailable {
            provider: self.name.clone(),
            reason: "no live source configured".to_string(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Provider reading a JSON document from disk on every fetch, e.g. an
/// exported price history. Put a [`CachedProvider`](super::CachedProvider)
/// in front of it to avoid rereading the file.
pub struct JsonFileProvider<T> {
    name: String,
    path: PathBuf,
    _reading: PhantomData<fn() -> T>,
}

impl<T: Reading + DeserializeOwned> JsonFileProvider<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: path.display().to_string(),
            path,
            _reading: PhantomData,
        }
    }

    fn unavailable(&self, reason: impl ToString) -> ProviderError {
        ProviderError::Unavailable {
            provider: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl<T: Reading + DeserializeOwned> DataProvider<T> for JsonFileProvider<T> {
    async fn fetch(&self) -> Result<T, ProviderError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.unavailable(e))?;
        serde_json::from_str(&contents).map_err(|e| self.unavailable(e))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), ProviderError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProviderError::InvalidValue { field, value })
    }
}
