//! Cached wrapper for metadata API clients
//!
//! Provides transparent caching for all metadata responses using [`ResponseCache`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::cache::ResponseCache;
use crate::client::{MetadataApi, Query};
use crate::error::Result;

/// Cached wrapper for any [`MetadataApi`] implementation.
///
/// The cache is injected so the owner (the command context) can clear it or report
/// statistics. Caching can be disabled for `--no-cache`.
pub struct CachedMetadataClient<C: MetadataApi> {
    inner: Arc<C>,
    cache: Arc<ResponseCache>,
    enabled: bool,
}

impl<C: MetadataApi> CachedMetadataClient<C> {
    /// Create a new cached client wrapper.
    ///
    /// # Arguments
    /// * `inner` - The underlying API client to wrap
    /// * `cache` - Session cache shared with the caller
    /// * `enabled` - Whether caching is enabled (false for --no-cache)
    pub fn new(inner: C, cache: Arc<ResponseCache>, enabled: bool) -> Self {
        Self {
            inner: Arc::new(inner),
            cache,
            enabled,
        }
    }

    /// The shared response cache
    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }
}

#[async_trait]
impl<C: MetadataApi + 'static> MetadataApi for CachedMetadataClient<C> {
    fn resolve(&self, query: &Query) -> Query {
        self.inner.resolve(query)
    }

    async fn fetch(&self, query: &Query) -> Result<Value> {
        if !self.enabled {
            return self.inner.fetch(query).await;
        }

        let key = self.inner.resolve(query).cache_key();

        if let Some(cached) = self.cache.get(&key) {
            log::debug!("Cache hit: {}", key);
            return Ok(cached);
        }

        log::debug!("Cache miss: {}", key);
        let result = self.inner.fetch(query).await?;
        self.cache.put(&key, result.clone());
        Ok(result)
    }
}
