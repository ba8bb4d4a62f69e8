//! TMDB metadata API client
//!
//! [`MetadataApi`] is the seam between the catalog/row logic and the network.
//! [`TmdbClient`] talks HTTP; [`crate::cache::CachedMetadataClient`] wraps any
//! implementation with the response cache.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::cache::canonical_key;
use crate::error::Result;

pub mod catalog;
pub mod images;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod presets;
pub mod tmdb;

pub use catalog::Catalog;
#[cfg(test)]
pub use mock::MockMetadataApi;
pub use pagination::{MAX_ROW_PAGES, PagedResults};
pub use presets::{Mood, Preset};
pub use tmdb::TmdbClient;

/// Query parameter that never takes part in cache keys.
pub const API_KEY_PARAM: &str = "api_key";

/// A single GET request against the metadata API: endpoint path plus query parameters.
///
/// Parameters live in a `BTreeMap`, so iteration order is always sorted by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    endpoint: String,
    params: BTreeMap<String, String>,
}

impl Query {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: BTreeMap::new(),
        }
    }

    /// Set a query parameter, replacing any previous value.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Set the `page` parameter.
    pub fn page(self, page: u32) -> Self {
        self.param("page", page)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Merge default parameters underneath the caller's own: a key the caller
    /// already set keeps the caller's value.
    pub fn with_defaults(&self, defaults: &[(&str, &str)]) -> Self {
        let mut merged = self.clone();
        for (k, v) in defaults {
            merged
                .params
                .entry((*k).to_string())
                .or_insert_with(|| (*v).to_string());
        }
        merged
    }

    /// Canonical request key: endpoint plus sorted parameters, without the API key.
    pub fn cache_key(&self) -> String {
        let params: Vec<(&str, &str)> = self
            .params
            .iter()
            .filter(|(k, _)| k.as_str() != API_KEY_PARAM)
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        canonical_key(&self.endpoint, &params)
    }
}

/// Metadata API seam.
///
/// Implementations return the decoded JSON body verbatim; schema handling is left
/// to [`Catalog`].
#[async_trait]
pub trait MetadataApi: Send + Sync {
    /// The request that will actually be issued for `query` (defaults merged in).
    fn resolve(&self, query: &Query) -> Query {
        query.clone()
    }

    /// Perform the request and return the decoded JSON body.
    async fn fetch(&self, query: &Query) -> Result<Value>;
}
