//! Mock metadata API for testing
//!
//! Provides a [`MetadataApi`] implementation driven by a closure, with call
//! counting and request capture, so cache, catalog and row logic can be tested
//! without making real API calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{MetadataApi, Query};
use crate::error::Result;

type Responder = dyn Fn(&Query) -> Result<Value> + Send + Sync;

/// Shared call counter, readable after the mock has been moved into a wrapper.
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockMetadataApi::new(|q| Ok(movie_page(1, 20)));
/// let calls = mock.call_counter();
/// ```
pub struct MockMetadataApi {
    responder: Box<Responder>,
    calls: CallCounter,
    captured: Arc<Mutex<Vec<Query>>>,
    delay: Option<Duration>,
}

impl MockMetadataApi {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&Query) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: CallCounter::default(),
            captured: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Sleep before answering, to keep requests in flight.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_counter(&self) -> CallCounter {
        self.calls.clone()
    }

    /// Handle to every query received, in arrival order.
    pub fn captured(&self) -> Arc<Mutex<Vec<Query>>> {
        self.captured.clone()
    }
}

#[async_trait]
impl MetadataApi for MockMetadataApi {
    async fn fetch(&self, query: &Query) -> Result<Value> {
        self.calls.0.fetch_add(1, Ordering::SeqCst);
        self.captured.lock().unwrap().push(query.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        (self.responder)(query)
    }
}

/// A TMDB-shaped list page holding `count` movies with ids starting at `first_id`.
pub fn movie_page(first_id: u64, count: usize) -> Value {
    let results: Vec<Value> = (0..count as u64)
        .map(|i| {
            json!({
                "id": first_id + i,
                "title": format!("Movie {}", first_id + i),
                "poster_path": format!("/p{}.jpg", first_id + i),
                "vote_average": 7.5,
                "release_date": "2023-05-01",
                "overview": "",
                "genre_ids": [28],
                "original_language": "en"
            })
        })
        .collect();

    json!({
        "page": 1,
        "results": results,
        "total_pages": 100,
        "total_results": 2000
    })
}
