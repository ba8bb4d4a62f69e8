//! Response cache for metadata API calls
//!
//! An in-memory, process-lifetime store keyed by canonical request key. Caching is
//! a performance nicety only: nothing is persisted across runs.

pub mod client;
pub mod key;
pub mod storage;

use std::time::Duration;

/// Fixed time-to-live for every cached response
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60); // 5 min

// Re-export main types
pub use client::CachedMetadataClient;
pub use key::canonical_key;
pub use storage::{CacheStats, Clock, ResponseCache, SystemClock};
