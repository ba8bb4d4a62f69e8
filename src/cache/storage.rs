//! In-memory response cache with lazy TTL expiry
//!
//! Entries live for the lifetime of the process. There is no background sweep:
//! an entry found expired on read is evicted and reported as a miss.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::CACHE_TTL;

/// Time source for expiry decisions
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A cached response
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// An entry is expired once `now` reaches `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Default)]
struct Inner {
    entries: HashMap<String, CacheEntry>,
    hits: u64,
    misses: u64,
}

/// Process-lifetime key/value cache for metadata responses.
///
/// Construct one per session and share it through `Arc`.
pub struct ResponseCache {
    inner: Mutex<Inner>,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCache {
    /// Cache with the fixed TTL and the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Cache driven by a custom clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let ttl = chrono::Duration::from_std(CACHE_TTL).unwrap_or(chrono::Duration::minutes(5));
        Self {
            inner: Mutex::new(Inner::default()),
            ttl,
            clock,
        }
    }

    // A poisoned lock only means another thread panicked mid-update of plain data.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Look up a live entry. Expired entries are evicted and count as a miss.
    pub fn get(&self, key: &str) -> Option<Value> {
        let now = self.clock.now();
        let mut guard = self.lock();
        let inner = &mut *guard;

        let expired = match inner.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                let data = entry.data.clone();
                inner.hits += 1;
                return Some(data);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            inner.entries.remove(key);
        }
        inner.misses += 1;
        None
    }

    /// Store (or overwrite) an entry with the fixed TTL.
    pub fn put(&self, key: &str, data: Value) {
        let now = self.clock.now();
        let entry = CacheEntry {
            data,
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.lock().entries.insert(key.to_string(), entry);
    }

    /// Remove every entry. Returns the number removed.
    pub fn clear(&self) -> usize {
        let mut inner = self.lock();
        let removed = inner.entries.len();
        inner.entries.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of cache state
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let inner = self.lock();
        let valid_entries = inner
            .entries
            .values()
            .filter(|e| !e.is_expired_at(now))
            .count();
        let oldest_entry = inner
            .entries
            .values()
            .filter(|e| !e.is_expired_at(now))
            .map(|e| e.created_at)
            .min();

        CacheStats {
            total_entries: inner.entries.len(),
            valid_entries,
            expired_entries: inner.entries.len() - valid_entries,
            hits: inner.hits,
            misses: inner.misses,
            oldest_entry,
        }
    }
}

/// Statistics about cache state
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub oldest_entry: Option<DateTime<Utc>>,
}
