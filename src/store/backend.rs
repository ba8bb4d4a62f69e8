//! Durable string key/value storage
//!
//! The library keeps one JSON document per key, the same shape a browser keeps in
//! `localStorage`. [`SqliteStore`] is the on-disk backend, [`MemoryStore`] backs tests
//! and `--data-dir` less dry runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, params};

use crate::error::StoreError;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// String-keyed, string-valued persistent store
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// SQLite-backed key/value store
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl SqliteStore {
    /// Open or create storage at the default data location
    pub fn open() -> StoreResult<Self> {
        Self::open_at(&Self::data_dir()?)
    }

    /// Get the data directory path (~/.local/share/mflix on Linux)
    pub fn data_dir() -> StoreResult<PathBuf> {
        let base = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(base.join("mflix"))
    }

    /// Open storage in a specific directory
    pub fn open_at(dir: &Path) -> StoreResult<Self> {
        std::fs::create_dir_all(dir)
            .map_err(|e| StoreError::Backend(format!("Failed to create data dir: {}", e)))?;

        let path = dir.join("storage.db");
        let conn = Connection::open(&path)?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            );
            "#,
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Database file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn()
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn()
            .execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }
}

/// Volatile in-memory store
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.map.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.map().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.map().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.map().remove(key);
        Ok(())
    }
}

/// In-memory store whose next reads can be made to fail like a locked database
#[cfg(test)]
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing_reads: AtomicUsize,
}

#[cfg(test)]
impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_reads(&self, count: usize) {
        self.failing_reads.store(count, Ordering::SeqCst);
    }
}

#[cfg(test)]
impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let fail = self
            .failing_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if fail {
            return Err(StoreError::Backend("database is locked".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.inner.remove(key)
    }
}
