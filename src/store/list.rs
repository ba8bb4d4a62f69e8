//! Bounded, deduplicated, most-recent-first lists
//!
//! One parametric list serves watch history, watchlist and search history. Each
//! instance is configured with an identity function and an optional length cap.
//! Every mutation is a synchronous read-modify-write of a single durable key.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::backend::{KeyValueStore, StoreResult};
use crate::error::StoreError;

pub struct BoundedList<T, K> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    identity: fn(&T) -> K,
    max_len: Option<usize>,
    _item: PhantomData<fn() -> T>,
}

impl<T, K> BoundedList<T, K>
where
    T: Serialize + DeserializeOwned,
    K: PartialEq,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str, identity: fn(&T) -> K) -> Self {
        Self {
            store,
            key,
            identity,
            max_len: None,
            _item: PhantomData,
        }
    }

    /// Cap the list; the oldest entries are dropped first.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    /// Strict read: absent key is an empty list, malformed payload is an error.
    fn load(&self) -> StoreResult<Vec<T>> {
        match self.store.get(self.key)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::Parse {
                key: self.key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn persist(&self, items: &[T]) -> StoreResult<()> {
        let json = serde_json::to_string(items).map_err(|e| StoreError::Parse {
            key: self.key.to_string(),
            reason: e.to_string(),
        })?;
        self.store.set(self.key, &json)
    }

    /// All items, most recent first. Never fails: unreadable storage reads as empty.
    pub fn read_all(&self) -> Vec<T> {
        self.load().unwrap_or_else(|e| {
            log::warn!("{}; treating as empty", e);
            Vec::new()
        })
    }

    /// Read ahead of a write. A malformed payload is replaced; a backend failure aborts
    /// the write so the stored list is left as it was.
    fn load_for_write(&self) -> StoreResult<Vec<T>> {
        match self.load() {
            Err(e @ StoreError::Parse { .. }) => {
                log::warn!("{}; overwriting", e);
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Insert at the front, replacing any item with the same identity, then apply the cap.
    pub fn upsert_front(&self, item: T) -> StoreResult<Vec<T>> {
        let id = (self.identity)(&item);
        let mut items = self.load_for_write()?;
        items.retain(|existing| (self.identity)(existing) != id);
        items.insert(0, item);
        if let Some(max) = self.max_len {
            items.truncate(max);
        }
        self.persist(&items)?;
        Ok(items)
    }

    /// Remove every item with this identity. Returns whether anything was removed.
    pub fn remove(&self, id: &K) -> StoreResult<bool> {
        let mut items = self.load_for_write()?;
        let before = items.len();
        items.retain(|existing| (self.identity)(existing) != *id);
        let removed = items.len() != before;
        if removed {
            self.persist(&items)?;
        }
        Ok(removed)
    }

    /// Delete the durable key entirely.
    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(self.key)
    }

    pub fn contains(&self, id: &K) -> bool {
        self.read_all()
            .iter()
            .any(|existing| (self.identity)(existing) == *id)
    }

    pub fn len(&self) -> usize {
        self.read_all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::MediaType;
    use crate::store::items::ListItem;
    use crate::store::{FlakyStore, MemoryStore};

    fn item(id: u64, media: MediaType, timestamp: i64) -> ListItem {
        ListItem {
            id,
            media_type: media,
            title: format!("Title {}", id),
            poster_path: None,
            season: None,
            episode: None,
            timestamp,
        }
    }

    fn list(store: Arc<dyn KeyValueStore>) -> BoundedList<ListItem, (u64, MediaType)> {
        BoundedList::new(store, "test_list", ListItem::identity)
    }

    #[test]
    fn test_upsert_into_empty() {
        let list = list(Arc::new(MemoryStore::new()));

        let items = list.upsert_front(item(42, MediaType::Movie, 1)).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 42);
    }

    #[test]
    fn test_upsert_existing_identity_replaces_and_moves_front() {
        let list = list(Arc::new(MemoryStore::new()));
        list.upsert_front(item(42, MediaType::Movie, 1)).unwrap();
        list.upsert_front(item(7, MediaType::Tv, 1)).unwrap();

        let items = list.upsert_front(item(42, MediaType::Movie, 2)).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 42);
        assert_eq!(items[0].timestamp, 2);
        assert_eq!(items[1].id, 7);
    }

    #[test]
    fn test_identity_includes_media_type() {
        let list = list(Arc::new(MemoryStore::new()));
        list.upsert_front(item(1, MediaType::Movie, 1)).unwrap();
        list.upsert_front(item(1, MediaType::Tv, 1)).unwrap();

        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_cap_discards_oldest() {
        let list = list(Arc::new(MemoryStore::new())).with_max_len(50);

        for id in 0..60 {
            list.upsert_front(item(id, MediaType::Movie, id as i64))
                .unwrap();
        }

        let items = list.read_all();
        assert_eq!(items.len(), 50);
        assert_eq!(items[0].id, 59);
        assert_eq!(items[49].id, 10);
        assert!(!list.contains(&(9, MediaType::Movie)));
    }

    #[test]
    fn test_remove() {
        let list = list(Arc::new(MemoryStore::new()));
        list.upsert_front(item(1, MediaType::Movie, 1)).unwrap();
        list.upsert_front(item(2, MediaType::Movie, 1)).unwrap();

        assert!(list.remove(&(1, MediaType::Movie)).unwrap());
        assert!(!list.remove(&(1, MediaType::Movie)).unwrap());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_clear_then_read_is_empty() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let list = list(store.clone());
        list.upsert_front(item(1, MediaType::Movie, 1)).unwrap();

        list.clear().unwrap();

        assert!(list.read_all().is_empty());
        assert!(store.get("test_list").unwrap().is_none());
    }

    #[test]
    fn test_malformed_payload_reads_as_empty() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set("test_list", "{not json").unwrap();
        let list = list(store);

        assert!(list.read_all().is_empty());
        // A write replaces the bad payload
        list.upsert_front(item(3, MediaType::Tv, 1)).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_string_list() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let searches: BoundedList<String, String> =
            BoundedList::new(store, "searches", String::clone).with_max_len(10);

        for q in ["a", "b", "a"] {
            searches.upsert_front(q.to_string()).unwrap();
        }

        assert_eq!(searches.read_all(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_backend_failure_does_not_wipe_list() {
        let flaky = Arc::new(FlakyStore::new());
        let list = list(flaky.clone());
        for id in 1..=5 {
            list.upsert_front(item(id, MediaType::Movie, 1)).unwrap();
        }

        flaky.fail_next_reads(1);
        let err = list.upsert_front(item(99, MediaType::Movie, 2)).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));

        flaky.fail_next_reads(1);
        assert!(list.remove(&(1, MediaType::Movie)).is_err());

        let items = list.read_all();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].id, 5);
        assert!(!list.contains(&(99, MediaType::Movie)));
    }
}
