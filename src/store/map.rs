//! Keyed maps persisted as one JSON object per durable key

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::backend::{KeyValueStore, StoreResult};
use crate::client::models::MediaType;
use crate::error::StoreError;

pub struct JsonMap<V> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _value: PhantomData<fn() -> V>,
}

impl<V> JsonMap<V>
where
    V: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _value: PhantomData,
        }
    }

    fn load(&self) -> StoreResult<BTreeMap<String, V>> {
        match self.store.get(self.key)? {
            None => Ok(BTreeMap::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::Parse {
                key: self.key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn persist(&self, map: &BTreeMap<String, V>) -> StoreResult<()> {
        let json = serde_json::to_string(map).map_err(|e| StoreError::Parse {
            key: self.key.to_string(),
            reason: e.to_string(),
        })?;
        self.store.set(self.key, &json)
    }

    /// Whole map. Unreadable storage reads as empty.
    pub fn read_all(&self) -> BTreeMap<String, V> {
        self.load().unwrap_or_else(|e| {
            log::warn!("{}; treating as empty", e);
            BTreeMap::new()
        })
    }

    /// Read ahead of a write. A malformed payload is replaced; a backend failure aborts.
    fn load_for_write(&self) -> StoreResult<BTreeMap<String, V>> {
        match self.load() {
            Err(e @ StoreError::Parse { .. }) => {
                log::warn!("{}; overwriting", e);
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    pub fn get(&self, entry: &str) -> Option<V> {
        self.read_all().remove(entry)
    }

    /// Overwrite one entry; last write wins.
    pub fn set(&self, entry: impl Into<String>, value: V) -> StoreResult<()> {
        let mut map = self.load_for_write()?;
        map.insert(entry.into(), value);
        self.persist(&map)
    }

    /// Replace one entry with `f(current)` in a single read-modify-write.
    pub fn update(
        &self,
        entry: impl Into<String>,
        f: impl FnOnce(Option<&V>) -> V,
    ) -> StoreResult<()> {
        let entry = entry.into();
        let mut map = self.load_for_write()?;
        let value = f(map.get(&entry));
        map.insert(entry, value);
        self.persist(&map)
    }

    pub fn remove(&self, entry: &str) -> StoreResult<bool> {
        let mut map = self.load_for_write()?;
        let removed = map.remove(entry).is_some();
        if removed {
            self.persist(&map)?;
        }
        Ok(removed)
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(self.key)
    }
}

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Map entry key for a rated title, e.g. `movie_550`.
pub fn rating_key(media: MediaType, id: u64) -> String {
    format!("{}_{}", media, id)
}

/// Star ratings, 1 through 5, keyed by `"{media}_{id}"`
pub struct RatingMap {
    map: JsonMap<u8>,
}

impl RatingMap {
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            map: JsonMap::new(store, key),
        }
    }

    pub fn set(&self, media: MediaType, id: u64, rating: u8) -> StoreResult<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(StoreError::InvalidRating(rating));
        }
        self.map.set(rating_key(media, id), rating)
    }

    pub fn get(&self, media: MediaType, id: u64) -> Option<u8> {
        self.map.get(&rating_key(media, id))
    }

    pub fn remove(&self, media: MediaType, id: u64) -> StoreResult<bool> {
        self.map.remove(&rating_key(media, id))
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.map.clear()
    }

    /// Parsed entries; keys that don't follow `"{media}_{id}"` are skipped.
    pub fn entries(&self) -> Vec<(MediaType, u64, u8)> {
        self.map
            .read_all()
            .into_iter()
            .filter_map(|(key, rating)| {
                let (media, id) = key.split_once('_')?;
                Some((media.parse().ok()?, id.parse().ok()?, rating))
            })
            .collect()
    }

    pub fn count(&self) -> usize {
        self.map.read_all().len()
    }

    /// Mean rating, `None` when nothing is rated.
    pub fn average(&self) -> Option<f64> {
        let all = self.map.read_all();
        if all.is_empty() {
            return None;
        }
        let sum: u32 = all.values().map(|&r| u32::from(r)).sum();
        Some(f64::from(sum) / all.len() as f64)
    }
}

/// Per-episode watched flags keyed by `"{tv_id}_{season}_{episode}"`
pub struct WatchedEpisodes {
    map: JsonMap<bool>,
}

impl WatchedEpisodes {
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            map: JsonMap::new(store, key),
        }
    }

    fn entry(tv_id: u64, season: u32, episode: u32) -> String {
        format!("{}_{}_{}", tv_id, season, episode)
    }

    pub fn is_watched(&self, tv_id: u64, season: u32, episode: u32) -> bool {
        self.map
            .get(&Self::entry(tv_id, season, episode))
            .unwrap_or(false)
    }

    /// Flip the flag and return the new state.
    pub fn toggle(&self, tv_id: u64, season: u32, episode: u32) -> StoreResult<bool> {
        let mut now_watched = false;
        self.map
            .update(Self::entry(tv_id, season, episode), |current| {
                now_watched = !current.copied().unwrap_or(false);
                now_watched
            })?;
        Ok(now_watched)
    }

    /// Watched episode numbers in one season, ascending.
    pub fn watched_in_season(&self, tv_id: u64, season: u32) -> Vec<u32> {
        let prefix = format!("{}_{}_", tv_id, season);
        let mut episodes: Vec<u32> = self
            .map
            .read_all()
            .into_iter()
            .filter(|(_, watched)| *watched)
            .filter_map(|(key, _)| key.strip_prefix(&prefix)?.parse().ok())
            .collect();
        episodes.sort_unstable();
        episodes
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.map.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FlakyStore, MemoryStore};

    fn store() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::new())
    }

    #[test]
    fn test_rating_last_write_wins() {
        let ratings = RatingMap::new(store(), "r");
        ratings.set(MediaType::Movie, 550, 3).unwrap();
        ratings.set(MediaType::Movie, 550, 5).unwrap();

        assert_eq!(ratings.get(MediaType::Movie, 550), Some(5));
        assert_eq!(ratings.count(), 1);
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let ratings = RatingMap::new(store(), "r");

        assert!(matches!(
            ratings.set(MediaType::Tv, 1, 0),
            Err(StoreError::InvalidRating(0))
        ));
        assert!(matches!(
            ratings.set(MediaType::Tv, 1, 6),
            Err(StoreError::InvalidRating(6))
        ));
        assert_eq!(ratings.count(), 0);
    }

    #[test]
    fn test_rating_average_and_entries() {
        let ratings = RatingMap::new(store(), "r");
        assert!(ratings.average().is_none());

        ratings.set(MediaType::Movie, 1, 4).unwrap();
        ratings.set(MediaType::Tv, 2, 5).unwrap();

        assert_eq!(ratings.average(), Some(4.5));
        let mut entries = ratings.entries();
        entries.sort();
        assert_eq!(
            entries,
            vec![(MediaType::Movie, 1, 4), (MediaType::Tv, 2, 5)]
        );
    }

    #[test]
    fn test_rating_key_format() {
        assert_eq!(rating_key(MediaType::Tv, 1399), "tv_1399");
    }

    #[test]
    fn test_watched_toggle() {
        let watched = WatchedEpisodes::new(store(), "w");

        assert!(watched.toggle(1399, 1, 2).unwrap());
        assert!(watched.is_watched(1399, 1, 2));
        assert!(!watched.toggle(1399, 1, 2).unwrap());
        assert!(!watched.is_watched(1399, 1, 2));
    }

    #[test]
    fn test_watched_in_season() {
        let watched = WatchedEpisodes::new(store(), "w");
        watched.toggle(1399, 1, 3).unwrap();
        watched.toggle(1399, 1, 1).unwrap();
        watched.toggle(1399, 2, 1).unwrap();
        watched.toggle(1399, 1, 10).unwrap();
        watched.toggle(1399, 1, 10).unwrap();

        assert_eq!(watched.watched_in_season(1399, 1), vec![1, 3]);
        assert_eq!(watched.watched_in_season(1399, 2), vec![1]);
    }

    #[test]
    fn test_map_malformed_reads_empty() {
        let s = store();
        s.set("r", "[1,2]").unwrap();
        let ratings = RatingMap::new(s, "r");

        assert_eq!(ratings.count(), 0);
        ratings.set(MediaType::Movie, 9, 2).unwrap();
        assert_eq!(ratings.count(), 1);
    }

    #[test]
    fn test_backend_failure_keeps_ratings() {
        let flaky = Arc::new(FlakyStore::new());
        let ratings = RatingMap::new(flaky.clone(), "r");
        ratings.set(MediaType::Movie, 1, 4).unwrap();
        ratings.set(MediaType::Tv, 2, 5).unwrap();

        flaky.fail_next_reads(1);
        assert!(matches!(
            ratings.set(MediaType::Movie, 3, 1),
            Err(StoreError::Backend(_))
        ));
        flaky.fail_next_reads(1);
        assert!(ratings.remove(MediaType::Movie, 1).is_err());

        assert_eq!(ratings.count(), 2);
        assert_eq!(ratings.get(MediaType::Movie, 1), Some(4));
    }

    #[test]
    fn test_watched_toggle_fails_without_flipping() {
        let flaky = Arc::new(FlakyStore::new());
        let watched = WatchedEpisodes::new(flaky.clone(), "w");
        watched.toggle(1399, 1, 1).unwrap();

        flaky.fail_next_reads(1);
        assert!(watched.toggle(1399, 1, 1).is_err());

        assert!(watched.is_watched(1399, 1, 1));
    }
}
