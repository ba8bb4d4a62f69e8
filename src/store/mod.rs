//! Local persistence: history, watchlist, ratings, search history and settings
//!
//! Everything is a JSON document under a fixed key in a [`KeyValueStore`].
//! Writes are immediate read-modify-write cycles; concurrent writers from
//! separate processes race and the last write wins.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

mod backend;
pub mod items;
pub mod list;
pub mod map;
pub mod settings;

#[cfg(test)]
pub use backend::FlakyStore;
pub use backend::{KeyValueStore, MemoryStore, SqliteStore, StoreResult};
pub use items::ListItem;
pub use list::BoundedList;
pub use map::{JsonMap, RatingMap, WatchedEpisodes, rating_key};
pub use settings::{Settings, SettingsStore};

use crate::client::models::MediaType;

pub const HISTORY_KEY: &str = "mflix_history";
pub const WATCHLIST_KEY: &str = "mflix_watchlist";
pub const RATINGS_KEY: &str = "mflix_ratings";
pub const SEARCH_HISTORY_KEY: &str = "mflix_search_history";
pub const SETTINGS_KEY: &str = "mflix_settings";
pub const WATCHED_KEY: &str = "mflix_watched";

pub const HISTORY_LIMIT: usize = 50;
pub const SEARCH_HISTORY_LIMIT: usize = 10;

/// Summary shown on the profile page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileStats {
    pub watchlist_count: usize,
    pub history_count: usize,
    pub ratings_count: usize,
    /// One decimal place; `None` when nothing is rated
    pub average_rating: Option<f64>,
}

/// All user data over one shared store
pub struct Library {
    pub history: BoundedList<ListItem, (u64, MediaType)>,
    pub watchlist: BoundedList<ListItem, (u64, MediaType)>,
    pub search_history: BoundedList<String, String>,
    pub ratings: RatingMap,
    pub watched: WatchedEpisodes,
    pub settings: SettingsStore,
}

impl Library {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            history: BoundedList::new(store.clone(), HISTORY_KEY, ListItem::identity)
                .with_max_len(HISTORY_LIMIT),
            watchlist: BoundedList::new(store.clone(), WATCHLIST_KEY, ListItem::identity),
            search_history: BoundedList::new(store.clone(), SEARCH_HISTORY_KEY, String::clone)
                .with_max_len(SEARCH_HISTORY_LIMIT),
            ratings: RatingMap::new(store.clone(), RATINGS_KEY),
            watched: WatchedEpisodes::new(store.clone(), WATCHED_KEY),
            settings: SettingsStore::new(store, SETTINGS_KEY),
        }
    }

    /// Open the SQLite-backed library in `data_dir`, or the default data location.
    pub fn open(data_dir: Option<&Path>) -> StoreResult<Self> {
        let store = match data_dir {
            Some(dir) => SqliteStore::open_at(dir)?,
            None => SqliteStore::open()?,
        };
        log::debug!("Opened library at {}", store.path().display());
        Ok(Self::new(Arc::new(store)))
    }

    /// Record a play: upsert into history with the current timestamp.
    pub fn record_play(&self, mut item: ListItem) -> StoreResult<()> {
        item.timestamp = items::now_millis();
        self.history.upsert_front(item)?;
        Ok(())
    }

    /// Add to or remove from the watchlist. Returns whether the title is now saved.
    pub fn toggle_watchlist(&self, item: ListItem) -> StoreResult<bool> {
        let id = item.identity();
        if self.watchlist.contains(&id) {
            self.watchlist.remove(&id)?;
            Ok(false)
        } else {
            self.watchlist.upsert_front(item)?;
            Ok(true)
        }
    }

    pub fn in_watchlist(&self, media: MediaType, id: u64) -> bool {
        self.watchlist.contains(&(id, media))
    }

    pub fn rate(&self, media: MediaType, id: u64, rating: u8) -> StoreResult<()> {
        self.ratings.set(media, id, rating)
    }

    /// Remember a search term. Blank terms are ignored.
    pub fn record_search(&self, query: &str) -> StoreResult<()> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }
        self.search_history.upsert_front(query.to_string())?;
        Ok(())
    }

    pub fn profile_stats(&self) -> ProfileStats {
        ProfileStats {
            watchlist_count: self.watchlist.len(),
            history_count: self.history.len(),
            ratings_count: self.ratings.count(),
            average_rating: self.ratings.average().map(|avg| (avg * 10.0).round() / 10.0),
        }
    }
}
