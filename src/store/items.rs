//! Saved title entries (history, watchlist)

use serde::{Deserialize, Serialize};

use crate::client::models::{Details, MediaType, Movie};

/// A title the user has played or saved.
///
/// Field names match the durable JSON payload (`type` for the media type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: u64,

    #[serde(rename = "type")]
    pub media_type: MediaType,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,

    /// Epoch milliseconds of the last update
    #[serde(default)]
    pub timestamp: i64,
}

impl ListItem {
    pub fn new(id: u64, media_type: MediaType, title: impl Into<String>) -> Self {
        Self {
            id,
            media_type,
            title: title.into(),
            poster_path: None,
            season: None,
            episode: None,
            timestamp: now_millis(),
        }
    }

    pub fn with_poster(mut self, poster_path: Option<String>) -> Self {
        self.poster_path = poster_path;
        self
    }

    /// Series progress marker.
    pub fn at_episode(mut self, season: u32, episode: u32) -> Self {
        self.season = Some(season);
        self.episode = Some(episode);
        self
    }

    /// Uniqueness key within a list.
    pub fn identity(&self) -> (u64, MediaType) {
        (self.id, self.media_type)
    }

    pub fn from_movie(movie: &Movie, media_type: MediaType) -> Self {
        Self::new(movie.id, media_type, movie.display_title())
            .with_poster(movie.poster_path.clone())
    }

    pub fn from_details(details: &Details, media_type: MediaType) -> Self {
        Self::new(details.id, media_type, details.display_title())
            .with_poster(details.poster_path.clone())
    }
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
