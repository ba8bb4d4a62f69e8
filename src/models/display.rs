//! Display model implementations for table and JSON output

use chrono::{DateTime, Local};
use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{CastMember, Episode, MediaType, Movie};
use crate::client::presets::language_label;
use crate::store::ListItem;

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Epoch milliseconds as local `YYYY-MM-DD HH:MM`
pub fn format_timestamp_local(millis: i64) -> String {
    if millis <= 0 {
        return "N/A".to_string();
    }
    DateTime::from_timestamp_millis(millis)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "N/A".to_string())
}

/// Filled and empty stars, e.g. `★★★☆☆`
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// List entry (row item, search hit) for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MovieDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "TYPE")]
    #[serde(rename = "type")]
    pub media_type: String,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "YEAR")]
    pub year: String,

    #[tabled(rename = "RATING")]
    pub rating: String,

    #[tabled(rename = "LANG")]
    pub language: String,
}

impl MovieDisplay {
    /// Use `fallback` when the entry doesn't say whether it is a movie or a series.
    pub fn with_media(movie: &Movie, fallback: Option<MediaType>) -> Self {
        let media_type = match movie.media_type.as_deref() {
            Some(kind) => kind.to_string(),
            None => movie
                .media()
                .or(fallback)
                .map(|m| m.to_string())
                .unwrap_or_else(|| "-".to_string()),
        };
        Self {
            id: movie.id,
            media_type,
            title: truncate_string(movie.display_title(), 48),
            year: movie
                .year()
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string()),
            rating: movie
                .vote_average
                .filter(|v| *v > 0.0)
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| "-".to_string()),
            language: movie
                .original_language
                .as_deref()
                .map(language_label)
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

impl From<&Movie> for MovieDisplay {
    fn from(movie: &Movie) -> Self {
        Self::with_media(movie, None)
    }
}

/// History or watchlist entry.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ListItemDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "TYPE")]
    #[serde(rename = "type")]
    pub media_type: MediaType,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "PROGRESS")]
    pub progress: String,

    #[tabled(rename = "UPDATED")]
    pub updated: String,
}

impl From<&ListItem> for ListItemDisplay {
    fn from(item: &ListItem) -> Self {
        let progress = match (item.season, item.episode) {
            (Some(s), Some(e)) => format!("S{}E{}", s, e),
            _ => "-".to_string(),
        };
        Self {
            id: item.id,
            media_type: item.media_type,
            title: truncate_string(&item.title, 48),
            progress,
            updated: format_timestamp_local(item.timestamp),
        }
    }
}

/// Rated title.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RatingDisplay {
    #[tabled(rename = "TYPE")]
    #[serde(rename = "type")]
    pub media_type: MediaType,

    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "RATING")]
    #[serde(skip)]
    pub stars: String,

    #[tabled(skip)]
    pub rating: u8,
}

impl From<(MediaType, u64, u8)> for RatingDisplay {
    fn from((media_type, id, rating): (MediaType, u64, u8)) -> Self {
        Self {
            media_type,
            id,
            stars: stars(rating),
            rating,
        }
    }
}

/// Recent search term.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SearchTermDisplay {
    #[tabled(rename = "#")]
    pub position: usize,

    #[tabled(rename = "QUERY")]
    pub query: String,
}

/// Episode row in a season listing.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct EpisodeDisplay {
    #[tabled(rename = "EP")]
    pub episode: u32,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "AIR DATE")]
    pub air_date: String,

    #[tabled(rename = "RUNTIME")]
    pub runtime: String,

    #[tabled(rename = "WATCHED")]
    pub watched: bool,
}

impl EpisodeDisplay {
    pub fn new(episode: &Episode, watched: bool) -> Self {
        Self {
            episode: episode.episode_number,
            title: truncate_string(episode.name.as_deref().unwrap_or("-"), 48),
            air_date: episode
                .air_date
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "TBA".to_string()),
            runtime: episode
                .runtime
                .map(|m| format!("{}m", m))
                .unwrap_or_else(|| "-".to_string()),
            watched,
        }
    }
}

/// Cast member.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CastDisplay {
    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "CHARACTER")]
    pub character: String,
}

impl From<&CastMember> for CastDisplay {
    fn from(member: &CastMember) -> Self {
        Self {
            name: member.name.clone(),
            character: member.character.clone().unwrap_or_default(),
        }
    }
}

/// Setting name and current value.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SettingDisplay {
    #[tabled(rename = "SETTING")]
    pub name: String,

    #[tabled(rename = "VALUE")]
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_movie_display_from_movie() {
        let movie: Movie = serde_json::from_value(json!({
            "id": 550,
            "title": "Fight Club",
            "release_date": "1999-10-15",
            "vote_average": 8.433,
            "original_language": "en"
        }))
        .unwrap();

        let display = MovieDisplay::from(&movie);

        assert_eq!(display.id, 550);
        assert_eq!(display.media_type, "movie");
        assert_eq!(display.year, "1999");
        assert_eq!(display.rating, "8.4");
        assert_eq!(display.language, "ENGLISH");
    }

    #[test]
    fn test_movie_display_uses_fallback_media() {
        let movie: Movie = serde_json::from_value(json!({"id": 1})).unwrap();

        let display = MovieDisplay::with_media(&movie, Some(MediaType::Tv));

        assert_eq!(display.media_type, "tv");
        assert_eq!(display.rating, "-");
        assert_eq!(display.year, "-");
    }

    #[test]
    fn test_list_item_display_progress() {
        let item = ListItem::new(1399, MediaType::Tv, "Game of Thrones").at_episode(2, 5);

        let display = ListItemDisplay::from(&item);

        assert_eq!(display.progress, "S2E5");
        assert_ne!(display.updated, "N/A");
    }

    #[test]
    fn test_rating_display_stars() {
        let display = RatingDisplay::from((MediaType::Movie, 550, 3));
        assert_eq!(display.stars, "★★★☆☆");
        assert_eq!(display.rating, 3);
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a very long title", 10), "a very ...");
    }

    #[test]
    fn test_format_timestamp_zero() {
        assert_eq!(format_timestamp_local(0), "N/A");
    }
}
