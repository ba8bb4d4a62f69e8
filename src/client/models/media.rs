//! List-level media models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of title: feature film or television series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" | "movies" | "film" => Ok(MediaType::Movie),
            "tv" | "series" | "show" => Ok(MediaType::Tv),
            other => Err(format!("unknown media type '{}' (expected movie or tv)", other)),
        }
    }
}

/// A title as it appears in list responses (trending, discover, search).
///
/// TMDB omits or nulls many fields depending on the endpoint; only `id` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,

    /// Movie title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Series (or person) name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub poster_path: Option<String>,

    #[serde(default)]
    pub backdrop_path: Option<String>,

    #[serde(default)]
    pub vote_average: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,

    #[serde(default)]
    pub overview: Option<String>,

    #[serde(default)]
    pub genre_ids: Vec<u32>,

    /// `movie`, `tv` or `person` on multi-search and trending endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
}

impl Movie {
    /// Title for display: `title`, falling back to `name`.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }

    /// Release or first-air date, whichever is present.
    pub fn date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
            .filter(|d| !d.is_empty())
    }

    /// Four-digit year from [`Movie::date`].
    pub fn year(&self) -> Option<i32> {
        self.date()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }

    /// Media type from the response, or inferred from which title field is set.
    pub fn media(&self) -> Option<MediaType> {
        match self.media_type.as_deref() {
            Some("movie") => Some(MediaType::Movie),
            Some("tv") => Some(MediaType::Tv),
            Some(_) => None,
            None if self.title.is_some() => Some(MediaType::Movie),
            None if self.name.is_some() => Some(MediaType::Tv),
            None => None,
        }
    }

    pub fn has_genre(&self, genre_id: u32) -> bool {
        self.genre_ids.contains(&genre_id)
    }
}

/// Genre reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// `/genre/{type}/list` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_movie_tolerates_missing_fields() {
        let movie: Movie = serde_json::from_value(json!({"id": 7})).unwrap();

        assert_eq!(movie.id, 7);
        assert_eq!(movie.display_title(), "Untitled");
        assert!(movie.genre_ids.is_empty());
        assert!(movie.year().is_none());
    }

    #[test]
    fn test_movie_tolerates_nulls() {
        let movie: Movie = serde_json::from_value(json!({
            "id": 7,
            "poster_path": null,
            "overview": null,
            "vote_average": null
        }))
        .unwrap();

        assert!(movie.poster_path.is_none());
        assert!(movie.overview.is_none());
    }

    #[test]
    fn test_tv_entry_uses_name_and_air_date() {
        let show: Movie = serde_json::from_value(json!({
            "id": 1399,
            "name": "Game of Thrones",
            "first_air_date": "2011-04-17"
        }))
        .unwrap();

        assert_eq!(show.display_title(), "Game of Thrones");
        assert_eq!(show.year(), Some(2011));
        assert_eq!(show.media(), Some(MediaType::Tv));
    }

    #[test]
    fn test_explicit_media_type_wins() {
        let person: Movie =
            serde_json::from_value(json!({"id": 3, "name": "Someone", "media_type": "person"}))
                .unwrap();
        assert_eq!(person.media(), None);
    }

    #[test]
    fn test_media_type_parse() {
        assert_eq!("movie".parse::<MediaType>().unwrap(), MediaType::Movie);
        assert_eq!("TV".parse::<MediaType>().unwrap(), MediaType::Tv);
        assert!("person".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_media_type_serde_lowercase() {
        assert_eq!(serde_json::to_string(&MediaType::Tv).unwrap(), "\"tv\"");
    }
}
