//! Detail endpoint models (movie, series, season, person)

use serde::{Deserialize, Serialize};

use super::media::{Genre, Movie};
use crate::client::PagedResults;

/// Movie or series detail, including the appended sub-resources we request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Details {
    pub id: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub tagline: Option<String>,

    #[serde(default)]
    pub overview: Option<String>,

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

    /// Minutes (movies only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,

    /// Series only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_seasons: Option<u32>,

    #[serde(default)]
    pub genres: Vec<Genre>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub original_language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<Credits>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<VideoList>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar: Option<PagedResults<Movie>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<PagedResults<Movie>>,
}

impl Details {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }

    pub fn year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }

    /// First YouTube trailer, if the videos sub-resource was appended.
    pub fn trailer(&self) -> Option<&Video> {
        self.videos.as_ref().and_then(|v| {
            v.results
                .iter()
                .find(|video| video.site == "YouTube" && video.kind == "Trailer")
        })
    }
}

/// `credits` sub-resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
}

/// `videos` sub-resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Video {
    pub fn url(&self) -> Option<String> {
        (self.site == "YouTube").then(|| format!("https://www.youtube.com/watch?v={}", self.key))
    }
}

/// `/tv/{id}/season/{n}` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    #[serde(default)]
    pub season_number: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub episode_number: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl Episode {
    /// Aired when the air date is unknown or not after `today` (YYYY-MM-DD).
    pub fn is_aired(&self, today: &str) -> bool {
        match self.air_date.as_deref() {
            None | Some("") => true,
            Some(date) => date <= today,
        }
    }
}

/// `/person/{id}` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_credits: Option<PersonCredits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tv_credits: Option<PersonCredits>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonCredits {
    #[serde(default)]
    pub cast: Vec<Movie>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_details_with_appended_resources() {
        let details: Details = serde_json::from_value(json!({
            "id": 550,
            "title": "Fight Club",
            "release_date": "1999-10-15",
            "runtime": 139,
            "genres": [{"id": 18, "name": "Drama"}],
            "credits": {"cast": [{"id": 819, "name": "Edward Norton", "character": "Narrator"}]},
            "videos": {"results": [
                {"key": "abc", "site": "Vimeo", "type": "Trailer", "name": "x"},
                {"key": "SUXWAEX2jlg", "site": "YouTube", "type": "Trailer", "name": "Trailer"}
            ]},
            "similar": {"page": 1, "results": [{"id": 1}], "total_pages": 1}
        }))
        .unwrap();

        assert_eq!(details.display_title(), "Fight Club");
        assert_eq!(details.year(), Some(1999));
        assert_eq!(details.credits.as_ref().unwrap().cast[0].name, "Edward Norton");
        assert_eq!(
            details.trailer().and_then(|t| t.url()).as_deref(),
            Some("https://www.youtube.com/watch?v=SUXWAEX2jlg")
        );
        assert_eq!(details.similar.as_ref().unwrap().results.len(), 1);
    }

    #[test]
    fn test_episode_aired() {
        let ep = Episode {
            episode_number: 1,
            name: None,
            air_date: Some("2024-01-10".to_string()),
            runtime: None,
            overview: None,
        };

        assert!(ep.is_aired("2024-01-10"));
        assert!(!ep.is_aired("2024-01-09"));
    }
}
