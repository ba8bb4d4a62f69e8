//! JSON output formatting
//!
//! Every document is `{ data, meta }`. Output built from TMDB responses also carries
//! the attribution TMDB asks API consumers to show.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    /// The actual data
    pub data: T,

    /// Metadata about the response
    pub meta: Metadata,
}

pub const TMDB_ATTRIBUTION: &str =
    "This product uses the TMDB API but is not endorsed or certified by TMDB.";

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// Data provider credit; absent for purely local data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

impl<T> JsonOutput<T> {
    /// Create a new JSON output with metadata
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                attribution: None,
            },
        }
    }

    /// Wrap data that came from the TMDB catalog.
    pub fn from_catalog(data: T) -> Self {
        let mut output = Self::new(data);
        output.meta.attribution = Some(TMDB_ATTRIBUTION.to_string());
        output
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    let output = JsonOutput::new(data);
    serde_json::to_string_pretty(&output)
}

/// Format catalog data as pretty-printed JSON, with TMDB attribution
pub fn format_catalog_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::from_catalog(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ProfileStats;

    #[test]
    fn test_json_output_new() {
        let output = JsonOutput::new(vec!["dark", "lost"]);

        assert_eq!(output.data, vec!["dark", "lost"]);
        assert_eq!(output.meta.version, env!("CARGO_PKG_VERSION"));
        assert!(!output.meta.timestamp.is_empty());
        assert!(output.meta.attribution.is_none());
    }

    #[test]
    fn test_library_output_has_no_attribution() {
        let stats = ProfileStats {
            watchlist_count: 2,
            history_count: 3,
            ratings_count: 2,
            average_rating: Some(4.5),
        };

        let parsed: serde_json::Value =
            serde_json::from_str(&format_json(&stats).unwrap()).unwrap();

        assert_eq!(parsed["data"]["history_count"], 3);
        assert_eq!(parsed["data"]["average_rating"], 4.5);
        assert!(parsed["meta"].get("attribution").is_none());
    }

    #[test]
    fn test_catalog_output_credits_tmdb() {
        let page = serde_json::json!({"page": 1, "results": [{"id": 550, "title": "Fight Club"}]});

        let parsed: serde_json::Value =
            serde_json::from_str(&format_catalog_json(&page).unwrap()).unwrap();

        assert_eq!(parsed["data"]["results"][0]["id"], 550);
        assert_eq!(parsed["meta"]["attribution"], TMDB_ATTRIBUTION);
        assert_eq!(parsed["meta"]["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_envelope_reads_back_without_attribution() {
        let raw = r#"{"data": [], "meta": {"timestamp": "t", "version": "v"}}"#;

        let output: JsonOutput<Vec<u64>> = serde_json::from_str(raw).unwrap();

        assert!(output.data.is_empty());
        assert!(output.meta.attribution.is_none());
    }
}
