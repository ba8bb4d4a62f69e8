//! Cache inspection for long-running sessions
//!
//! The response cache lives in memory for one process. The interactive row
//! browser exposes these as menu actions over its own context's cache.

use crate::cli::OutputFormat;
use crate::cache::{CACHE_TTL, ResponseCache};
use crate::error::Result;

/// Show cache status/statistics
pub fn status(cache: &ResponseCache, format: OutputFormat) -> Result<()> {
    let stats = cache.stats();

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "total_entries": stats.total_entries,
                "valid_entries": stats.valid_entries,
                "expired_entries": stats.expired_entries,
                "hits": stats.hits,
                "misses": stats.misses,
                "ttl_seconds": CACHE_TTL.as_secs(),
                "oldest_entry_timestamp": stats.oldest_entry.map(|t| t.to_rfc3339()),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            println!("Cache Status");
            println!("────────────────────────────────────────");
            println!("Scope:          this process (in memory)");
            println!("TTL:            {}s", CACHE_TTL.as_secs());
            println!("Valid entries:  {}", stats.valid_entries);
            println!("Expired:        {}", stats.expired_entries);
            println!("Hits / misses:  {} / {}", stats.hits, stats.misses);

            if let Some(oldest) = stats.oldest_entry {
                let dt = oldest
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string();
                println!("Oldest entry:   {}", dt);
            }
        }
    }

    Ok(())
}

/// Clear all cache entries
pub fn clear(cache: &ResponseCache, format: OutputFormat) -> Result<()> {
    let removed = cache.clear();

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries_removed": removed,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            if removed > 0 {
                println!("Cleared {} cache entries", removed);
            } else {
                println!("Cache was already empty");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clear_empties_cache() {
        let cache = ResponseCache::new();
        cache.put("movie/popular?page=1", json!({"results": []}));

        clear(&cache, OutputFormat::Json).unwrap();

        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_clear_forces_next_fetch_through() {
        use crate::cache::CachedMetadataClient;
        use crate::client::mock::movie_page;
        use crate::client::{MetadataApi, MockMetadataApi, Query};
        use std::sync::Arc;

        let mock = MockMetadataApi::new(|_| Ok(movie_page(1, 3)));
        let calls = mock.call_counter();
        let cache = Arc::new(ResponseCache::new());
        let client = CachedMetadataClient::new(mock, cache.clone(), true);
        let query = Query::new("movie/popular").page(1);

        client.fetch(&query).await.unwrap();
        client.fetch(&query).await.unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.stats().valid_entries, 1);

        clear(&cache, OutputFormat::Pretty).unwrap();
        client.fetch(&query).await.unwrap();

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_status_on_empty_cache() {
        let cache = ResponseCache::new();
        assert!(status(&cache, OutputFormat::Pretty).is_ok());
    }
}
