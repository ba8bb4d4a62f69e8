//! TMDB API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;

use super::{API_KEY_PARAM, MetadataApi, Query};
use crate::config::DEFAULT_API_HOST;
use crate::error::{ApiError, Result};

/// API version path appended to the host
const API_VERSION_PATH: &str = "/3";

/// Stay well under TMDB's ~40 requests/second allowance
const RATE_LIMIT_PER_SECOND: NonZeroU32 = NonZeroU32::new(20).unwrap();

/// TMDB API client
pub struct TmdbClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
    language: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    /// Create a client against the public TMDB host
    pub fn new(api_key: impl Into<String>, language: impl Into<String>) -> Result<Self> {
        Self::with_host(api_key, language, None)
    }

    /// Create a client against a custom host (tests, proxies)
    pub fn with_host(
        api_key: impl Into<String>,
        language: impl Into<String>,
        api_host: Option<&str>,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let host = api_host.unwrap_or(DEFAULT_API_HOST).trim_end_matches('/');
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            RATE_LIMIT_PER_SECOND,
        )));

        Ok(Self {
            http,
            base_url: format!("{}{}", host, API_VERSION_PATH),
            api_key: api_key.into(),
            language: language.into(),
            rate_limiter,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MetadataApi for TmdbClient {
    fn resolve(&self, query: &Query) -> Query {
        query.with_defaults(&[
            (API_KEY_PARAM, self.api_key.as_str()),
            ("language", self.language.as_str()),
        ])
    }

    async fn fetch(&self, query: &Query) -> Result<Value> {
        self.rate_limiter.until_ready().await;

        let resolved = self.resolve(query);
        let url = format!("{}{}", self.base_url, resolved.endpoint());
        log::debug!("GET {}", resolved.cache_key());

        let response = self
            .http
            .get(&url)
            .query(resolved.params())
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            s if s.is_success() => {
                let data = response.json::<Value>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(data)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(query.endpoint().to_string()).into()),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(10);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            _ => {
                log::warn!("{} returned {}", query.endpoint(), status);
                Err(ApiError::Http {
                    status: status.as_u16(),
                }
                .into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use mockito::Matcher;

    #[test]
    fn test_client_creation() {
        let client = TmdbClient::new("test_key", "en-US").unwrap();
        assert_eq!(client.base_url(), "https://api.themoviedb.org/3");
    }

    #[test]
    fn test_resolve_merges_defaults() {
        let client = TmdbClient::new("k", "en-US").unwrap();
        let resolved = client.resolve(&Query::new("/movie/popular").page(2));

        assert_eq!(resolved.get("api_key"), Some("k"));
        assert_eq!(resolved.get("language"), Some("en-US"));
        assert_eq!(resolved.get("page"), Some("2"));
    }

    #[tokio::test]
    async fn test_fetch_sends_defaults_and_decodes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/3/movie/popular")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("api_key".into(), "k".into()),
                Matcher::UrlEncoded("language".into(), "en-US".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"page":1,"results":[{"id":1,"title":"A"}],"total_pages":3}"#)
            .create_async()
            .await;

        let client = TmdbClient::with_host("k", "en-US", Some(&server.url())).unwrap();
        let value = client
            .fetch(&Query::new("/movie/popular").page(1))
            .await
            .unwrap();

        assert_eq!(value["results"][0]["title"], "A");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_maps_server_error_to_http_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/3/movie/upcoming")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = TmdbClient::with_host("k", "en-US", Some(&server.url())).unwrap();
        let err = client
            .fetch(&Query::new("/movie/upcoming"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Http { status: 503 })));
    }

    #[tokio::test]
    async fn test_fetch_maps_404_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/3/movie/999999999")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"status_code":34,"status_message":"not found"}"#)
            .create_async()
            .await;

        let client = TmdbClient::with_host("k", "en-US", Some(&server.url())).unwrap();
        let err = client
            .fetch(&Query::new("/movie/999999999"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_maps_401_to_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/3/trending/all/week")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let client = TmdbClient::with_host("bad", "en-US", Some(&server.url())).unwrap();
        let err = client
            .fetch(&Query::new("/trending/all/week"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::Unauthorized)));
    }
}
