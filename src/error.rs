//! Error types for MFLIX

use std::time::Duration;
use thiserror::Error;

/// Result type alias for MFLIX operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Metadata API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("TMDB rejected the API key. Run `mflix init` to configure a valid key.")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("TMDB request failed with status {status}")]
    Http { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Local persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Malformed stored value for '{key}': {reason}")]
    Parse { key: String, reason: String },

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Unknown setting '{0}'")]
    UnknownSetting(String),

    #[error("Invalid value for setting '{key}': {value}")]
    InvalidSetting { key: String, value: String },

    #[error("Could not determine a data directory")]
    NoDataDir,
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("TMDB API key not configured. Run `mflix init` or set MFLIX_API_KEY.")]
    MissingApiKey,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
