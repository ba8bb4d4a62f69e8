//! Configuration management for MFLIX

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Default TMDB API base URL
pub const DEFAULT_API_HOST: &str = "https://api.themoviedb.org";

/// Default response language
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// TMDB API key (v3)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Language sent with every metadata request
    #[serde(default = "default_language")]
    pub language: String,

    /// Custom API host (scheme + host, no path)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Directory holding the durable library database
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            language: default_language(),
            api_host: None,
            data_dir: None,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".mflix").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional path.
    ///
    /// A missing file is not an error: defaults are returned so that read-only
    /// commands (library, settings) work before `mflix init` has been run.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(&Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an optional path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(&Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // The file holds an API key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Apply CLI/env overrides on top of file values.
    pub fn apply_overrides(
        &mut self,
        api_key: Option<&str>,
        api_host: Option<&str>,
        data_dir: Option<&str>,
    ) {
        if let Some(key) = api_key {
            self.api_key = Some(key.to_string());
        }
        if let Some(host) = api_host {
            self.api_host = Some(host.to_string());
        }
        if let Some(dir) = data_dir {
            self.data_dir = Some(PathBuf::from(dir));
        }
    }

    /// The API key, or an error pointing at `mflix init`
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey.into())
    }

    /// Effective API host
    pub fn api_host(&self) -> &str {
        self.api_host.as_deref().unwrap_or(DEFAULT_API_HOST)
    }
}
