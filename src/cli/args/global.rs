//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global flags, resolved once in `main` and passed to every handler.
///
/// Precedence is CLI flag > environment variable > config file > default. This
/// struct holds the flag/env layer; the config file is merged in `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.mflix/config.yaml)
    pub config: Option<String>,

    /// TMDB API key override
    pub api_key: Option<String>,

    /// Custom API host for development/testing
    pub api_host: Option<String>,

    /// Library database directory override
    pub data_dir: Option<String>,

    /// Bypass the response cache
    pub no_cache: bool,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_key: cli.api_key.clone(),
            api_host: cli.api_host.clone(),
            data_dir: cli.data_dir.clone(),
            no_cache: cli.no_cache,
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn api_key_ref(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }

    pub fn data_dir_ref(&self) -> Option<&str> {
        self.data_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli_reads_global_flags() {
        let cli = Cli::try_parse_from([
            "mflix",
            "--format",
            "json",
            "--config",
            "/custom/config.yaml",
            "--api-host",
            "http://localhost:8080",
            "--data-dir",
            "/tmp/mflix",
            "--no-cache",
            "profile",
        ])
        .unwrap();

        let opts = GlobalOptions::from_cli(&cli);

        assert_eq!(opts.format, OutputFormat::Json);
        assert_eq!(opts.config_ref(), Some("/custom/config.yaml"));
        assert_eq!(opts.api_host_ref(), Some("http://localhost:8080"));
        assert_eq!(opts.data_dir_ref(), Some("/tmp/mflix"));
        assert!(opts.no_cache);
    }

    #[test]
    fn test_none_accessors() {
        let opts = GlobalOptions {
            format: OutputFormat::Pretty,
            config: None,
            api_key: None,
            api_host: None,
            data_dir: None,
            no_cache: false,
        };

        assert_eq!(opts.config_ref(), None);
        assert_eq!(opts.api_key_ref(), None);
        assert_eq!(opts.api_host_ref(), None);
        assert_eq!(opts.data_dir_ref(), None);
        assert!(!opts.no_cache);
    }
}
