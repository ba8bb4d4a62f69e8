//! Command execution context
//!
//! Loads configuration once, then builds the cached metadata client and opens
//! the library for the handlers that need them.

use std::sync::Arc;

use crate::cache::{CachedMetadataClient, ResponseCache};
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{Catalog, TmdbClient};
use crate::config::Config;
use crate::error::Result;
use crate::store::Library;

/// The metadata client every command uses
pub type Client = CachedMetadataClient<TmdbClient>;

/// Shared state for a command run.
///
/// The response cache lives for the process and is shared by every catalog
/// call the command makes.
pub struct CommandContext {
    pub config: Config,
    pub cache: Arc<ResponseCache>,
    pub catalog: Catalog<Client>,
    pub library: Library,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Full context for commands that talk to TMDB.
    ///
    /// # Errors
    /// Fails when no API key is configured or the library cannot be opened.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = load_config(opts)?;
        let api_key = config.require_api_key()?.to_string();

        let raw_client = TmdbClient::with_host(
            api_key,
            config.language.clone(),
            config.api_host.as_deref(),
        )?;

        let cache = Arc::new(ResponseCache::new());
        let client = Arc::new(CachedMetadataClient::new(
            raw_client,
            cache.clone(),
            !opts.no_cache,
        ));
        let library = Library::open(config.data_dir.as_deref())?;

        Ok(Self {
            config,
            cache,
            catalog: Catalog::new(client),
            library,
            format: opts.format,
        })
    }
}

/// Config file merged with flag/env overrides
pub fn load_config(opts: &GlobalOptions) -> Result<Config> {
    let mut config = Config::load_at(opts.config_ref())?;
    config.apply_overrides(opts.api_key_ref(), opts.api_host_ref(), opts.data_dir_ref());
    Ok(config)
}

/// Open the library alone, for commands that never reach the network.
pub fn open_library(opts: &GlobalOptions) -> Result<Library> {
    let config = load_config(opts)?;
    Ok(Library::open(config.data_dir.as_deref())?)
}
