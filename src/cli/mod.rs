//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod browse;
pub mod cache;
pub mod context;
pub mod init;
pub mod library;
pub mod search;
pub mod settings;
pub mod status;
pub mod title;

pub use args::{OutputFormat, SearchKindArg};
pub use context::CommandContext;

use crate::client::models::MediaType;

/// MFLIX - browse TMDB from the terminal, with a local watchlist, history and ratings
#[derive(Parser, Debug)]
#[command(name = "mflix")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "MFLIX_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "MFLIX_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// TMDB API key (overrides the config file)
    #[arg(long, global = true, env = "MFLIX_API_KEY", hide_env = true, hide = true)]
    pub api_key: Option<String>,

    /// Custom TMDB API host
    #[arg(long, global = true, env = "MFLIX_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Directory for the library database
    #[arg(long, global = true, env = "MFLIX_DATA_DIR", hide_env = true)]
    pub data_dir: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "MFLIX_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass the response cache
    #[arg(long, global = true, env = "MFLIX_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize MFLIX configuration
    Init,

    /// Show configuration and library status
    Status,

    /// Load the home screen rows
    Home {
        /// Entries shown per row
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Browse one row, page by page
    #[command(after_help = "ROWS:\n  \
            trending, trending-today, popular-movie, popular-tv, top-rated-movie,\n  \
            top-rated-tv, now-playing, upcoming, airing-today, genre:<movie|tv>:<ids>,\n  \
            mood:<trending|action|horror|romance|comedy|scifi>, or a preset\n  \
            (bollywood, anime, korean-dramas, netflix, hbo, ...)\n\n\
            EXAMPLES:\n  \
            mflix browse trending --pages 3\n  \
            mflix browse genre:movie:28,12\n  \
            mflix browse netflix --interactive")]
    Browse {
        /// Row to load
        row: String,

        /// Pages to load up front (max 10)
        #[arg(long, short = 'p', default_value = "1")]
        pages: u32,

        /// Step through the row interactively
        #[arg(long, short = 'i')]
        interactive: bool,
    },

    /// List the available rows and presets
    Rows,

    /// Search movies, series and people
    #[command(visible_alias = "s")]
    Search {
        /// Search text
        query: String,

        /// Search tab
        #[arg(long, short = 'k', value_enum, default_value = "multi")]
        kind: SearchKindArg,

        /// Keep only this original language (ISO 639-1)
        #[arg(long)]
        lang: Option<String>,

        /// Keep only entries rated at least this much
        #[arg(long)]
        min_rating: Option<f64>,

        /// Keep only entries from this year
        #[arg(long)]
        year: Option<i32>,

        /// Result page
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Discover titles by one filter: genre, language, year or minimum rating
    #[command(group(
        clap::ArgGroup::new("filter")
            .required(true)
            .args(["genre", "lang", "year", "min_rating"])
    ))]
    Discover {
        /// movie or tv
        media: MediaType,

        /// Comma-separated genre ids
        #[arg(long)]
        genre: Option<String>,

        /// Original language (ISO 639-1)
        #[arg(long)]
        lang: Option<String>,

        /// Release or first-air year
        #[arg(long)]
        year: Option<i32>,

        /// Minimum vote average
        #[arg(long)]
        min_rating: Option<f64>,

        /// Result page
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Show details for a movie or series
    Show {
        /// movie or tv
        media: MediaType,
        /// TMDB id
        id: u64,
    },

    /// List a season's episodes
    Season {
        /// Series TMDB id
        tv_id: u64,
        /// Season number
        season: u32,
    },

    /// Show details for a person
    Person {
        /// TMDB person id
        id: u64,
    },

    /// Print the player URL and record the play in history
    Play {
        /// movie or tv
        media: MediaType,
        /// TMDB id
        id: u64,
        /// Season (series only)
        #[arg(long, short = 's', default_value = "1")]
        season: u32,
        /// Episode (series only)
        #[arg(long, short = 'e', default_value = "1")]
        episode: u32,
        /// Server number (1-3); defaults to the configured server
        #[arg(long)]
        server: Option<usize>,
    },

    /// Manage the watchlist
    #[command(subcommand)]
    Watchlist(WatchlistCommands),

    /// Manage watch history
    #[command(subcommand)]
    History(HistoryCommands),

    /// Manage ratings
    #[command(subcommand)]
    Ratings(RatingsCommands),

    /// Manage recent searches
    #[command(subcommand)]
    SearchHistory(SearchHistoryCommands),

    /// Track watched episodes
    #[command(subcommand)]
    Watched(WatchedCommands),

    /// Show library statistics
    Profile,

    /// View and change preferences
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   mflix completion bash > /etc/bash_completion.d/mflix
  zsh:    mflix completion zsh > \"${fpath[1]}/_mflix\"
  fish:   mflix completion fish > ~/.config/fish/completions/mflix.fish")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Watchlist subcommands
#[derive(Subcommand, Debug)]
pub enum WatchlistCommands {
    /// List saved titles
    #[command(visible_alias = "ls")]
    List,
    /// Save a title (looks up its name on TMDB unless --title is given)
    Add {
        media: MediaType,
        id: u64,
        #[arg(long)]
        title: Option<String>,
    },
    /// Remove a saved title
    #[command(visible_alias = "rm")]
    Remove { media: MediaType, id: u64 },
    /// Remove every saved title
    Clear,
}

/// History subcommands
#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List recently played titles
    #[command(visible_alias = "ls")]
    List,
    /// Forget all history
    Clear,
}

/// Ratings subcommands
#[derive(Subcommand, Debug)]
pub enum RatingsCommands {
    /// List rated titles
    #[command(visible_alias = "ls")]
    List,
    /// Rate a title from 1 to 5
    Set {
        media: MediaType,
        id: u64,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
    },
    /// Remove one rating
    #[command(visible_alias = "rm")]
    Remove { media: MediaType, id: u64 },
    /// Remove every rating
    Clear,
}

/// Search history subcommands
#[derive(Subcommand, Debug)]
pub enum SearchHistoryCommands {
    /// List recent searches
    #[command(visible_alias = "ls")]
    List,
    /// Forget one search term
    #[command(visible_alias = "rm")]
    Remove { query: String },
    /// Forget every search term
    Clear,
}

/// Watched episode subcommands
#[derive(Subcommand, Debug)]
pub enum WatchedCommands {
    /// Flip the watched flag on an episode
    Toggle {
        tv_id: u64,
        season: u32,
        episode: u32,
    },
    /// Watched episodes in a season
    #[command(visible_alias = "ls")]
    List { tv_id: u64, season: u32 },
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show all settings
    Show,
    /// Change one setting
    #[command(after_help = "SETTINGS:\n  \
            quality                   Auto, 4K, 1080p, 720p, 480p\n  \
            default-server            1, 2, 3\n  \
            autoplay-next-episode     true, false\n  \
            skip-intro                0, 30, 60, 90\n  \
            preferred-languages       comma list of hi, en, ta, te, ko, ja, ur\n  \
            content-region            India, Pakistan, Global, All\n  \
            show-adult-content        true, false\n  \
            disable-trailer-on-hover  true, false\n  \
            poster-size               Normal, Compact, Large")]
    Set { name: String, value: String },
    /// Restore defaults
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_play_defaults() {
        let cli = Cli::try_parse_from(["mflix", "play", "tv", "1399"]).unwrap();
        match cli.command {
            Commands::Play {
                media,
                id,
                season,
                episode,
                server,
            } => {
                assert_eq!(media, MediaType::Tv);
                assert_eq!(id, 1399);
                assert_eq!((season, episode), (1, 1));
                assert!(server.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rating_range_enforced() {
        assert!(Cli::try_parse_from(["mflix", "ratings", "set", "movie", "550", "6"]).is_err());
        assert!(Cli::try_parse_from(["mflix", "ratings", "set", "movie", "550", "5"]).is_ok());
    }

    #[test]
    fn test_discover_takes_exactly_one_filter() {
        assert!(Cli::try_parse_from(["mflix", "discover", "movie"]).is_err());
        assert!(
            Cli::try_parse_from(["mflix", "discover", "tv", "--lang", "ko", "--year", "2020"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["mflix", "discover", "tv", "--lang", "ko"]).is_ok());
    }

    #[test]
    fn test_no_standalone_cache_command() {
        assert!(Cli::try_parse_from(["mflix", "cache", "status"]).is_err());
    }

    #[test]
    fn test_search_history_command_name() {
        let cli = Cli::try_parse_from(["mflix", "search-history", "clear"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::SearchHistory(SearchHistoryCommands::Clear)
        ));
    }
}
