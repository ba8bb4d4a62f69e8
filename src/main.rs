//! MFLIX CLI - browse the TMDB catalog from the terminal

use clap::{CommandFactory, Parser};

mod cache;
mod cli;
mod client;
mod config;
mod embed;
mod error;
mod models;
mod output;
mod row;
mod store;

use cli::args::GlobalOptions;
use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warnings, or debug with `--debug`.
fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    log::debug!("Debug mode enabled");

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Home { limit } => cli::browse::home(&opts, limit).await,
        Commands::Browse {
            row,
            pages,
            interactive,
        } => cli::browse::browse(&opts, &row, pages, interactive).await,
        Commands::Rows => cli::browse::rows(&opts),
        Commands::Search {
            query,
            kind,
            lang,
            min_rating,
            year,
            page,
        } => {
            let args = cli::search::SearchArgs {
                query,
                kind,
                filter: client::catalog::SearchFilter {
                    language: lang,
                    min_rating,
                    year,
                },
                page,
            };
            cli::search::run(&opts, args).await
        }
        Commands::Discover {
            media,
            genre,
            lang,
            year,
            min_rating,
            page,
        } => match cli::search::DiscoverBy::from_flags(genre, lang, year, min_rating) {
            Some(by) => cli::search::discover(&opts, media, by, page).await,
            None => Err(error::Error::Other(
                "discover needs one of --genre, --lang, --year or --min-rating".to_string(),
            )),
        },
        Commands::Show { media, id } => cli::title::show(&opts, media, id).await,
        Commands::Season { tv_id, season } => cli::title::season(&opts, tv_id, season).await,
        Commands::Person { id } => cli::title::person(&opts, id).await,
        Commands::Play {
            media,
            id,
            season,
            episode,
            server,
        } => {
            let target = cli::title::PlayTarget {
                media,
                id,
                season,
                episode,
                server,
            };
            cli::title::play(&opts, target).await
        }
        Commands::Watchlist(cmd) => cli::library::watchlist(&opts, cmd).await,
        Commands::History(cmd) => cli::library::history(&opts, cmd),
        Commands::Ratings(cmd) => cli::library::ratings(&opts, cmd),
        Commands::SearchHistory(cmd) => cli::library::search_history(&opts, cmd),
        Commands::Watched(cmd) => cli::library::watched(&opts, cmd),
        Commands::Profile => cli::library::profile(&opts),
        Commands::Settings(cmd) => cli::settings::run(&opts, cmd),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "mflix", &mut std::io::stdout());
            Ok(())
        }
    }
}
