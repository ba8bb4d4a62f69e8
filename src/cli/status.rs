//! Status command implementation

use colored::Colorize;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::cli::context::load_config;
use crate::config::Config;
use crate::error::Result;
use crate::output::json;
use crate::store::{Library, SqliteStore};

/// Run the status command to display configuration and library status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let config_path = Config::resolve_path(opts.config_ref())?;
    let config = load_config(opts)?;
    let data_dir = match &config.data_dir {
        Some(dir) => dir.clone(),
        None => SqliteStore::data_dir()?,
    };
    let library = Library::open(Some(data_dir.as_path()));

    if opts.format == OutputFormat::Json {
        let stats = library.as_ref().ok().map(Library::profile_stats);
        let value = serde_json::json!({
            "config_path": config_path.display().to_string(),
            "config_exists": config_path.exists(),
            "api_key_configured": config.require_api_key().is_ok(),
            "api_host": config.api_host(),
            "language": config.language,
            "data_dir": data_dir.display().to_string(),
            "library": stats,
        });
        println!("{}", json::format_json(&value)?);
        return Ok(());
    }

    println!("{}\n", "MFLIX Status".bold());

    if config_path.exists() {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "{} Config file not found at {}",
            "○".dimmed(),
            config_path.display()
        );
    }
    println!();

    if config.require_api_key().is_ok() {
        println!("{} API key configured", "✓".green());
    } else {
        println!("{} API key not configured", "✗".red());
        println!("  → Run 'mflix init' to configure");
    }

    if config.api_host.is_some() {
        println!("{} Custom API host: {}", "○".dimmed(), config.api_host().cyan());
    }
    println!("{} Language: {}", "○".dimmed(), config.language);

    match library {
        Ok(library) => {
            let stats = library.profile_stats();
            println!(
                "{} Library: {}",
                "✓".green(),
                data_dir.display().to_string().cyan()
            );
            println!(
                "  {} in watchlist, {} in history, {} rated",
                stats.watchlist_count, stats.history_count, stats.ratings_count
            );
        }
        Err(e) => {
            println!("{} Library unavailable: {}", "✗".red(), e);
        }
    }

    println!();
    Ok(())
}
