//! Init command implementation

use std::sync::Arc;

use colored::Colorize;
use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::models::MediaType;
use crate::client::{Catalog, TmdbClient};
use crate::config::{Config, DEFAULT_LANGUAGE};
use crate::error::Result;

/// Run the init command
///
/// Prompts for a TMDB API key, checks it against the genre list endpoint and
/// saves it. A custom `--api-host` is kept in the saved config.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let theme = ColorfulTheme::default();

    println!("{}", "Welcome to MFLIX!".bold().green());
    println!("Let's set up your TMDB configuration.\n");

    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();

    let api_key: String = Password::with_theme(&theme)
        .with_prompt("Enter your TMDB API key (v3)")
        .interact()?;

    let language: String = Input::with_theme(&theme)
        .with_prompt("Response language")
        .default(
            if config.language.is_empty() {
                DEFAULT_LANGUAGE.to_string()
            } else {
                config.language.clone()
            },
        )
        .interact_text()?;

    println!("\n{}", "Checking the key...".cyan());
    let client = TmdbClient::with_host(
        api_key.clone(),
        language.clone(),
        opts.api_host_ref().or(config.api_host.as_deref()),
    )?;
    let catalog = Catalog::new(Arc::new(client));

    match catalog.genres(MediaType::Movie).await {
        Ok(genres) => println!(
            "{}",
            format!("✓ Key accepted ({} movie genres available)", genres.genres.len()).green()
        ),
        Err(e) => {
            println!("{} {}", "⚠".yellow(), e);
            let keep = Confirm::with_theme(&theme)
                .with_prompt("Save this key anyway?")
                .default(false)
                .interact()?;
            if !keep {
                println!("Nothing saved.");
                return Ok(());
            }
        }
    }

    config.api_key = Some(api_key);
    config.language = language;
    if let Some(host) = opts.api_host_ref() {
        config.api_host = Some(host.to_string());
    }
    if let Some(dir) = opts.data_dir_ref() {
        config.data_dir = Some(dir.into());
    }

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Load the home rows", "mflix home".cyan());
    println!("  {} - Search the catalog", "mflix search <text>".cyan());
    println!("  {} - Show configuration status", "mflix status".cyan());

    Ok(())
}
