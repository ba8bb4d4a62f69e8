//! Title commands: details, seasons, people and playback

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::images::{ImageSize, image_url};
use crate::client::models::{Details, MediaType};
use crate::embed::EmbedServer;
use crate::error::Result;
use crate::models::display::{stars, truncate_string};
use crate::models::{CastDisplay, EpisodeDisplay, MovieDisplay};
use crate::output::{Formattable, json};
use crate::store::ListItem;

const CAST_LIMIT: usize = 10;
const RELATED_LIMIT: usize = 8;

pub async fn show(opts: &GlobalOptions, media: MediaType, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let details = ctx.catalog.details_with_extras(media, id).await?;
    let saved = ctx.library.in_watchlist(media, id);
    let rating = ctx.library.ratings.get(media, id);

    if opts.format == OutputFormat::Json {
        let value = serde_json::json!({
            "details": details,
            "in_watchlist": saved,
            "my_rating": rating,
        });
        println!("{}", json::format_catalog_json(&value)?);
        return Ok(());
    }

    print_header(&details, media);

    if saved {
        println!("{} In your watchlist", "✓".green());
    }
    if let Some(rating) = rating {
        println!("{} Your rating: {}", "★".yellow(), stars(rating).yellow());
    }

    if let Some(trailer) = details.trailer().and_then(|t| t.url()) {
        println!("Trailer: {}", trailer.cyan());
    }
    println!(
        "Poster:  {}",
        image_url(details.poster_path.as_deref(), ImageSize::Poster).dimmed()
    );

    if let Some(credits) = &details.credits
        && !credits.cast.is_empty()
    {
        println!("\n{}", "Cast".bold());
        let cast: Vec<CastDisplay> = credits
            .cast
            .iter()
            .take(CAST_LIMIT)
            .map(CastDisplay::from)
            .collect();
        cast.print(opts.format)?;
    }

    for (heading, related) in [
        ("More Like This", &details.similar),
        ("Recommended", &details.recommendations),
    ] {
        if let Some(page) = related
            && !page.is_empty()
        {
            println!("\n{}", heading.bold());
            let display: Vec<MovieDisplay> = page
                .results
                .iter()
                .take(RELATED_LIMIT)
                .map(|m| MovieDisplay::with_media(m, Some(media)))
                .collect();
            display.print(opts.format)?;
        }
    }

    Ok(())
}

fn print_header(details: &Details, media: MediaType) {
    let year = details
        .year()
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();
    println!("{}{}", details.display_title().bold(), year);

    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        println!("{}", tagline.italic().dimmed());
    }

    let mut facts = vec![media.to_string()];
    if let Some(vote) = details.vote_average.filter(|v| *v > 0.0) {
        facts.push(format!("{:.1}/10", vote));
    }
    if let Some(runtime) = details.runtime.filter(|r| *r > 0) {
        facts.push(format!("{}h {}m", runtime / 60, runtime % 60));
    }
    if let Some(seasons) = details.number_of_seasons {
        facts.push(format!(
            "{} season{}",
            seasons,
            if seasons == 1 { "" } else { "s" }
        ));
    }
    if !details.genres.is_empty() {
        let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        facts.push(names.join(", "));
    }
    println!("{}", facts.join(" · ").dimmed());

    if let Some(overview) = details.overview.as_deref().filter(|o| !o.is_empty()) {
        println!("\n{}\n", overview);
    }
}

pub async fn season(opts: &GlobalOptions, tv_id: u64, number: u32) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let season = ctx.catalog.season(tv_id, number).await?;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();

    let (aired, upcoming): (Vec<_>, Vec<_>) =
        season.episodes.iter().partition(|e| e.is_aired(&today));

    let display: Vec<EpisodeDisplay> = aired
        .iter()
        .map(|e| {
            EpisodeDisplay::new(
                e,
                ctx.library.watched.is_watched(tv_id, number, e.episode_number),
            )
        })
        .collect();

    if opts.format == OutputFormat::Json {
        return display.print(opts.format);
    }

    let name = season
        .name
        .clone()
        .unwrap_or_else(|| format!("Season {}", number));
    println!("{}", name.bold());
    display.print(opts.format)?;
    if !upcoming.is_empty() {
        println!(
            "{}",
            format!("{} upcoming episode(s) not listed", upcoming.len()).dimmed()
        );
    }
    Ok(())
}

pub async fn person(opts: &GlobalOptions, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let person = ctx.catalog.person(id).await?;

    if opts.format == OutputFormat::Json {
        println!("{}", json::format_catalog_json(&person)?);
        return Ok(());
    }

    println!("{}", person.name.bold());
    let mut facts = Vec::new();
    if let Some(dept) = &person.known_for_department {
        facts.push(dept.clone());
    }
    if let Some(born) = &person.birthday {
        facts.push(format!("born {}", born));
    }
    if let Some(place) = &person.place_of_birth {
        facts.push(place.clone());
    }
    if !facts.is_empty() {
        println!("{}", facts.join(" · ").dimmed());
    }
    if let Some(bio) = person.biography.as_deref().filter(|b| !b.is_empty()) {
        println!("\n{}", truncate_string(bio, 600));
    }

    for (heading, credits, media) in [
        ("Movies", &person.movie_credits, MediaType::Movie),
        ("Series", &person.tv_credits, MediaType::Tv),
    ] {
        if let Some(credits) = credits
            && !credits.cast.is_empty()
        {
            let mut cast = credits.cast.clone();
            cast.sort_by(|a, b| b.date().cmp(&a.date()));
            println!("\n{}", heading.bold());
            let display: Vec<MovieDisplay> = cast
                .iter()
                .take(RELATED_LIMIT * 2)
                .map(|m| MovieDisplay::with_media(m, Some(media)))
                .collect();
            display.print(opts.format)?;
        }
    }
    Ok(())
}

/// Episode to start from
#[derive(Debug, Clone, Copy)]
pub struct PlayTarget {
    pub media: MediaType,
    pub id: u64,
    pub season: u32,
    pub episode: u32,
    /// One-based server number from the command line
    pub server: Option<usize>,
}

/// Resolve the embed server: a one-based CLI choice wins over the saved zero-based default.
fn resolve_server(cli_choice: Option<usize>, saved_default: usize) -> EmbedServer {
    match cli_choice {
        Some(n) => EmbedServer::from_index(n.saturating_sub(1)),
        None => EmbedServer::from_index(saved_default),
    }
}

pub async fn play(opts: &GlobalOptions, target: PlayTarget) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let details = ctx.catalog.details(target.media, target.id).await?;
    let settings = ctx.library.settings.load();
    let server = resolve_server(target.server, settings.default_server);

    let mut item = ListItem::from_details(&details, target.media);
    if target.media == MediaType::Tv {
        item = item.at_episode(target.season, target.episode);
    }
    ctx.library.record_play(item)?;

    let url = server.url(target.id, target.media, target.season, target.episode);

    if opts.format == OutputFormat::Json {
        let value = serde_json::json!({
            "id": target.id,
            "type": target.media,
            "title": details.display_title(),
            "season": (target.media == MediaType::Tv).then_some(target.season),
            "episode": (target.media == MediaType::Tv).then_some(target.episode),
            "server": server.name(),
            "url": url,
        });
        println!("{}", json::format_catalog_json(&value)?);
        return Ok(());
    }

    let label = match target.media {
        MediaType::Tv => format!(
            "{} S{}E{}",
            details.display_title(),
            target.season,
            target.episode
        ),
        MediaType::Movie => details.display_title().to_string(),
    };
    println!("{} Now playing {} on {}", "▶".green(), label.bold(), server.name());
    println!("{}", url.cyan());
    Ok(())
}
