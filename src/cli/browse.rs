//! Home screen and row browsing commands

use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use dialoguer::{Select, theme::ColorfulTheme};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::models::{MediaType, Movie};
use crate::client::{MAX_ROW_PAGES, Mood, Preset};
use crate::embed::EmbedServer;
use crate::error::{Error, Result};
use crate::models::{ListItemDisplay, MovieDisplay};
use crate::output::{Formattable, json};
use crate::row::{CatalogSource, FetchOutcome, PageSource, RowController, RowKind, RowSnapshot};
use crate::store::ListItem;

fn spinner(format: OutputFormat, message: &str) -> Option<ProgressBar> {
    if format != OutputFormat::Pretty {
        return None;
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    Some(bar)
}

fn controller(ctx: &CommandContext, kind: RowKind) -> RowController {
    let title = kind.title();
    let source: Arc<dyn PageSource> = Arc::new(CatalogSource::new(ctx.catalog.clone(), kind));
    RowController::new(title, source)
}

fn row_display(items: &[Movie], media: Option<MediaType>, limit: usize) -> Vec<MovieDisplay> {
    items
        .iter()
        .take(limit)
        .map(|m| MovieDisplay::with_media(m, media))
        .collect()
}

/// Load every home row concurrently and print the ones that came back non-empty.
pub async fn home(opts: &GlobalOptions, limit: usize) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let kinds = RowKind::home_rows();
    let rows: Vec<RowController> = kinds.iter().cloned().map(|k| controller(&ctx, k)).collect();

    let bar = spinner(opts.format, "Loading home rows...");
    let outcomes = join_all(rows.iter().map(|row| row.load_initial())).await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let mut loaded: Vec<(RowSnapshot, Option<MediaType>)> = Vec::new();
    for ((row, kind), outcome) in rows.iter().zip(&kinds).zip(outcomes) {
        match outcome {
            Ok(FetchOutcome::Loaded { .. }) => loaded.push((row.snapshot(), kind.media())),
            Ok(_) => log::debug!("Row '{}' has no entries, hiding it", row.title()),
            Err(e) => log::warn!("Row '{}' failed to load: {}", row.title(), e),
        }
    }
    let history = ctx.library.history.read_all();

    if opts.format == OutputFormat::Json {
        let snapshots: Vec<&RowSnapshot> = loaded.iter().map(|(s, _)| s).collect();
        let recent: Vec<&ListItem> = history.iter().take(limit).collect();
        let value = serde_json::json!({
            "continue_watching": recent,
            "rows": snapshots,
        });
        println!("{}", json::format_catalog_json(&value)?);
        return Ok(());
    }

    if !history.is_empty() {
        println!("{}", "Continue Watching".bold());
        let display: Vec<ListItemDisplay> =
            history.iter().take(limit).map(ListItemDisplay::from).collect();
        display.print(opts.format)?;
        println!();
    }

    if loaded.is_empty() {
        println!("{}", "No rows could be loaded.".yellow());
        return Ok(());
    }

    for (snapshot, media) in &loaded {
        println!("{}", snapshot.title.bold());
        row_display(&snapshot.items, *media, limit).print(opts.format)?;
        println!();
    }
    Ok(())
}

/// List every row slug `browse` accepts.
pub fn rows(opts: &GlobalOptions) -> Result<()> {
    let mut entries: Vec<(String, String)> = vec![
        ("trending".into(), RowKind::Trending.title()),
        ("trending-today".into(), RowKind::TrendingToday.title()),
        (
            "popular-movie".into(),
            RowKind::Popular(MediaType::Movie).title(),
        ),
        ("popular-tv".into(), RowKind::Popular(MediaType::Tv).title()),
        (
            "top-rated-movie".into(),
            RowKind::TopRated(MediaType::Movie).title(),
        ),
        (
            "top-rated-tv".into(),
            RowKind::TopRated(MediaType::Tv).title(),
        ),
        ("now-playing".into(), RowKind::NowPlaying.title()),
        ("upcoming".into(), RowKind::Upcoming.title()),
        ("airing-today".into(), RowKind::AiringToday.title()),
    ];
    entries.extend(
        Mood::ALL
            .iter()
            .map(|m| (RowKind::Mood(*m).to_string(), RowKind::Mood(*m).title())),
    );
    entries.extend(
        Preset::ALL
            .iter()
            .map(|p| (p.slug().to_string(), p.title().to_string())),
    );

    if opts.format == OutputFormat::Json {
        let value: Vec<serde_json::Value> = entries
            .iter()
            .map(|(slug, title)| serde_json::json!({ "row": slug, "title": title }))
            .collect();
        println!("{}", json::format_json(&value)?);
        return Ok(());
    }

    println!("{}", "Available rows".bold());
    for (slug, title) in &entries {
        println!("  {:<24} {}", slug.cyan(), title);
    }
    println!("\n  {:<24} {}", "genre:<movie|tv>:<ids>".cyan(), "Discover by genre ids");
    Ok(())
}

/// Load one row up to `pages` pages, optionally stepping through it.
pub async fn browse(opts: &GlobalOptions, row: &str, pages: u32, interactive: bool) -> Result<()> {
    let kind: RowKind = row.parse().map_err(Error::Other)?;
    let media = kind.media();
    let ctx = CommandContext::new(opts)?;
    let controller = controller(&ctx, kind);

    let bar = spinner(opts.format, &format!("Loading {}...", controller.title()));
    let filled = controller.fill(pages.max(1)).await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    filled?;

    if interactive && opts.format != OutputFormat::Json {
        return interact(&ctx, &controller, media).await;
    }

    if opts.format == OutputFormat::Json {
        println!("{}", json::format_catalog_json(&controller.snapshot())?);
        return Ok(());
    }

    print_row(&controller, media, opts.format)
}

fn print_row(controller: &RowController, media: Option<MediaType>, format: OutputFormat) -> Result<()> {
    println!(
        "{} {}",
        controller.title().bold(),
        format!(
            "(page {} of at most {}, {} titles)",
            controller.current_page(),
            MAX_ROW_PAGES,
            controller.len()
        )
        .dimmed()
    );
    row_display(&controller.items(), media, usize::MAX).print(format)?;
    if !controller.has_more() {
        println!("{}", "End of row.".dimmed());
    }
    Ok(())
}

const ACTION_MORE: usize = 0;
const ACTION_PLAY: usize = 1;
const ACTION_SAVE: usize = 2;
const ACTION_RATE: usize = 3;
const ACTION_CACHE_STATUS: usize = 4;
const ACTION_CACHE_CLEAR: usize = 5;

fn menu_actions(has_more: bool) -> Vec<&'static str> {
    let mut actions = vec![
        "Load more",
        "Play a title",
        "Add to watchlist",
        "Rate a title",
        "Cache status",
        "Clear cache",
        "Quit",
    ];
    if !has_more {
        actions[ACTION_MORE] = "Load more (end of row)";
    }
    actions
}

/// Menu loop over a loaded row. "Load more" plays the part of scrolling to the end.
async fn interact(
    ctx: &CommandContext,
    controller: &RowController,
    media: Option<MediaType>,
) -> Result<()> {
    let theme = ColorfulTheme::default();
    print_row(controller, media, OutputFormat::Pretty)?;

    loop {
        let actions = menu_actions(controller.has_more());

        let Some(action) = Select::with_theme(&theme)
            .with_prompt(controller.title())
            .items(&actions)
            .default(0)
            .interact_opt()?
        else {
            return Ok(());
        };

        match action {
            ACTION_MORE => match controller.fetch_next().await {
                Ok(FetchOutcome::Loaded { page, added }) => {
                    println!("{} page {} ({} new titles)", "✓".green(), page, added);
                    let items = controller.items();
                    let start = items.len().saturating_sub(added);
                    row_display(&items[start..], media, usize::MAX).print(OutputFormat::Pretty)?;
                }
                Ok(FetchOutcome::Exhausted) | Ok(FetchOutcome::Skipped) => {
                    println!("{}", "End of row.".dimmed())
                }
                Ok(FetchOutcome::Empty) => {}
                Err(e) => println!("{} {}", "✗".red(), e),
            },
            ACTION_PLAY | ACTION_SAVE | ACTION_RATE => {
                let Some((movie, item_media)) = pick(&theme, controller, media)? else {
                    continue;
                };
                let item = ListItem::from_movie(&movie, item_media);
                match action {
                    ACTION_PLAY => {
                        let server = EmbedServer::from_index(ctx.library.settings.load().default_server);
                        ctx.library.record_play(item.clone())?;
                        println!(
                            "{} {}: {}",
                            "▶".green(),
                            item.title.bold(),
                            server.url(item.id, item_media, 1, 1)
                        );
                    }
                    ACTION_SAVE => {
                        let saved = ctx.library.toggle_watchlist(item.clone())?;
                        let verb = if saved { "Added" } else { "Removed" };
                        println!("{} {} {}", "✓".green(), verb, item.title.bold());
                    }
                    _ => {
                        let stars = ["1", "2", "3", "4", "5"];
                        if let Some(index) = Select::with_theme(&theme)
                            .with_prompt("Rating")
                            .items(&stars)
                            .default(4)
                            .interact_opt()?
                        {
                            let rating = (index + 1) as u8;
                            ctx.library.rate(item_media, item.id, rating)?;
                            println!(
                                "{} Rated {} {}",
                                "✓".green(),
                                item.title.bold(),
                                crate::models::display::stars(rating).yellow()
                            );
                        }
                    }
                }
            }
            ACTION_CACHE_STATUS => super::cache::status(&ctx.cache, OutputFormat::Pretty)?,
            ACTION_CACHE_CLEAR => super::cache::clear(&ctx.cache, OutputFormat::Pretty)?,
            _ => return Ok(()),
        }
    }
}

fn pick(
    theme: &ColorfulTheme,
    controller: &RowController,
    media: Option<MediaType>,
) -> Result<Option<(Movie, MediaType)>> {
    let items = controller.items();
    let labels: Vec<String> = items
        .iter()
        .map(|m| match m.year() {
            Some(year) => format!("{} ({})", m.display_title(), year),
            None => m.display_title().to_string(),
        })
        .collect();

    let Some(index) = Select::with_theme(theme)
        .with_prompt("Title")
        .items(&labels)
        .default(0)
        .max_length(15)
        .interact_opt()?
    else {
        return Ok(None);
    };

    let movie = items[index].clone();
    let item_media = movie.media().or(media).unwrap_or(MediaType::Movie);
    Ok(Some((movie, item_media)))
}
