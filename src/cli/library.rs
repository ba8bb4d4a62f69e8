//! Library commands: watchlist, history, ratings, search history, watched episodes, profile

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::context::open_library;
use crate::cli::{
    CommandContext, HistoryCommands, OutputFormat, RatingsCommands, SearchHistoryCommands,
    WatchedCommands, WatchlistCommands,
};
use crate::error::Result;
use crate::models::{ListItemDisplay, RatingDisplay, SearchTermDisplay};
use crate::output::{Formattable, json};
use crate::store::{HISTORY_LIMIT, ListItem, SEARCH_HISTORY_LIMIT};

/// Print a one-line confirmation, or `{data: ...}` in JSON mode.
fn confirm(format: OutputFormat, message: &str, data: serde_json::Value) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(&data)?),
        _ => println!("{} {}", "✓".green(), message),
    }
    Ok(())
}

pub async fn watchlist(opts: &GlobalOptions, cmd: WatchlistCommands) -> Result<()> {
    match cmd {
        WatchlistCommands::List => {
            let items = open_library(opts)?.watchlist.read_all();
            print_items(opts.format, "Watchlist", &items)
        }
        WatchlistCommands::Add { media, id, title } => {
            let item = match title {
                Some(title) => ListItem::new(id, media, title),
                None => {
                    let ctx = CommandContext::new(opts)?;
                    let details = ctx.catalog.details(media, id).await?;
                    ListItem::from_details(&details, media)
                }
            };
            let library = open_library(opts)?;
            let title = item.title.clone();
            if library.in_watchlist(media, id) {
                return confirm(
                    opts.format,
                    &format!("{} is already in your watchlist", title),
                    serde_json::json!({ "id": id, "type": media, "added": false }),
                );
            }
            library.toggle_watchlist(item)?;
            confirm(
                opts.format,
                &format!("Added {} to your watchlist", title.bold()),
                serde_json::json!({ "id": id, "type": media, "added": true }),
            )
        }
        WatchlistCommands::Remove { media, id } => {
            let removed = open_library(opts)?.watchlist.remove(&(id, media))?;
            let message = if removed {
                format!("Removed {} {} from your watchlist", media, id)
            } else {
                format!("{} {} was not in your watchlist", media, id)
            };
            confirm(
                opts.format,
                &message,
                serde_json::json!({ "id": id, "type": media, "removed": removed }),
            )
        }
        WatchlistCommands::Clear => {
            open_library(opts)?.watchlist.clear()?;
            confirm(
                opts.format,
                "Watchlist cleared",
                serde_json::json!({ "cleared": "watchlist" }),
            )
        }
    }
}

pub fn history(opts: &GlobalOptions, cmd: HistoryCommands) -> Result<()> {
    let library = open_library(opts)?;
    match cmd {
        HistoryCommands::List => {
            let items = library.history.read_all();
            print_items(
                opts.format,
                &format!("Continue Watching (last {})", HISTORY_LIMIT),
                &items,
            )
        }
        HistoryCommands::Clear => {
            library.history.clear()?;
            confirm(
                opts.format,
                "History cleared",
                serde_json::json!({ "cleared": "history" }),
            )
        }
    }
}

pub fn ratings(opts: &GlobalOptions, cmd: RatingsCommands) -> Result<()> {
    let library = open_library(opts)?;
    match cmd {
        RatingsCommands::List => {
            let mut entries = library.ratings.entries();
            entries.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)));
            let display: Vec<RatingDisplay> = entries.into_iter().map(RatingDisplay::from).collect();
            if opts.format == OutputFormat::Pretty {
                println!("{}", "My Ratings".bold());
            }
            display.print(opts.format)
        }
        RatingsCommands::Set { media, id, rating } => {
            library.rate(media, id, rating)?;
            confirm(
                opts.format,
                &format!(
                    "Rated {} {} {}",
                    media,
                    id,
                    crate::models::display::stars(rating).yellow()
                ),
                serde_json::json!({ "id": id, "type": media, "rating": rating }),
            )
        }
        RatingsCommands::Remove { media, id } => {
            let removed = library.ratings.remove(media, id)?;
            confirm(
                opts.format,
                &if removed {
                    format!("Removed rating for {} {}", media, id)
                } else {
                    format!("{} {} was not rated", media, id)
                },
                serde_json::json!({ "id": id, "type": media, "removed": removed }),
            )
        }
        RatingsCommands::Clear => {
            library.ratings.clear()?;
            confirm(
                opts.format,
                "Ratings cleared",
                serde_json::json!({ "cleared": "ratings" }),
            )
        }
    }
}

pub fn search_history(opts: &GlobalOptions, cmd: SearchHistoryCommands) -> Result<()> {
    let library = open_library(opts)?;
    match cmd {
        SearchHistoryCommands::List => {
            let display: Vec<SearchTermDisplay> = library
                .search_history
                .read_all()
                .into_iter()
                .enumerate()
                .map(|(i, query)| SearchTermDisplay {
                    position: i + 1,
                    query,
                })
                .collect();
            if opts.format == OutputFormat::Pretty {
                println!(
                    "{}",
                    format!("Recent Searches (last {})", SEARCH_HISTORY_LIMIT).bold()
                );
            }
            display.print(opts.format)
        }
        SearchHistoryCommands::Remove { query } => {
            let removed = library.search_history.remove(&query)?;
            confirm(
                opts.format,
                &if removed {
                    format!("Forgot \"{}\"", query)
                } else {
                    format!("\"{}\" was not in recent searches", query)
                },
                serde_json::json!({ "query": query, "removed": removed }),
            )
        }
        SearchHistoryCommands::Clear => {
            library.search_history.clear()?;
            confirm(
                opts.format,
                "Recent searches cleared",
                serde_json::json!({ "cleared": "search_history" }),
            )
        }
    }
}

pub fn watched(opts: &GlobalOptions, cmd: WatchedCommands) -> Result<()> {
    let library = open_library(opts)?;
    match cmd {
        WatchedCommands::Toggle {
            tv_id,
            season,
            episode,
        } => {
            let now_watched = library.watched.toggle(tv_id, season, episode)?;
            let state = if now_watched { "watched" } else { "unwatched" };
            confirm(
                opts.format,
                &format!("S{}E{} of {} marked {}", season, episode, tv_id, state),
                serde_json::json!({
                    "tv_id": tv_id,
                    "season": season,
                    "episode": episode,
                    "watched": now_watched,
                }),
            )
        }
        WatchedCommands::List { tv_id, season } => {
            let episodes = library.watched.watched_in_season(tv_id, season);
            match opts.format {
                OutputFormat::Json => println!(
                    "{}",
                    json::format_json(&serde_json::json!({
                        "tv_id": tv_id,
                        "season": season,
                        "episodes": episodes,
                    }))?
                ),
                _ if episodes.is_empty() => {
                    println!("No watched episodes in season {} of {}", season, tv_id)
                }
                _ => {
                    let list: Vec<String> = episodes.iter().map(|e| e.to_string()).collect();
                    println!(
                        "Season {} of {}: watched episodes {}",
                        season,
                        tv_id,
                        list.join(", ").green()
                    );
                }
            }
            Ok(())
        }
    }
}

pub fn profile(opts: &GlobalOptions) -> Result<()> {
    let stats = open_library(opts)?.profile_stats();

    if opts.format == OutputFormat::Json {
        println!("{}", json::format_json(&stats)?);
        return Ok(());
    }

    let average = stats
        .average_rating
        .map(|avg| format!("{:.1}", avg))
        .unwrap_or_else(|| "-".to_string());

    println!("{}", "MFLIX Profile".bold());
    println!("────────────────────────────────────────");
    println!("Watchlist:       {}", stats.watchlist_count);
    println!("Watched:         {}", stats.history_count);
    println!("Ratings:         {}", stats.ratings_count);
    println!("Average rating:  {}", average);
    Ok(())
}

fn print_items(format: OutputFormat, heading: &str, items: &[ListItem]) -> Result<()> {
    let display: Vec<ListItemDisplay> = items.iter().map(ListItemDisplay::from).collect();
    if format == OutputFormat::Pretty {
        println!("{}", heading.bold());
    }
    display.print(format)
}

