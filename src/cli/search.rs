//! Search command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat, SearchKindArg};
use crate::client::catalog::{SearchFilter, SearchKind};
use crate::client::models::MediaType;
use crate::error::Result;
use crate::models::MovieDisplay;
use crate::output::{Formattable, json};

/// Options for one search run
#[derive(Debug, Clone)]
pub struct SearchArgs {
    pub query: String,
    pub kind: SearchKindArg,
    pub filter: SearchFilter,
    pub page: u32,
}

/// Media type to show for entries of a tab that doesn't label them
fn tab_media(kind: SearchKind) -> Option<MediaType> {
    match kind {
        SearchKind::Movie => Some(MediaType::Movie),
        SearchKind::Tv | SearchKind::Anime => Some(MediaType::Tv),
        SearchKind::Multi | SearchKind::Person => None,
    }
}

pub async fn run(opts: &GlobalOptions, args: SearchArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let kind = SearchKind::from(args.kind);

    if let Err(e) = ctx.library.record_search(&args.query) {
        log::warn!("Could not save search term: {}", e);
    }

    let mut results = ctx.catalog.search(kind, &args.query, args.page).await?;
    let before = results.results.len();
    results.retain(|m| args.filter.matches(m));
    log::debug!(
        "Search '{}' page {}: {} results, {} after filters",
        args.query,
        args.page,
        before,
        results.results.len()
    );

    if opts.format == OutputFormat::Json {
        println!("{}", json::format_catalog_json(&results)?);
        return Ok(());
    }

    let media = tab_media(kind);
    let display: Vec<MovieDisplay> = results
        .results
        .iter()
        .map(|m| MovieDisplay::with_media(m, media))
        .collect();

    println!(
        "{} {}",
        format!("Results for \"{}\"", args.query.trim()).bold(),
        format!("(page {} of {})", args.page, results.total_pages.max(1)).dimmed()
    );
    display.print(opts.format)?;
    if results.has_next_page() {
        println!(
            "{}",
            format!("More results: --page {}", args.page + 1).dimmed()
        );
    }
    Ok(())
}

/// The single filter a discover run uses
#[derive(Debug, Clone, PartialEq)]
pub enum DiscoverBy {
    Genre(String),
    Language(String),
    Year(i32),
    MinRating(f64),
}

impl DiscoverBy {
    /// First filter present, in genre, language, year, rating order
    pub fn from_flags(
        genre: Option<String>,
        lang: Option<String>,
        year: Option<i32>,
        min_rating: Option<f64>,
    ) -> Option<Self> {
        genre
            .map(DiscoverBy::Genre)
            .or(lang.map(DiscoverBy::Language))
            .or(year.map(DiscoverBy::Year))
            .or(min_rating.map(DiscoverBy::MinRating))
    }

    fn describe(&self) -> String {
        match self {
            DiscoverBy::Genre(ids) => format!("genres {}", ids),
            DiscoverBy::Language(lang) => format!("language {}", lang),
            DiscoverBy::Year(year) => format!("year {}", year),
            DiscoverBy::MinRating(min) => format!("rated {:.1}+", min),
        }
    }
}

pub async fn discover(
    opts: &GlobalOptions,
    media: MediaType,
    by: DiscoverBy,
    page: u32,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let results = match &by {
        DiscoverBy::Genre(ids) => ctx.catalog.discover_by_genre(media, ids, page).await?,
        DiscoverBy::Language(lang) => ctx.catalog.discover_by_language(media, lang, page).await?,
        DiscoverBy::Year(year) => ctx.catalog.discover_by_year(media, *year, page).await?,
        DiscoverBy::MinRating(min) => ctx.catalog.discover_by_rating(media, *min, page).await?,
    };

    if opts.format == OutputFormat::Json {
        println!("{}", json::format_catalog_json(&results)?);
        return Ok(());
    }

    let display: Vec<MovieDisplay> = results
        .results
        .iter()
        .map(|m| MovieDisplay::with_media(m, Some(media)))
        .collect();
    println!(
        "{} {}",
        format!("Discover {} by {}", media, by.describe()).bold(),
        format!("(page {} of {})", page, results.total_pages.max(1)).dimmed()
    );
    display.print(opts.format)
}
