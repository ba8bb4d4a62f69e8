//! Common CLI types shared across commands

use crate::client::catalog::SearchKind;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - headings, posters and colour
    #[default]
    Pretty,
    /// Table format - one row per entry
    Table,
    /// JSON format - structured for scripts
    Json,
}

/// Search tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SearchKindArg {
    /// Movies, series and people together
    #[default]
    Multi,
    Movie,
    Tv,
    /// Series tagged with the animation genre
    Anime,
    Person,
}

impl From<SearchKindArg> for SearchKind {
    fn from(arg: SearchKindArg) -> Self {
        match arg {
            SearchKindArg::Multi => SearchKind::Multi,
            SearchKindArg::Movie => SearchKind::Movie,
            SearchKindArg::Tv => SearchKind::Tv,
            SearchKindArg::Anime => SearchKind::Anime,
            SearchKindArg::Person => SearchKind::Person,
        }
    }
}
