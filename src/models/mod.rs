//! Display models for CLI output
//!
//! Converts catalog and library types into table rows with stable column names.

pub mod display;

pub use display::{
    CastDisplay, EpisodeDisplay, ListItemDisplay, MovieDisplay, RatingDisplay, SearchTermDisplay,
    SettingDisplay,
};
