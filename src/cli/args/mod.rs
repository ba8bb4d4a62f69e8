//! Shared CLI argument types

mod common;
mod global;

pub use common::{OutputFormat, SearchKindArg};
pub use global::GlobalOptions;
