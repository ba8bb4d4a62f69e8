//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format data as a boxed table for reading
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Borderless, left-aligned columns for `--format table`, easy to pipe through `awk` or `cut`
pub fn format_plain_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return String::new();
    }

    let mut table = Table::new(data);
    table.with(Style::blank());
    table.to_string()
}
