//! Pagination types for list endpoints
//!
//! TMDB list endpoints are 1-indexed and return `{ page, results, total_pages, total_results }`.

use serde::{Deserialize, Serialize};

/// Hard ceiling on pages a single content row will ever request.
pub const MAX_ROW_PAGES: u32 = 10;

/// A page of results from a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResults<T> {
    /// Current page number (1-indexed)
    #[serde(default)]
    pub page: u32,

    /// The items on this page
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,

    /// Total number of pages
    #[serde(default)]
    pub total_pages: u32,

    /// Total number of items across all pages
    #[serde(default)]
    pub total_results: u64,
}

impl<T> Default for PagedResults<T> {
    fn default() -> Self {
        Self {
            page: 0,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}

impl<T> PagedResults<T> {
    /// Create a single-page response.
    pub fn new(results: Vec<T>) -> Self {
        let total_results = results.len() as u64;
        Self {
            page: 1,
            results,
            total_pages: 1,
            total_results,
        }
    }

    /// Check if the server reports more pages after this one.
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Keep only results matching `pred`.
    pub fn retain(&mut self, pred: impl FnMut(&T) -> bool) {
        self.results.retain(pred);
    }
}
