//! Paginated content rows
//!
//! A [`RowController`] owns one horizontally scrolling list: it loads page 1,
//! appends later pages when the presentation layer calls
//! [`RowController::fetch_next`], and stops for good after an empty page or the
//! page ceiling. At most one fetch per row is in flight at any time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::client::MAX_ROW_PAGES;
use crate::client::models::Movie;
use crate::error::Result;

pub mod source;

pub use source::{CatalogSource, FnSource, PageSource, RowKind};

/// Where a row is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPhase {
    /// Nothing loaded (never fetched, or page 1 was empty or failed)
    Idle,
    InitialLoading,
    Ready,
    FetchingMore,
    /// No more pages will be requested
    Exhausted,
}

/// Result of a load or fetch request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Another fetch was in flight, or the row is not in a fetchable state
    Skipped,
    /// Page 1 came back empty; the row stays idle
    Empty,
    Loaded { page: u32, added: usize },
    /// The row just stopped paginating
    Exhausted,
}

#[derive(Debug)]
struct RowState {
    items: Vec<Movie>,
    current_page: u32,
    has_more: bool,
    initial_load_complete: bool,
}

/// Point-in-time copy of a row for rendering
#[derive(Debug, Clone, Serialize)]
pub struct RowSnapshot {
    pub title: String,
    pub phase: RowPhase,
    pub current_page: u32,
    pub has_more: bool,
    pub items: Vec<Movie>,
}

/// Releases the single-flight flag when dropped, including on error or cancellation.
struct FetchGuard<'a>(&'a AtomicBool);

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct RowController {
    title: String,
    source: Arc<dyn PageSource>,
    state: Mutex<RowState>,
    fetching: AtomicBool,
}

impl RowController {
    pub fn new(title: impl Into<String>, source: Arc<dyn PageSource>) -> Self {
        Self::with_items(title, source, Vec::new())
    }

    /// Start from an already fetched first page. Non-empty items skip the initial load.
    pub fn with_items(
        title: impl Into<String>,
        source: Arc<dyn PageSource>,
        items: Vec<Movie>,
    ) -> Self {
        let prefetched = !items.is_empty();
        Self {
            title: title.into(),
            source,
            state: Mutex::new(RowState {
                items,
                current_page: 1,
                has_more: true,
                initial_load_complete: prefetched,
            }),
            fetching: AtomicBool::new(false),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    fn lock(&self) -> MutexGuard<'_, RowState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn try_begin(&self) -> Option<FetchGuard<'_>> {
        self.fetching
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| FetchGuard(&self.fetching))
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::Acquire)
    }

    pub fn phase(&self) -> RowPhase {
        let fetching = self.is_fetching();
        let state = self.lock();
        match (fetching, state.initial_load_complete, state.has_more) {
            (true, false, _) => RowPhase::InitialLoading,
            (true, true, _) => RowPhase::FetchingMore,
            (false, _, false) => RowPhase::Exhausted,
            (false, true, true) => RowPhase::Ready,
            (false, false, true) => RowPhase::Idle,
        }
    }

    pub fn has_more(&self) -> bool {
        self.lock().has_more
    }

    pub fn current_page(&self) -> u32 {
        self.lock().current_page
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn items(&self) -> Vec<Movie> {
        self.lock().items.clone()
    }

    pub fn snapshot(&self) -> RowSnapshot {
        let phase = self.phase();
        let state = self.lock();
        RowSnapshot {
            title: self.title.clone(),
            phase,
            current_page: state.current_page,
            has_more: state.has_more,
            items: state.items.clone(),
        }
    }

    /// Fetch page 1 unless the row already has it.
    pub async fn load_initial(&self) -> Result<FetchOutcome> {
        let Some(_guard) = self.try_begin() else {
            return Ok(FetchOutcome::Skipped);
        };
        if self.lock().initial_load_complete {
            return Ok(FetchOutcome::Skipped);
        }

        log::debug!("Row '{}': loading page 1", self.title);
        let items = self.source.page(1).await?;
        if items.is_empty() {
            log::debug!("Row '{}': page 1 empty, row stays idle", self.title);
            return Ok(FetchOutcome::Empty);
        }

        let added = items.len();
        let mut state = self.lock();
        state.items = items;
        state.current_page = 1;
        state.has_more = true;
        state.initial_load_complete = true;
        Ok(FetchOutcome::Loaded { page: 1, added })
    }

    /// Append the next page. This is the "sentinel became visible" trigger.
    pub async fn fetch_next(&self) -> Result<FetchOutcome> {
        let Some(_guard) = self.try_begin() else {
            return Ok(FetchOutcome::Skipped);
        };

        let next = {
            let state = self.lock();
            if !state.initial_load_complete || !state.has_more {
                return Ok(FetchOutcome::Skipped);
            }
            state.current_page + 1
        };

        if next > MAX_ROW_PAGES {
            log::debug!("Row '{}': page ceiling reached", self.title);
            self.lock().has_more = false;
            return Ok(FetchOutcome::Exhausted);
        }

        log::debug!("Row '{}': fetching page {}", self.title, next);
        let items = self.source.page(next).await?;

        let mut state = self.lock();
        if items.is_empty() {
            log::debug!("Row '{}': page {} empty, exhausted", self.title, next);
            state.has_more = false;
            return Ok(FetchOutcome::Exhausted);
        }

        let added = items.len();
        state.items.extend(items);
        state.current_page = next;
        Ok(FetchOutcome::Loaded { page: next, added })
    }

    /// Load page 1 if needed, then keep fetching until `pages` pages are loaded or
    /// the row is exhausted.
    pub async fn fill(&self, pages: u32) -> Result<()> {
        if self.load_initial().await? == FetchOutcome::Empty {
            return Ok(());
        }
        while self.current_page() < pages.min(MAX_ROW_PAGES) {
            match self.fetch_next().await? {
                FetchOutcome::Loaded { .. } => continue,
                _ => break,
            }
        }
        Ok(())
    }
}
