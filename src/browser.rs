//! The browsing view: composes the filter engine with incremental
//! disclosure of its results.
//!
//! A [`CatalogBrowser`] owns one user's ephemeral state (criteria, raw
//! search text, visible window) over a shared, immutable catalog. Criteria
//! changes re-run the filter and reset the window synchronously, so a
//! render can never observe stale indices against a new filtered list.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::catalog::Catalog;
use crate::debounce::Debouncer;
use crate::filter;
use crate::models::{CatalogEntry, FilterCriteria, KNOWN_LANGUAGES};

/// Entries revealed per grow step.
pub const PAGE_SIZE: usize = 12;

/// Quiet period before raw search input commits.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Artificial latency before a grow commits, matching the paced reveal of
/// the directory page.
pub const GROW_LATENCY: Duration = Duration::from_millis(800);

/// Distance from the content bottom, in scroll units, at which the scroll
/// trigger asks for more entries.
pub const SCROLL_THRESHOLD: f64 = 600.0;

// === Scroll Trigger ===

/// A snapshot of the scrollable area, as reported by the presentation
/// layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

impl ScrollMetrics {
    fn near_bottom(&self, threshold: f64) -> bool {
        self.scroll_top + self.viewport_height >= self.content_height - threshold
    }
}

/// Frame-throttled scroll watcher.
///
/// High-frequency scroll events only record the latest position; evaluation
/// happens at most once per animation frame, and always against the most
/// recent position, so the final scroll of a burst is never dropped.
#[derive(Debug)]
pub struct ScrollTrigger {
    threshold: f64,
    ticking: bool,
    latest: ScrollMetrics,
}

impl ScrollTrigger {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ticking: false,
            latest: ScrollMetrics::default(),
        }
    }

    /// Record a scroll event. Returns true when the caller should schedule
    /// a frame callback; at most one is outstanding at a time.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        self.latest = metrics;
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    /// Run the scheduled frame callback: evaluates the latest recorded
    /// position and reports whether it is near the bottom.
    pub fn frame_tick(&mut self) -> bool {
        self.ticking = false;
        self.latest.near_bottom(self.threshold)
    }
}

// === Grow Guard ===

/// An in-flight grow operation.
///
/// Holds the browser's loading flag high for the duration of the latency
/// window and lowers it again when the grow completes or the guard is
/// dropped, so an abandoned grow can never wedge the controller. Await
/// [`wait`](GrowGuard::wait), then hand the guard back to
/// [`CatalogBrowser::complete_load_more`].
#[derive(Debug)]
pub struct GrowGuard {
    flag: Arc<AtomicBool>,
}

impl GrowGuard {
    /// Wait out the simulated latency window.
    pub async fn wait(&self) {
        tokio::time::sleep(GROW_LATENCY).await;
    }
}

impl Drop for GrowGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// === Catalog Browser ===

/// One browsing session over the catalog.
///
/// The catalog entry array is shared and never mutated; the criteria and
/// the visible window belong exclusively to this instance. Dropping the
/// browser cancels any pending debounce timer.
pub struct CatalogBrowser {
    entries: Arc<[CatalogEntry]>,
    criteria: FilterCriteria,
    raw_search: String,
    filtered: Vec<CatalogEntry>,
    displayed_count: usize,
    is_loading_more: Arc<AtomicBool>,
    page_size: usize,
    debouncer: Debouncer<String>,
    search_rx: watch::Receiver<String>,
    scroll: ScrollTrigger,
}

impl CatalogBrowser {
    pub fn new(catalog: &Catalog) -> Self {
        Self::with_page_size(catalog, PAGE_SIZE)
    }

    pub fn with_page_size(catalog: &Catalog, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let entries = catalog.shared_entries();
        let criteria = FilterCriteria::default();
        let filtered = filter::apply(&entries, &criteria);
        let displayed_count = page_size.min(filtered.len());
        let (debouncer, search_rx) = Debouncer::new(String::new(), SEARCH_DEBOUNCE);

        Self {
            entries,
            criteria,
            raw_search: String::new(),
            filtered,
            displayed_count,
            is_loading_more: Arc::new(AtomicBool::new(false)),
            page_size,
            debouncer,
            search_rx,
            scroll: ScrollTrigger::new(SCROLL_THRESHOLD),
        }
    }

    // === Criteria ===

    /// The committed criteria currently driving the view.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Raw search text as typed, ahead of the debounce commit.
    pub fn search_input(&self) -> &str {
        &self.raw_search
    }

    /// Select a category, or clear the selection with `None` / an empty
    /// string (the "All Categories" option).
    pub fn set_category(&mut self, category: Option<&str>) {
        self.criteria.category = category
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        self.refilter();
    }

    /// Select a language, or clear the selection with `None` / an empty
    /// string (the "All Languages" option). The dropdown is a closed set:
    /// values outside [`KNOWN_LANGUAGES`] also clear the selection.
    pub fn set_language(&mut self, language: Option<&str>) {
        self.criteria.language = language
            .filter(|l| KNOWN_LANGUAGES.contains(l))
            .map(str::to_string);
        self.refilter();
    }

    pub fn toggle_official(&mut self) {
        self.criteria.toggle_official();
        self.refilter();
    }

    pub fn toggle_popular(&mut self) {
        self.criteria.toggle_popular();
        self.refilter();
    }

    pub fn toggle_recent(&mut self) {
        self.criteria.toggle_recent();
        self.refilter();
    }

    /// Restore every criterion to its default. Cancels any pending search
    /// debounce and commits the empty search immediately.
    pub fn clear_filters(&mut self) {
        self.raw_search.clear();
        self.debouncer.commit_now(String::new());
        // Mark the forced commit as seen so it is not re-applied later.
        let _ = self.search_rx.borrow_and_update();
        self.criteria.reset();
        self.refilter();
    }

    // === Search (debounced) ===

    /// Record a keystroke. The committed search only updates once the quiet
    /// period elapses with no further input; every call cancels the
    /// previous pending commit.
    pub fn set_search_input(&mut self, text: &str) {
        self.raw_search = text.to_string();
        self.debouncer.schedule(text.to_string());
    }

    /// Wait for the next debounced search commit and apply it.
    pub async fn search_settled(&mut self) {
        if self.search_rx.changed().await.is_ok() {
            let committed = self.search_rx.borrow_and_update().clone();
            self.commit_search(committed);
        }
    }

    /// Non-blocking variant of [`search_settled`](Self::search_settled):
    /// applies a settled commit if one is waiting. Returns true when a
    /// commit was applied.
    pub fn poll_search(&mut self) -> bool {
        if self.search_rx.has_changed().unwrap_or(false) {
            let committed = self.search_rx.borrow_and_update().clone();
            self.commit_search(committed);
            true
        } else {
            false
        }
    }

    fn commit_search(&mut self, committed: String) {
        self.criteria.search = committed;
        self.refilter();
    }

    /// Re-run the filter engine and reset the window. Synchronous: by the
    /// time any mutator returns, the window already fits the new list.
    fn refilter(&mut self) {
        self.filtered = filter::apply(&self.entries, &self.criteria);
        self.displayed_count = self.page_size.min(self.filtered.len());
        log::debug!(
            "filter applied: {} of {} entries match",
            self.filtered.len(),
            self.entries.len()
        );
    }

    // === Incremental disclosure ===

    /// Start a grow operation.
    ///
    /// Returns `None` while a grow is already in flight or when everything
    /// is displayed; otherwise raises the loading flag and returns the
    /// guard that owns the latency window. The flag stays observable via
    /// [`is_loading`](Self::is_loading) while the guard is alive and drops
    /// with it, committed or not.
    pub fn begin_load_more(&mut self) -> Option<GrowGuard> {
        if self.is_loading_more.load(Ordering::Acquire)
            || self.displayed_count >= self.filtered.len()
        {
            return None;
        }

        self.is_loading_more.store(true, Ordering::Release);
        Some(GrowGuard {
            flag: Arc::clone(&self.is_loading_more),
        })
    }

    /// Commit a waited-out grow: reveals one more page, capped at the
    /// filtered length, and lowers the loading flag. A guard from another
    /// browser is ignored.
    pub fn complete_load_more(&mut self, guard: GrowGuard) {
        if !Arc::ptr_eq(&guard.flag, &self.is_loading_more) {
            return;
        }

        self.displayed_count = (self.displayed_count + self.page_size).min(self.filtered.len());
        drop(guard);

        log::debug!(
            "window grew: {} of {} entries displayed",
            self.displayed_count,
            self.filtered.len()
        );
    }

    /// Reveal one more page after the simulated latency window.
    ///
    /// Convenience wrapper over [`begin_load_more`](Self::begin_load_more)
    /// and [`complete_load_more`](Self::complete_load_more). No-op while a
    /// grow is already in flight or when everything is displayed; returns
    /// true when the window actually grew. Dropping the returned future
    /// mid-flight commits nothing and releases the loading flag.
    pub async fn load_more(&mut self) -> bool {
        let Some(guard) = self.begin_load_more() else {
            return false;
        };

        guard.wait().await;
        self.complete_load_more(guard);
        true
    }

    /// Record a scroll event. Returns true when a frame callback should be
    /// scheduled (throttled to one per frame).
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        self.scroll.on_scroll(metrics)
    }

    /// Run the scheduled frame callback. Returns true when the scroll
    /// position warrants a grow: near the bottom, more entries remain, and
    /// no grow is in flight.
    pub fn frame_tick(&mut self) -> bool {
        let near_bottom = self.scroll.frame_tick();
        near_bottom && self.has_more() && !self.is_loading()
    }

    // === Output contract ===

    /// The rendered prefix of the filtered list.
    pub fn visible(&self) -> &[CatalogEntry] {
        // Never slice past the filtered length.
        &self.filtered[..self.displayed_count.min(self.filtered.len())]
    }

    /// How many filtered entries are currently revealed.
    pub fn displayed_count(&self) -> usize {
        self.displayed_count.min(self.filtered.len())
    }

    /// How many entries match the committed criteria.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Size of the unfiltered catalog.
    pub fn total_len(&self) -> usize {
        self.entries.len()
    }

    pub fn has_more(&self) -> bool {
        self.displayed_count < self.filtered.len()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading_more.load(Ordering::Acquire)
    }

    /// `(displayed, matching)` counts for the "showing X of Y" summary.
    pub fn summary(&self) -> (usize, usize) {
        (self.displayed_count(), self.filtered.len())
    }
}
