//! Catalog browsing core for the VibeMCP server directory.
//!
//! The directory site itself is static; this crate holds the one piece with
//! real logic: the client-side catalog browser. A [`Catalog`] is loaded once
//! from the pre-built JSON dataset and shared immutably. A
//! [`CatalogBrowser`] derives a filtered, ordered view from the current
//! [`FilterCriteria`] (debounced search text, category/language selections,
//! quick-filter badges) and reveals it incrementally, growing the visible
//! window on demand or when the user scrolls near the bottom.

pub mod browser;
pub mod catalog;
pub mod debounce;
pub mod filter;
pub mod format;
pub mod models;
pub mod stats;

pub use browser::{CatalogBrowser, GrowGuard, ScrollMetrics, ScrollTrigger, PAGE_SIZE};
pub use catalog::{Catalog, CatalogError};
pub use models::{CatalogEntry, Category, FilterCriteria, SortMode};
