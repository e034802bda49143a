//! The filter engine: derives an ordered subset of the catalog from the
//! current criteria.
//!
//! Pure, synchronous, and deterministic: identical inputs always yield an
//! identically ordered output. Stable pagination across re-renders depends
//! on that.

use crate::models::{CatalogEntry, FilterCriteria, SortMode};

/// Apply `criteria` to `entries`, returning the filtered, ordered view.
///
/// Stages run in a fixed order: text search, category, language, official
/// flag, then ordering. The input slice is never mutated; sorting happens
/// on the copied result.
pub fn apply(entries: &[CatalogEntry], criteria: &FilterCriteria) -> Vec<CatalogEntry> {
    // Blank or whitespace-only search performs no filtering.
    let needle = criteria.search.trim().to_lowercase();

    let mut result: Vec<CatalogEntry> = entries
        .iter()
        .filter(|e| needle.is_empty() || matches_text(e, &needle))
        .filter(|e| {
            criteria
                .category
                .as_deref()
                .map_or(true, |c| e.category == c)
        })
        .filter(|e| {
            criteria
                .language
                .as_deref()
                .map_or(true, |l| e.languages.iter().any(|lang| lang == l))
        })
        .filter(|e| !criteria.official_only || e.is_official)
        .cloned()
        .collect();

    if criteria.sort == SortMode::Recent {
        // Stable sort, newest first. `Option<DateTime>` orders None lowest,
        // so entries missing a timestamp end up last.
        result.sort_by(|a, b| b.repository.last_updated.cmp(&a.repository.last_updated));
    }
    // Default and Popular re-impose nothing: the loader already supplies
    // entries in descending star order, and the "popular off, recent off"
    // state deliberately leaves iteration order untouched.

    result
}

/// Case-insensitive substring match against name, description, or any tag.
fn matches_text(entry: &CatalogEntry, needle_lower: &str) -> bool {
    entry.name.to_lowercase().contains(needle_lower)
        || entry.description.to_lowercase().contains(needle_lower)
        || entry
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle_lower))
}
