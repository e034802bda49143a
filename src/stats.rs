//! Aggregate statistics over a catalog snapshot, for the directory's
//! headline sections.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::models::Category;

/// How many categories the top-categories list keeps.
const TOP_CATEGORY_COUNT: usize = 5;

/// Summary numbers derived from one catalog snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub total_entries: usize,
    pub total_categories: usize,
    /// Distinct implementation languages across all entries.
    pub total_languages: usize,
    pub official_count: usize,
    /// The largest categories by denormalized entry count, descending.
    pub top_categories: Vec<Category>,
}

/// Derive headline statistics from a catalog.
pub fn catalog_stats(catalog: &Catalog) -> CatalogStats {
    let mut languages: BTreeSet<&str> = BTreeSet::new();
    for entry in catalog.entries() {
        for language in &entry.languages {
            languages.insert(language.as_str());
        }
    }

    let mut top: Vec<Category> = catalog.categories().to_vec();
    top.sort_by(|a, b| b.server_count.cmp(&a.server_count));
    top.truncate(TOP_CATEGORY_COUNT);

    CatalogStats {
        total_entries: catalog.len(),
        total_categories: catalog.categories().len(),
        total_languages: languages.len(),
        official_count: catalog
            .entries()
            .iter()
            .filter(|e| e.is_official)
            .count(),
        top_categories: top,
    }
}
