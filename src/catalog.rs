use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{CatalogEntry, Category};

/// Default dataset location, relative to the working directory.
const DEFAULT_CATALOG_PATH: &str = "mcp-servers-database.json";

/// Errors raised while loading the catalog dataset.
///
/// Load time is the only fallible boundary: filtering, windowing, and
/// formatting over a loaded catalog never return errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Wire shape of the dataset file: a category map keyed by category name,
/// plus the server array. Both sections tolerate being absent.
#[derive(Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    categories: BTreeMap<String, Category>,
    #[serde(default)]
    servers: Vec<CatalogEntry>,
}

/// The full, immutable catalog snapshot: category metadata plus every entry,
/// baseline-ordered by descending star count.
///
/// Loaded once at startup and shared by reference. Nothing in this crate
/// mutates it after construction; all filtering and sorting operate on
/// copies.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    entries: Arc<[CatalogEntry]>,
}

impl Catalog {
    /// Load the dataset from the path in `CATALOG_PATH`, falling back to
    /// `mcp-servers-database.json`.
    pub fn load() -> Result<Self, CatalogError> {
        dotenvy::dotenv().ok();

        let path =
            std::env::var("CATALOG_PATH").unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string());
        Self::load_from_path(&path)
    }

    /// Load the dataset from an explicit path.
    /// Prefer this over `load()` in tests to avoid process-global env var races.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse and normalize a dataset document.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(raw)?;

        let categories: Vec<Category> = doc
            .categories
            .into_iter()
            .map(|(key, mut category)| {
                if category.name.is_empty() {
                    category.name = key;
                }
                if category.label.is_empty() {
                    category.label = category.name.clone();
                }
                category
            })
            .collect();

        // Canonical baseline order: descending star count. The sort is
        // stable, so entries with equal stars keep their document order.
        let mut entries = doc.servers;
        entries.sort_by(|a, b| b.repository.star_count.cmp(&a.repository.star_count));

        log::info!(
            "catalog loaded: {} entries, {} categories",
            entries.len(),
            categories.len()
        );

        Ok(Self {
            categories,
            entries: entries.into(),
        })
    }

    /// All entries in baseline (star-descending) order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// A shared handle to the entry array, for handing to a browser.
    pub fn shared_entries(&self) -> Arc<[CatalogEntry]> {
        Arc::clone(&self.entries)
    }

    /// Category metadata in dataset order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a single entry by its stable id.
    pub fn find(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries belonging to one category, in baseline order.
    pub fn entries_in_category(&self, category: &str) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }
}
