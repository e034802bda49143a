use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// === Catalog Entry Models ===

/// Source repository details for a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryInfo {
    pub url: String,
    pub owner: String,
    #[serde(default)]
    pub star_count: u64,
    #[serde(default)]
    pub fork_count: u64,
    #[serde(default)]
    pub watcher_count: Option<u64>,
    #[serde(default, rename = "lastUpdatedTimestamp")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// One listed MCP server in the directory.
///
/// Collections default to empty when the dataset omits them, so nothing
/// downstream needs null-checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    pub repository: RepositoryInfo,
    #[serde(default)]
    pub is_official: bool,
}

impl CatalogEntry {
    /// Popularity is derived from the repository star count.
    pub fn popularity(&self) -> u64 {
        self.repository.star_count
    }
}

// === Category Model ===

/// Category metadata from the dataset. `server_count` is denormalized and
/// informational only; membership comes from each entry's `category` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub server_count: u64,
}

// === Filter Models ===

/// Result ordering, selected by the popular/recent quick-filter pair.
///
/// `Popular` and `Recent` behave like radio buttons; `Default` is the state
/// left behind when the active one is toggled off. `Default` and `Popular`
/// are observably the same order, since the loader already supplies entries
/// in descending star order and neither variant re-sorts. The variant only
/// records which badge is lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    Default,
    Popular,
    Recent,
}

impl Default for SortMode {
    /// The browser mounts with the Popular badge lit.
    fn default() -> Self {
        SortMode::Popular
    }
}

/// Ephemeral, client-only filter state: created with defaults when the
/// browsing view mounts, mutated by user input, discarded on unload. Owns
/// no catalog data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Committed (already debounced) search text. Blank performs no
    /// filtering rather than matching nothing.
    pub search: String,
    pub category: Option<String>,
    pub language: Option<String>,
    pub official_only: bool,
    pub sort: SortMode,
}

impl FilterCriteria {
    /// The official badge toggles independently of the sort pair.
    pub fn toggle_official(&mut self) {
        self.official_only = !self.official_only;
    }

    /// Radio semantics: lighting Popular clears Recent; toggling Popular
    /// off lands on `Default`.
    pub fn toggle_popular(&mut self) {
        self.sort = match self.sort {
            SortMode::Popular => SortMode::Default,
            _ => SortMode::Popular,
        };
    }

    /// Radio semantics: lighting Recent clears Popular; toggling Recent off
    /// lands on `Default`.
    pub fn toggle_recent(&mut self) {
        self.sort = match self.sort {
            SortMode::Recent => SortMode::Default,
            _ => SortMode::Recent,
        };
    }

    /// Restore every field to its default, including `sort = Popular`.
    pub fn reset(&mut self) {
        *self = FilterCriteria::default();
    }

    /// True when any field differs from its default. Drives the
    /// "clear all filters" affordance.
    pub fn is_filtering(&self) -> bool {
        *self != FilterCriteria::default()
    }
}

// === Languages (constants) ===

/// Implementation languages offered by the language filter dropdown.
pub const KNOWN_LANGUAGES: &[&str] = &[
    "python",
    "typescript",
    "javascript",
    "go",
    "rust",
    "csharp",
    "java",
    "cpp",
    "ruby",
];
