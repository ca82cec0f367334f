//! Quick search and featured listings.

use crate::catalog::CatalogRecord;
use crate::ids::CategoryId;
use crate::search::compare_names;
use serde::{Deserialize, Serialize};

/// Products shown per category on the home page.
pub const FEATURED_LIMIT: usize = 8;

/// Quick-search dropdown settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestSettings {
    /// Terms shorter than this (in characters) yield nothing.
    pub min_chars: usize,
    /// Maximum number of suggestions.
    pub limit: usize,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            min_chars: 2,
            limit: 5,
        }
    }
}

/// Records whose name starts with `term`, ignoring case, ordered by name.
pub fn suggest<'a>(
    records: &'a [CatalogRecord],
    term: &str,
    settings: &SuggestSettings,
) -> Vec<&'a CatalogRecord> {
    let term = term.trim();
    if term.chars().count() < settings.min_chars {
        return Vec::new();
    }
    let prefix = term.to_lowercase();

    let mut hits: Vec<&CatalogRecord> = records
        .iter()
        .filter(|r| r.name.to_lowercase().starts_with(&prefix))
        .collect();
    hits.sort_by(|a, b| compare_names(&a.name, &b.name));
    hits.truncate(settings.limit);
    hits
}

/// The first `limit` records of a category, in snapshot order.
pub fn featured<'a>(
    records: &'a [CatalogRecord],
    category: &CategoryId,
    limit: usize,
) -> Vec<&'a CatalogRecord> {
    records
        .iter()
        .filter(|r| &r.category == category)
        .take(limit)
        .collect()
}
