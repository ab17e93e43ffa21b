//! Live query filtering over a built [`NameIndex`].

use crate::collate::collation_key;
use crate::types::{CatalogEntry, NameIndex};

/// Case-folds and trims raw query input.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Whether `entry` matches an already normalized query.
pub fn matches(entry: &CatalogEntry, query: &str) -> bool {
    query.is_empty()
        || entry.name.to_lowercase().contains(query)
        || entry
            .items
            .iter()
            .any(|item| item.organisation.to_lowercase().contains(query))
}

/// Returns the entries matching `query` by name or contributing organisation,
/// sorted by name, each with its variants sorted by organisation.
///
/// `query` must already be normalized; an empty query returns every entry.
/// The index is left untouched, so repeated calls give identical output.
pub fn filter(index: &NameIndex, query: &str) -> Vec<CatalogEntry> {
    let mut results: Vec<CatalogEntry> = index
        .entries()
        .filter(|entry| matches(entry, query))
        .cloned()
        .collect();

    for entry in &mut results {
        // Same-organisation duplicates fall back to URL order
        entry
            .items
            .sort_by_cached_key(|v| (collation_key(&v.organisation), v.url.to_string()));
    }
    results.sort_by_cached_key(|entry| collation_key(&entry.name));
    results
}
