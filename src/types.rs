use crate::constants::{COMPONENTS_FEED, PATTERNS_FEED};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// The two independent catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum CatalogKind {
    Components,
    Patterns,
}

impl CatalogKind {
    pub fn feed_name(self) -> &'static str {
        match self {
            CatalogKind::Components => COMPONENTS_FEED,
            CatalogKind::Patterns => PATTERNS_FEED,
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogKind::Components => write!(f, "components"),
            CatalogKind::Patterns => write!(f, "patterns"),
        }
    }
}

/// One organisation's entry in the components feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawComponentRecord {
    pub organisation: String,
    pub components: Vec<ComponentLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentLink {
    pub name: String,
    pub url: String,
}

/// One organisation's entry in the patterns feed. `url` is the base every
/// link `href` is resolved against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPatternRecord {
    pub name: String,
    pub url: String,
    pub categories: Vec<PatternCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternCategory {
    pub title: String,
    pub links: Vec<PatternLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternLink {
    pub name: String,
    pub href: String,
}

/// One organisation's contribution to a named entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    pub organisation: String,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    pub items: Vec<Variant>,
    pub variant_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, category: Option<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            variant_count: 0,
            category,
        }
    }
}

/// Grouping key shared by every catalog: names differing only by case collapse.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Lowercased display name to entry. Built once per session, read-only after.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameIndex {
    entries: HashMap<String, CatalogEntry>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks an entry up by display name, in any casing.
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(&name_key(name))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Returns the entry for `name`, creating it with `name`'s casing on first sight.
    pub(crate) fn entry_or_insert(
        &mut self,
        name: &str,
        category: Option<&str>,
    ) -> &mut CatalogEntry {
        self.entries
            .entry(name_key(name))
            .or_insert_with(|| CatalogEntry::new(name, category.map(str::to_string)))
    }
}

/// Items (or links) contributed per organisation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgVariantTally {
    counts: HashMap<String, usize>,
}

impl OrgVariantTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, organisation: &str) -> Option<usize> {
        self.counts.get(organisation).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(org, count)| (org.as_str(), *count))
    }

    pub(crate) fn ensure(&mut self, organisation: &str) {
        self.counts.entry(organisation.to_string()).or_insert(0);
    }

    pub(crate) fn increment(&mut self, organisation: &str) {
        *self.counts.entry(organisation.to_string()).or_insert(0) += 1;
    }
}
