use super::GroupedCatalog;
use crate::error::CatalogError;
use crate::types::{name_key, RawPatternRecord, Variant};
use std::collections::HashMap;
use tracing::{info, instrument, warn};
use url::Url;

/// Counts every link occurrence per lowercased name across all organisations
/// and categories.
pub fn count_occurrences(records: &[RawPatternRecord]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for link in records
        .iter()
        .flat_map(|r| &r.categories)
        .flat_map(|c| &c.links)
    {
        *counts.entry(name_key(&link.name)).or_insert(0) += 1;
    }
    counts
}

/// Resolves a link `href` against its organisation's base URL.
pub fn resolve_link(base: &str, href: &str) -> Result<Url, url::ParseError> {
    Url::parse(base)?.join(href)
}

/// Groups the nested patterns feed.
///
/// An entry's count is the global occurrence count for its name, so it stays
/// correct when a link fails to resolve or one organisation lists the same
/// pattern under several categories. `category` ends up holding the last
/// category title the name was seen under.
#[instrument(skip_all, fields(records = records.len()))]
pub fn group_patterns(records: &[RawPatternRecord]) -> GroupedCatalog {
    let occurrences = count_occurrences(records);
    let mut grouped = GroupedCatalog::default();

    for record in records {
        let organisation = record.name.as_str();
        grouped.tally.ensure(organisation);

        for category in &record.categories {
            for link in &category.links {
                let entry = grouped
                    .index
                    .entry_or_insert(&link.name, Some(&category.title));
                entry.category = Some(category.title.clone());
                entry.variant_count = occurrences
                    .get(&name_key(&link.name))
                    .copied()
                    .unwrap_or_default();

                match resolve_link(&record.url, &link.href) {
                    Ok(url) => {
                        entry.items.push(Variant {
                            organisation: organisation.to_string(),
                            url,
                        });
                        grouped.tally.increment(organisation);
                    }
                    Err(e) => {
                        warn!(organisation, name = %link.name, href = %link.href, base = %record.url, "Omitting pattern link that cannot be resolved");
                        grouped.omissions.push(CatalogError::UrlResolution {
                            organisation: organisation.to_string(),
                            name: link.name.clone(),
                            href: link.href.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }
    }

    info!(
        entries = grouped.index.len(),
        organisations = grouped.tally.len(),
        omitted = grouped.omissions.len(),
        "Grouped patterns"
    );
    grouped
}
