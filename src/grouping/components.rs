use super::GroupedCatalog;
use crate::error::CatalogError;
use crate::types::{RawComponentRecord, Variant};
use tracing::{info, instrument, warn};
use url::Url;

/// Groups the flat components feed. Every appended variant adds one to the
/// entry's count, so `variant_count == items.len()` holds for every entry.
#[instrument(skip_all, fields(records = records.len()))]
pub fn group_components(records: &[RawComponentRecord]) -> GroupedCatalog {
    let mut grouped = GroupedCatalog::default();

    for record in records {
        let organisation = record.organisation.as_str();
        grouped.tally.ensure(organisation);

        for link in &record.components {
            let entry = grouped.index.entry_or_insert(&link.name, None);

            let url = match Url::parse(&link.url) {
                Ok(url) => url,
                Err(e) => {
                    warn!(organisation, name = %link.name, url = %link.url, "Omitting component with invalid URL");
                    grouped.omissions.push(CatalogError::UrlResolution {
                        organisation: organisation.to_string(),
                        name: link.name.clone(),
                        href: link.url.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            entry.items.push(Variant {
                organisation: organisation.to_string(),
                url,
            });
            entry.variant_count += 1;
            grouped.tally.increment(organisation);
        }
    }

    info!(
        entries = grouped.index.len(),
        organisations = grouped.tally.len(),
        omitted = grouped.omissions.len(),
        "Grouped components"
    );
    grouped
}
