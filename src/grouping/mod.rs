//! Builds the per-session [`NameIndex`] from raw feed records.
//!
//! Both catalogs group case-insensitively by item name; the first casing
//! seen becomes the display name. They differ in how the variant count is
//! derived, see [`components`] and [`patterns`].

pub mod components;
pub mod patterns;

pub use components::group_components;
pub use patterns::group_patterns;

use crate::error::CatalogError;
use crate::types::{NameIndex, OrgVariantTally};

/// Output of a grouping pass.
#[derive(Debug, Default)]
pub struct GroupedCatalog {
    pub index: NameIndex,
    pub tally: OrgVariantTally,
    /// Variants left out because their URL could not be resolved.
    pub omissions: Vec<CatalogError>,
}

impl GroupedCatalog {
    pub fn is_complete(&self) -> bool {
        self.omissions.is_empty()
    }
}
