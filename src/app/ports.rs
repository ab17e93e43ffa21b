use crate::error::Result;
use crate::types::{CatalogEntry, CatalogKind};
use async_trait::async_trait;

/// Retrieves the raw bytes of one catalog feed.
#[async_trait]
pub trait FeedSourcePort: Send + Sync {
    /// Human-readable location, used in errors and logs.
    fn resource(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<u8>>;
}

/// Presents an already ordered, filtered sequence of entries.
///
/// Implementations must not re-sort, re-filter or alter counts.
pub trait RendererPort {
    fn render(&mut self, kind: CatalogKind, entries: &[CatalogEntry]) -> Result<()>;
}
