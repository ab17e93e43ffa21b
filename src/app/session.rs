use crate::app::ports::{FeedSourcePort, RendererPort};
use crate::error::{CatalogError, Result};
use crate::feed::{parse_component_feed, parse_pattern_feed, SkippedRecord};
use crate::grouping::{group_components, group_patterns, GroupedCatalog};
use crate::search::{filter, normalize_query};
use crate::types::{CatalogEntry, CatalogKind, NameIndex, OrgVariantTally};
use std::io::BufRead;
use tracing::{debug, error, info, instrument, warn};

/// One catalog page session: the index is built once on load and only read
/// afterwards. Query changes filter the built index and never touch the feed.
#[derive(Debug)]
pub struct CatalogSession {
    kind: CatalogKind,
    index: NameIndex,
    tally: OrgVariantTally,
    omissions: Vec<CatalogError>,
    skipped: Vec<SkippedRecord>,
}

impl CatalogSession {
    /// Fetches, parses and groups the feed. Feed-level failures are returned
    /// and no session exists, so nothing can be rendered.
    #[instrument(skip(source), fields(resource = source.resource()))]
    pub async fn load(kind: CatalogKind, source: &dyn FeedSourcePort) -> Result<Self> {
        let bytes = source.fetch().await.map_err(|e| {
            error!("Failed to fetch {} feed: {}", kind, e);
            e
        })?;
        Self::from_bytes(kind, source.resource(), &bytes)
    }

    pub fn from_bytes(kind: CatalogKind, resource: &str, bytes: &[u8]) -> Result<Self> {
        let (grouped, skipped) = match kind {
            CatalogKind::Components => {
                let feed = parse_component_feed(resource, bytes)?;
                (group_components(&feed.records), feed.skipped)
            }
            CatalogKind::Patterns => {
                let feed = parse_pattern_feed(resource, bytes)?;
                (group_patterns(&feed.records), feed.skipped)
            }
        };
        Ok(Self::from_grouped(kind, grouped, skipped))
    }

    pub fn from_grouped(kind: CatalogKind, grouped: GroupedCatalog, skipped: Vec<SkippedRecord>) -> Self {
        if !grouped.is_complete() {
            warn!(
                catalog = %kind,
                omitted = grouped.omissions.len(),
                "Some variants were left out of the catalog"
            );
        }
        info!(
            catalog = %kind,
            entries = grouped.index.len(),
            omitted = grouped.omissions.len(),
            skipped = skipped.len(),
            "Catalog session ready"
        );
        Self {
            kind,
            index: grouped.index,
            tally: grouped.tally,
            omissions: grouped.omissions,
            skipped,
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn index(&self) -> &NameIndex {
        &self.index
    }

    pub fn tally(&self) -> &OrgVariantTally {
        &self.tally
    }

    pub fn omissions(&self) -> &[CatalogError] {
        &self.omissions
    }

    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    /// Filters against raw user input.
    pub fn search(&self, raw_query: &str) -> Vec<CatalogEntry> {
        filter(&self.index, &normalize_query(raw_query))
    }

    pub fn render_all(&self, renderer: &mut dyn RendererPort) -> Result<usize> {
        self.on_query_change("", renderer)
    }

    /// Handles one query-change event. Returns how many entries were rendered.
    pub fn on_query_change(&self, raw_query: &str, renderer: &mut dyn RendererPort) -> Result<usize> {
        let entries = self.search(raw_query);
        debug!(query = raw_query.trim(), matches = entries.len(), "Rendering filtered catalog");
        renderer.render(self.kind, &entries)?;
        Ok(entries.len())
    }

    /// Renders everything, then treats each input line as a new query until
    /// the input ends.
    pub fn run_interactive<R: BufRead>(&self, input: R, renderer: &mut dyn RendererPort) -> Result<()> {
        self.render_all(renderer)?;
        for line in input.lines() {
            let line = line?;
            self.on_query_change(&line, renderer)?;
        }
        Ok(())
    }
}
