//! Turns raw feed bytes into typed per-organisation records.
//!
//! A feed that is not JSON, or whose top level has the wrong shape, is
//! rejected outright. Individual records that violate the data contract are
//! skipped and reported so the rest of the catalog still loads.

use crate::constants::PATTERNS_ENVELOPE_KEY;
use crate::error::{CatalogError, Result};
use crate::types::{RawComponentRecord, RawPatternRecord};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// A record shape that can appear in a feed.
pub trait FeedRecord: DeserializeOwned {
    /// Name of the contributing organisation.
    fn organisation(&self) -> &str;
}

impl FeedRecord for RawComponentRecord {
    fn organisation(&self) -> &str {
        &self.organisation
    }
}

impl FeedRecord for RawPatternRecord {
    fn organisation(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Zero-based position of the record within the feed.
    pub position: usize,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ParsedFeed<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedRecord>,
}

pub fn parse_component_feed(resource: &str, bytes: &[u8]) -> Result<ParsedFeed<RawComponentRecord>> {
    let value = parse_json(resource, bytes)?;
    match value {
        Value::Array(items) => Ok(parse_records(resource, items)),
        other => Err(malformed(
            resource,
            format!("expected an array of organisations, found {}", kind_of(&other)),
        )),
    }
}

pub fn parse_pattern_feed(resource: &str, bytes: &[u8]) -> Result<ParsedFeed<RawPatternRecord>> {
    let mut value = parse_json(resource, bytes)?;
    match value.get_mut(PATTERNS_ENVELOPE_KEY).map(Value::take) {
        Some(Value::Array(items)) => Ok(parse_records(resource, items)),
        Some(other) => Err(malformed(
            resource,
            format!("'{PATTERNS_ENVELOPE_KEY}' must be an array, found {}", kind_of(&other)),
        )),
        None => Err(malformed(
            resource,
            format!("missing top-level '{PATTERNS_ENVELOPE_KEY}'"),
        )),
    }
}

fn parse_json(resource: &str, bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|e| malformed(resource, e.to_string()))
}

fn parse_records<T: FeedRecord>(resource: &str, items: Vec<Value>) -> ParsedFeed<T> {
    let mut records = Vec::with_capacity(items.len());
    let mut skipped = Vec::new();

    for (position, item) in items.into_iter().enumerate() {
        let reason = match serde_json::from_value::<T>(item) {
            Ok(record) if record.organisation().trim().is_empty() => {
                "organisation name is empty".to_string()
            }
            Ok(record) => {
                records.push(record);
                continue;
            }
            Err(e) => e.to_string(),
        };
        warn!(resource, position, %reason, "Skipping record that violates the feed contract");
        skipped.push(SkippedRecord { position, reason });
    }

    debug!(
        resource,
        records = records.len(),
        skipped = skipped.len(),
        "Parsed feed"
    );
    ParsedFeed { records, skipped }
}

fn malformed(resource: &str, reason: String) -> CatalogError {
    CatalogError::FeedMalformed {
        resource: resource.to_string(),
        reason,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn component_feed_parses_flat_records() {
        let bytes = serde_json::to_vec(&json!([
            { "organisation": "Acme", "components": [{ "name": "Logger", "url": "https://acme.example/log" }] },
            { "organisation": "Globex", "components": [] }
        ]))
        .unwrap();

        let feed = parse_component_feed("components.json", &bytes).unwrap();
        assert_eq!(feed.records.len(), 2);
        assert!(feed.skipped.is_empty());
        assert_eq!(feed.records[0].components[0].name, "Logger");
    }

    #[test]
    fn record_missing_a_field_is_skipped_not_fatal() {
        let bytes = serde_json::to_vec(&json!([
            { "organisation": "Acme", "components": [{ "name": "Logger" }] },
            { "organisation": "", "components": [] },
            { "organisation": "Globex", "components": [{ "name": "Tabs", "url": "https://globex.example/tabs" }] }
        ]))
        .unwrap();

        let feed = parse_component_feed("components.json", &bytes).unwrap();
        assert_eq!(feed.records.len(), 1);
        assert_eq!(feed.records[0].organisation, "Globex");
        let positions: Vec<usize> = feed.skipped.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0, 1]);
        assert!(feed.skipped[0].reason.contains("url"));
    }

    #[test]
    fn non_json_is_malformed() {
        let err = parse_component_feed("components.json", b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, CatalogError::FeedMalformed { .. }));
    }

    #[test]
    fn component_feed_must_be_an_array() {
        let err = parse_component_feed("components.json", br#"{"organisation":"Acme"}"#).unwrap_err();
        assert!(err.to_string().contains("found an object"));
    }

    #[test]
    fn pattern_feed_reads_organisations_envelope() {
        let bytes = serde_json::to_vec(&json!({
            "organisations": [{
                "name": "Acme",
                "url": "https://acme.example/patterns/",
                "categories": [{ "title": "Forms", "links": [{ "name": "Address", "href": "forms/address" }] }]
            }]
        }))
        .unwrap();

        let feed = parse_pattern_feed("patterns.json", &bytes).unwrap();
        assert_eq!(feed.records.len(), 1);
        assert_eq!(feed.records[0].categories[0].links[0].href, "forms/address");
    }

    #[test]
    fn pattern_feed_without_envelope_is_malformed() {
        let err = parse_pattern_feed("patterns.json", b"[]").unwrap_err();
        assert!(matches!(err, CatalogError::FeedMalformed { .. }));
        assert!(err.to_string().contains("organisations"));
    }
}
