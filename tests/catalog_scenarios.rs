use design_catalog::app::CatalogSession;
use design_catalog::infra::{FileFeed, TextRenderer};
use design_catalog::search::filter;
use design_catalog::types::CatalogKind;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use tempfile::tempdir;

fn components_feed() -> Vec<u8> {
    serde_json::to_vec(&json!([
        { "organisation": "Globex", "components": [{ "name": "logger", "url": "https://globex/log" }] },
        { "organisation": "Acme", "components": [{ "name": "Logger", "url": "https://acme/log" }] }
    ]))
    .unwrap()
}

#[test]
fn logger_from_two_organisations_becomes_one_entry() {
    let bytes = serde_json::to_vec(&json!([
        { "organisation": "Acme", "components": [{ "name": "Logger", "url": "https://acme/log" }] },
        { "organisation": "Globex", "components": [{ "name": "logger", "url": "https://globex/log" }] }
    ]))
    .unwrap();
    let session = CatalogSession::from_bytes(CatalogKind::Components, "components.json", &bytes).unwrap();

    let all = filter(session.index(), "");
    assert_eq!(all.len(), 1);
    let entry = &all[0];
    assert_eq!(entry.name, "Logger");
    assert_eq!(entry.variant_count, 2);
    let orgs: Vec<&str> = entry.items.iter().map(|v| v.organisation.as_str()).collect();
    assert_eq!(orgs, vec!["Acme", "Globex"]);
    assert_eq!(entry.items[0].url.as_str(), "https://acme/log");

    assert_eq!(filter(session.index(), "glob"), all);
}

#[test]
fn pattern_links_resolve_against_organisation_base() {
    let bytes = serde_json::to_vec(&json!({
        "organisations": [{
            "name": "Org",
            "url": "https://org.example/patterns/",
            "categories": [{ "title": "Forms", "links": [{ "name": "Input", "href": "forms/input" }] }]
        }]
    }))
    .unwrap();
    let session = CatalogSession::from_bytes(CatalogKind::Patterns, "patterns.json", &bytes).unwrap();

    let entry = session.index().get("input").unwrap();
    assert_eq!(entry.items[0].url.as_str(), "https://org.example/patterns/forms/input");
    assert_eq!(entry.category.as_deref(), Some("Forms"));
}

#[test]
fn organisation_query_matches_partial_name() {
    let bytes = serde_json::to_vec(&json!([
        { "organisation": "Acme Corp", "components": [{ "name": "Tabs", "url": "https://acme.example/tabs" }] },
        { "organisation": "Globex", "components": [{ "name": "Header", "url": "https://globex.example/header" }] }
    ]))
    .unwrap();
    let session = CatalogSession::from_bytes(CatalogKind::Components, "components.json", &bytes).unwrap();

    let names: Vec<String> = session.search("  ACME ").into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["Tabs".to_string()]);
}

#[tokio::test]
async fn file_backed_session_renders_sorted_text() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("components.json");
    fs::write(&path, components_feed()).unwrap();

    let session = CatalogSession::load(CatalogKind::Components, &FileFeed::new(&path))
        .await
        .unwrap();
    let mut renderer = TextRenderer::new(Vec::new());
    let shown = session.render_all(&mut renderer).unwrap();

    assert_eq!(shown, 1);
    let text = String::from_utf8(renderer.into_inner()).unwrap();
    assert_eq!(
        text,
        "== 1 components ==\n\nlogger\nnumber of variant(s) 2\n  - Acme <https://acme/log>\n  - Globex <https://globex/log>\n"
    );
    assert_eq!(session.tally().get("Acme"), Some(1));
}

#[tokio::test]
async fn unreadable_feed_leaves_nothing_to_render() {
    let dir = tempdir().unwrap();
    let err = CatalogSession::load(CatalogKind::Patterns, &FileFeed::new(dir.path().join("patterns.json")))
        .await
        .unwrap_err();
    assert!(err.is_terminal());
}
