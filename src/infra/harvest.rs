//! Harvests a component list from a design-system documentation page.
//!
//! The page's side navigation links become one flat components record for
//! the given organisation, ready to append to a components feed.

use crate::error::{CatalogError, Result};
use crate::types::{ComponentLink, RawComponentRecord};
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Extracts `(name, absolute url)` pairs from every element matching `selector`.
pub fn harvest_navigation(
    html: &str,
    page_url: &Url,
    selector: &str,
    organisation: &str,
) -> Result<RawComponentRecord> {
    let link_selector = Selector::parse(selector)
        .map_err(|e| CatalogError::Config(format!("invalid selector '{selector}': {e}")))?;
    let document = Html::parse_document(html);

    let mut components = Vec::new();
    for element in document.select(&link_selector) {
        let name = element.text().collect::<Vec<_>>().join(" ");
        let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
        let Some(href) = element.value().attr("href") else {
            debug!(%name, "Navigation link without href");
            continue;
        };
        if name.is_empty() {
            continue;
        }

        match page_url.join(href) {
            Ok(url) => components.push(ComponentLink {
                name,
                url: url.to_string(),
            }),
            Err(e) => warn!(%name, href, "Skipping navigation link: {}", e),
        }
    }

    info!(organisation, components = components.len(), "Harvested navigation links");
    Ok(RawComponentRecord {
        organisation: organisation.to_string(),
        components,
    })
}

/// Fetches `page_url` and harvests its navigation.
#[instrument(skip(selector))]
pub async fn fetch_and_harvest(
    page_url: &Url,
    selector: &str,
    organisation: &str,
    timeout: Duration,
) -> Result<RawComponentRecord> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    harvest_page(&client, page_url, selector, organisation).await
}

/// Harvests `page_url` using an existing client.
pub async fn harvest_page(
    client: &reqwest::Client,
    page_url: &Url,
    selector: &str,
    organisation: &str,
) -> Result<RawComponentRecord> {
    let unavailable = |reason: String| CatalogError::FeedUnavailable {
        resource: page_url.to_string(),
        reason,
    };

    let resp = client
        .get(page_url.clone())
        .send()
        .await
        .map_err(|e| unavailable(e.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(unavailable(format!("HTTP status {status}")));
    }
    let html = resp.text().await.map_err(|e| unavailable(e.to_string()))?;

    harvest_navigation(&html, page_url, selector, organisation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_NAV_SELECTOR;
    use crate::infra::test_http::{local_client, serve_once};

    const PAGE: &str = r#"
        <html><body>
          <nav>
            <ul class="ons-section-nav__list">
              <li class="ons-section-nav__item">
                <a class="ons-section-nav__link" href="/design-system/components/accordion">Accordion</a>
              </li>
              <li class="ons-section-nav__item">
                <a class="ons-section-nav__link" href="back-to-top">
                  Back to
                  top
                </a>
              </li>
              <li class="ons-section-nav__item">
                <a class="ons-section-nav__link">No link</a>
              </li>
            </ul>
          </nav>
          <a class="ons-section-nav__link" href="/elsewhere">Outside the list</a>
        </body></html>
    "#;

    #[test]
    fn harvests_nav_links_with_resolved_urls() {
        let page = Url::parse("https://service-manual.example/design-system/components").unwrap();
        let record = harvest_navigation(PAGE, &page, DEFAULT_NAV_SELECTOR, "ONS").unwrap();

        assert_eq!(record.organisation, "ONS");
        assert_eq!(
            record.components,
            vec![
                ComponentLink {
                    name: "Accordion".into(),
                    url: "https://service-manual.example/design-system/components/accordion".into(),
                },
                ComponentLink {
                    name: "Back to top".into(),
                    url: "https://service-manual.example/design-system/back-to-top".into(),
                },
            ]
        );
    }

    #[test]
    fn invalid_selector_is_a_config_error() {
        let page = Url::parse("https://service-manual.example/").unwrap();
        let err = harvest_navigation(PAGE, &page, "ul[[", "ONS").unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[tokio::test]
    async fn served_page_is_harvested() {
        let page = serve_once("200 OK", PAGE).await;
        let record = harvest_page(&local_client(), &page, DEFAULT_NAV_SELECTOR, "ONS")
            .await
            .unwrap();

        assert_eq!(record.components.len(), 2);
        assert_eq!(record.components[0].url, page.join("/design-system/components/accordion").unwrap().to_string());
    }

    #[tokio::test]
    async fn missing_page_is_unavailable_and_terminal() {
        let page = serve_once("404 Not Found", "gone").await;
        let err = harvest_page(&local_client(), &page, DEFAULT_NAV_SELECTOR, "ONS")
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::FeedUnavailable { .. }));
        assert!(err.is_terminal());
    }
}
