use crate::app::ports::FeedSourcePort;
use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Where a feed lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    Remote(Url),
    Local(PathBuf),
}

fn is_remote(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

impl FeedLocation {
    /// Interprets `target` as the full location of a feed.
    pub fn parse(target: &str) -> Result<Self> {
        if is_remote(target) {
            let url = Url::parse(target)
                .map_err(|e| CatalogError::Config(format!("invalid feed URL '{target}': {e}")))?;
            Ok(FeedLocation::Remote(url))
        } else {
            Ok(FeedLocation::Local(PathBuf::from(target)))
        }
    }

    /// Places the `resource` file name under a directory or URL base.
    pub fn resolve(base: &str, resource: &str) -> Result<Self> {
        if is_remote(base) {
            let mut base = base.to_string();
            if !base.ends_with('/') {
                base.push('/');
            }
            let url = Url::parse(&base)
                .and_then(|b| b.join(resource))
                .map_err(|e| CatalogError::Config(format!("invalid feed base '{base}': {e}")))?;
            Ok(FeedLocation::Remote(url))
        } else {
            Ok(FeedLocation::Local(PathBuf::from(base).join(resource)))
        }
    }
}

impl std::fmt::Display for FeedLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedLocation::Remote(url) => write!(f, "{url}"),
            FeedLocation::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

pub fn feed_source(location: FeedLocation, timeout: Duration) -> Result<Box<dyn FeedSourcePort>> {
    Ok(match location {
        FeedLocation::Remote(url) => Box::new(ReqwestFeed::new(url, timeout)?),
        FeedLocation::Local(path) => Box::new(FileFeed::new(path)),
    })
}

pub struct ReqwestFeed {
    client: reqwest::Client,
    url: Url,
    resource: String,
}

impl ReqwestFeed {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: Url) -> Self {
        Self {
            client,
            resource: url.to_string(),
            url,
        }
    }
}

#[async_trait]
impl FeedSourcePort for ReqwestFeed {
    fn resource(&self) -> &str {
        &self.resource
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<u8>> {
        let unavailable = |reason: String| CatalogError::FeedUnavailable {
            resource: self.resource.clone(),
            reason,
        };

        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(unavailable(format!("HTTP status {status}")));
        }

        let bytes = resp.bytes().await.map_err(|e| unavailable(e.to_string()))?;
        debug!(bytes = bytes.len(), "Fetched feed");
        Ok(bytes.to_vec())
    }
}

pub struct FileFeed {
    path: PathBuf,
    resource: String,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            resource: path.display().to_string(),
            path,
        }
    }
}

#[async_trait]
impl FeedSourcePort for FileFeed {
    fn resource(&self) -> &str {
        &self.resource
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| CatalogError::FeedUnavailable {
                resource: self.resource.clone(),
                reason: e.to_string(),
            })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Read feed file");
        Ok(bytes)
    }
}
