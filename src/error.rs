use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("feed '{resource}' unavailable: {reason}")]
    FeedUnavailable { resource: String, reason: String },

    #[error("feed '{resource}' malformed: {reason}")]
    FeedMalformed { resource: String, reason: String },

    #[error("cannot resolve '{href}' for '{name}' ({organisation}): {reason}")]
    UrlResolution {
        organisation: String,
        name: String,
        href: String,
        reason: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Errors that end the session: nothing is rendered after one of these.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CatalogError::FeedUnavailable { .. }
                | CatalogError::FeedMalformed { .. }
                | CatalogError::Http(_)
                | CatalogError::Json(_)
                | CatalogError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_errors_are_terminal_and_url_errors_are_local() {
        let unavailable = CatalogError::FeedUnavailable {
            resource: "components.json".into(),
            reason: "404 Not Found".into(),
        };
        let resolution = CatalogError::UrlResolution {
            organisation: "Acme".into(),
            name: "Forms".into(),
            href: "::".into(),
            reason: "relative URL without a base".into(),
        };

        assert!(unavailable.is_terminal());
        assert!(!resolution.is_terminal());
        assert_eq!(
            unavailable.to_string(),
            "feed 'components.json' unavailable: 404 Not Found"
        );
    }
}
