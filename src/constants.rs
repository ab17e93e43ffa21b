/// Feed resource names, resolved against the configured feed base.
pub const COMPONENTS_FEED: &str = "components.json";
pub const PATTERNS_FEED: &str = "patterns.json";

/// Key wrapping the organisation list in the patterns feed.
pub const PATTERNS_ENVELOPE_KEY: &str = "organisations";

pub const DEFAULT_CONFIG_PATH: &str = "catalog.toml";
pub const DEFAULT_LOG_FILE: &str = "design_catalog.log";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// Side navigation of the ONS design system documentation pages
pub const DEFAULT_NAV_SELECTOR: &str =
    "ul.ons-section-nav__list li.ons-section-nav__item a.ons-section-nav__link";
