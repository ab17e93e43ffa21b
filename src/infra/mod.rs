pub mod feed_source;
pub mod harvest;
pub mod render;

#[cfg(test)]
pub(crate) mod test_http;

pub use feed_source::{feed_source, FeedLocation, FileFeed, ReqwestFeed};
pub use render::{JsonRenderer, TextRenderer};
