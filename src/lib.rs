pub mod collate;
pub mod config;
pub mod constants;
pub mod error;
pub mod feed;
pub mod grouping;
pub mod logging;
pub mod search;
pub mod types;

// Session orchestration and its adapters
pub mod app;
pub mod infra;
