use crate::config::LoggingConfig;
use std::fs;
use std::io;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "design_catalog=info";

/// The configured log directory, created if needed.
fn log_directory(config: &LoggingConfig) -> Result<Option<&str>, (&str, io::Error)> {
    match config.directory.as_deref() {
        Some(dir) => fs::create_dir_all(dir).map(|_| Some(dir)).map_err(|e| (dir, e)),
        None => Ok(None),
    }
}

/// Initializes console logging, plus a daily-rolling JSON file when a log
/// directory is configured.
///
/// The returned guard flushes the file writer on drop; keep it alive until exit.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let directive: Directive = DEFAULT_DIRECTIVE
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    let filter = EnvFilter::from_default_env().add_directive(directive);

    // Console output goes to stderr so rendered catalogs stay clean on stdout
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard, dir_error) = match log_directory(config) {
        Ok(Some(dir)) => {
            let file_appender = tracing_appender::rolling::daily(dir, &config.file_name);
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().json().with_writer(non_blocking_writer);
            (Some(layer), Some(guard), None)
        }
        Ok(None) => (None, None, None),
        Err(e) => (None, None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    if let Some((dir, e)) = dir_error {
        warn!("Cannot create log directory '{}', logging to console only: {}", dir, e);
    }

    guard
}
