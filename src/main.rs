use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use design_catalog::app::ports::RendererPort;
use design_catalog::app::CatalogSession;
use design_catalog::collate::locale_cmp;
use design_catalog::config::Config;
use design_catalog::constants::DEFAULT_NAV_SELECTOR;
use design_catalog::infra::harvest::fetch_and_harvest;
use design_catalog::infra::{feed_source, FeedLocation, JsonRenderer, TextRenderer};
use design_catalog::logging;
use design_catalog::types::CatalogKind;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};
use url::Url;

#[derive(Parser)]
#[command(name = "design_catalog")]
#[command(about = "Browse design-system components and patterns shared across organisations")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults apply when it does not exist)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog entries, optionally filtered
    Show {
        #[arg(value_enum)]
        catalog: CatalogKind,
        /// Feed file or URL (defaults to the catalog's feed under the configured base)
        #[arg(long)]
        feed: Option<String>,
        /// Show only entries whose name or organisation contains this text
        #[arg(long, conflicts_with = "interactive")]
        query: Option<String>,
        /// Read queries from stdin, one per line, re-rendering after each
        #[arg(long)]
        interactive: bool,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Count the items each organisation contributes
    Tally {
        #[arg(value_enum)]
        catalog: CatalogKind,
        #[arg(long)]
        feed: Option<String>,
    },
    /// Build a components record from a documentation page's navigation
    Harvest {
        #[arg(long)]
        url: String,
        #[arg(long)]
        organisation: String,
        #[arg(long, default_value = DEFAULT_NAV_SELECTOR)]
        selector: String,
    },
}

async fn load_session(config: &Config, catalog: CatalogKind, feed: Option<&str>) -> anyhow::Result<CatalogSession> {
    let location = match feed {
        Some(target) => FeedLocation::parse(target)?,
        None => FeedLocation::resolve(&config.feeds.base, catalog.feed_name())?,
    };
    info!(%catalog, %location, "Loading catalog");

    let source = feed_source(location, Duration::from_secs(config.feeds.timeout_seconds))?;
    let session = CatalogSession::load(catalog, source.as_ref()).await?;

    for omission in session.omissions() {
        warn!("Omitted variant: {}", omission);
    }
    for skipped in session.skipped() {
        warn!("Skipped record #{}: {}", skipped.position, skipped.reason);
    }
    Ok(session)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;
    let _log_guard = logging::init_logging(&config.logging);

    match cli.command {
        Commands::Show {
            catalog,
            feed,
            query,
            interactive,
            format,
        } => {
            let session = match load_session(&config, catalog, feed.as_deref()).await {
                Ok(session) => session,
                Err(e) => {
                    error!("Catalog unavailable: {:#}", e);
                    return Err(e);
                }
            };

            let stdout = io::stdout();
            let mut renderer: Box<dyn RendererPort> = match format {
                OutputFormat::Text => Box::new(TextRenderer::new(stdout.lock())),
                OutputFormat::Json => Box::new(JsonRenderer::new(stdout.lock())),
            };

            if interactive {
                session.run_interactive(io::stdin().lock(), renderer.as_mut())?;
            } else {
                let shown = session.on_query_change(query.as_deref().unwrap_or_default(), renderer.as_mut())?;
                info!(shown, "Rendered catalog");
            }
        }
        Commands::Tally { catalog, feed } => {
            let session = load_session(&config, catalog, feed.as_deref()).await?;
            let mut rows: Vec<(&str, usize)> = session.tally().iter().collect();
            rows.sort_by(|a, b| locale_cmp(a.0, b.0));
            for (organisation, count) in rows {
                println!("{count:>5}  {organisation}");
            }
        }
        Commands::Harvest {
            url,
            organisation,
            selector,
        } => {
            let page_url = Url::parse(&url).with_context(|| format!("invalid page URL '{url}'"))?;
            let record = fetch_and_harvest(
                &page_url,
                &selector,
                &organisation,
                Duration::from_secs(config.feeds.timeout_seconds),
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}
