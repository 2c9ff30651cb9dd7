//! CLI entry point for the NEO feed aggregator.
//!
//! Provides subcommands for computing the dashboard views for a date range,
//! listing NEO names for autocomplete, and pruning the on-disk view cache.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use neo_aggregator::{
    FilterCriteria, NeoAggregator,
    config::Config,
    infra::cache::FileStore,
    infra::nasa::NasaFeedClient,
    output::{append_record, print_json, print_pretty, print_summary},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "neo_aggregator")]
#[command(about = "Aggregate NASA Near-Earth-Object feeds into dashboard views", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute per-day counts, the largest NEOs and closest approaches
    Views {
        /// First date of the range (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last date of the range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,

        /// Minimum average estimated diameter in km
        #[arg(short = 'd', long, default_value_t = 0.0)]
        min_diameter: f64,

        /// Case-insensitive substring of the NEO name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Optional: CSV file to append per-date rows to
        #[arg(long)]
        csv: Option<String>,

        /// Log the full views as JSON instead of a summary
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the distinct NEO names in a date range
    Names {
        /// First date of the range (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last date of the range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },
    /// Remove expired entries from the view cache file
    PurgeCache,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let config = Config::from_env();

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = config
        .log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = config
        .log_file_path
        .file_name()
        .unwrap_or(OsStr::new("neo_aggregator.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "info"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    if config.uses_demo_key() {
        warn!("NASA_API_KEY not set, using the rate-limited DEMO_KEY");
    }

    let store = FileStore::new(&config.cache_path);

    match cli.command {
        Commands::Views {
            start,
            end,
            min_diameter,
            name,
            csv,
            json,
        } => {
            let source = NasaFeedClient::with_base_url(&config.api_base_url, &config.nasa_api_key)?;
            let aggregator = NeoAggregator::new(source, store);
            let filter = FilterCriteria::new(min_diameter, name);

            let views = aggregator.get_views(start, end, &filter).await?;

            print_pretty(&views);
            if json {
                print_json(&views)?;
            } else {
                print_summary(&views);
            }
            if let Some(path) = csv {
                append_record(&path, &views)?;
                info!(path = %path, rows = views.counts_by_date.len(), "CSV rows appended");
            }
        }
        Commands::Names { start, end } => {
            let source = NasaFeedClient::with_base_url(&config.api_base_url, &config.nasa_api_key)?;
            let aggregator = NeoAggregator::new(source, store);

            let views = aggregator
                .get_views(start, end, &FilterCriteria::default())
                .await?;

            info!(total = views.distinct_names.len(), "NEO names fetched");
            for name in &views.distinct_names {
                println!("{name}");
            }
        }
        Commands::PurgeCache => {
            let removed = store.purge_expired(Utc::now()).await?;
            info!(
                removed,
                path = %store.path().display(),
                "Expired cache entries purged"
            );
        }
    }

    Ok(())
}

/// Reads filter directives from `var`, falling back to `default` when unset or invalid.
fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}
