//! Geofill: enrich a CSV of coordinates with country names.

use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use geofill_core::config::API_KEY_VAR;
use geofill_core::EnrichConfig;

/// Persistent append-only log next to the console output.
const LOG_FILE: &str = "debug.log";

/// Console plus file sinks. Logging must never stop the pipeline: when the
/// log file cannot be opened, the console sink alone is used.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = tracing_subscriber::fmt::layer();
    let registry = tracing_subscriber::registry().with(filter).with(console);

    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
    {
        Ok(file) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            registry.with(file_layer).init();
        }
        Err(_) => registry.init(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        error!("Error loading command line arguments");
        eprintln!("Usage: geofill <input-file> [use-api-key: y]");
        std::process::exit(1);
    }

    let input = PathBuf::from(&args[1]);
    let use_api_key = args.get(2).map(|v| v == "y").unwrap_or(false);

    let config = EnrichConfig::from_env(use_api_key);
    if use_api_key && config.api_key.is_none() {
        warn!("{} not set; falling back to paced unauthenticated mode", API_KEY_VAR);
    }

    let report = geofill_pipeline::run(&input, config)
        .await
        .map_err(|e| anyhow::anyhow!("Enrichment failed: {}", e))?;

    info!(
        "Done: {}/{} records terminal ({} prefilled, {} local, {} remote, {} without result, {} given up){}",
        report.completed(),
        report.total,
        report.prefilled,
        report.resolved_locally,
        report.resolved_remotely,
        report.zero_results,
        report.exhausted,
        if report.quota_hit { ", quota exhausted" } else { "" }
    );

    Ok(())
}
