//! Enrichment pipeline: load the input CSV, resolve countries, flush the
//! augmented output.

pub mod scheduler;

pub use scheduler::{EnrichReport, Enricher};

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use geofill_core::{EnrichConfig, Result};
use geofill_resolve::{CountryLookup, GoogleGeocoder};

/// Run the full pipeline against the live geocoding API.
pub async fn run(input: &Path, config: EnrichConfig) -> Result<EnrichReport> {
    let remote: Arc<dyn CountryLookup> = Arc::new(GoogleGeocoder::new(
        config.api_key.clone(),
        config.request_timeout,
    )?);
    enrich_file(input, config, remote).await
}

/// Pipeline body with an injectable remote resolver.
///
/// The flush runs exactly once, whether the scheduler finished every record
/// or stopped early on quota exhaustion. An output write failure is reported
/// rather than propagated: the enrichment work already happened.
pub async fn enrich_file(
    input: &Path,
    config: EnrichConfig,
    remote: Arc<dyn CountryLookup>,
) -> Result<EnrichReport> {
    info!("Reading input CSV...");
    let mut store = geofill_csv::read_records(input)?;

    info!("Fetching countries...");
    let enricher = Enricher::new(remote, config);
    let report = enricher.run(&mut store).await;

    info!("Creating CSV file...");
    let dest = geofill_csv::output_path(input, Utc::now().timestamp_millis());
    if let Err(e) = geofill_csv::write_records(&store, &dest) {
        error!("Error exporting records to {}: {}", dest.display(), e);
    }

    Ok(report)
}
