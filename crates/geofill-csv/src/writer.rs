//! Output writing: record store to a timestamped CSV next to the input.

use std::path::{Path, PathBuf};

use tracing::info;

use geofill_core::{Error, RecordStore, Result};

/// Destination file name for a run: `<input>-withCountries-<unix-ms>.csv`.
/// The timestamp keeps repeated runs from overwriting prior output.
pub fn output_path(input: &Path, timestamp_ms: i64) -> PathBuf {
    PathBuf::from(format!(
        "{}-withCountries-{}.csv",
        input.display(),
        timestamp_ms
    ))
}

/// Serialize the full record sequence, resolved or not, in input order.
/// Lines are CRLF-terminated.
pub fn write_records(store: &RecordStore, dest: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(dest)
        .map_err(|e| Error::Csv(e.to_string()))?;

    writer
        .write_record(store.headers())
        .map_err(|e| Error::Csv(e.to_string()))?;
    for index in 0..store.len() {
        writer
            .write_record(store.row(index))
            .map_err(|e| Error::Csv(e.to_string()))?;
    }
    writer.flush()?;

    info!("Exported {} records to {}", store.len(), dest.display());
    Ok(())
}
