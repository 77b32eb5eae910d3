//! CSV input loading: delimited file with a header row into a record store.

use std::path::Path;

use tracing::debug;

use geofill_core::{Error, RecordStore, Result};

/// Load every row of the input file into a record store.
///
/// The header row defines field names. Ragged rows are accepted; the store
/// pads them to the header width.
pub fn read_records(path: &Path) -> Result<RecordStore> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::Csv(e.to_string()))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::Csv(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut store = RecordStore::new(headers);

    for row in reader.records() {
        let row = row.map_err(|e| Error::Csv(e.to_string()))?;
        store.push_row(row.iter().map(str::to_string).collect());
    }

    debug!("Loaded {} records from {}", store.len(), path.display());
    Ok(store)
}
