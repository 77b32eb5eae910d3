//! In-memory record store: input rows plus their country field.

/// Header of the latitude column.
pub const LATITUDE_FIELD: &str = "location_latitude";
/// Header of the longitude column.
pub const LONGITUDE_FIELD: &str = "location_longitude";
/// Header of the country column, appended when the input lacks it.
pub const COUNTRY_FIELD: &str = "country";

/// One input row. Fields are an untyped passthrough in header order.
#[derive(Debug, Clone)]
struct Record {
    fields: Vec<String>,
}

/// Ordered sequence of records behind the enrichment run.
///
/// Rows keep their input order from load to serialization. A `country`
/// column is guaranteed: an existing one is reused, otherwise it is
/// appended to the header row.
#[derive(Debug, Clone)]
pub struct RecordStore {
    headers: Vec<String>,
    lat_idx: Option<usize>,
    lon_idx: Option<usize>,
    country_idx: usize,
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new(mut headers: Vec<String>) -> Self {
        let lat_idx = headers.iter().position(|h| h == LATITUDE_FIELD);
        let lon_idx = headers.iter().position(|h| h == LONGITUDE_FIELD);
        let country_idx = match headers.iter().position(|h| h == COUNTRY_FIELD) {
            Some(idx) => idx,
            None => {
                headers.push(COUNTRY_FIELD.to_string());
                headers.len() - 1
            }
        };

        Self {
            headers,
            lat_idx,
            lon_idx,
            country_idx,
            records: Vec::new(),
        }
    }

    /// Append a row. Ragged rows are padded or truncated to the header width.
    pub fn push_row(&mut self, mut fields: Vec<String>) {
        fields.resize(self.headers.len(), String::new());
        self.records.push(Record { fields });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Row fields in header order, for serialization.
    pub fn row(&self, index: usize) -> &[String] {
        &self.records[index].fields
    }

    /// The record's country, if one has been supplied or resolved.
    pub fn country(&self, index: usize) -> Option<&str> {
        let value = self.records[index].fields[self.country_idx].as_str();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Assign a country. Once set it is never overwritten.
    pub fn set_country(&mut self, index: usize, name: &str) {
        let slot = &mut self.records[index].fields[self.country_idx];
        if slot.is_empty() {
            *slot = name.to_string();
        }
    }

    /// Parsed coordinate pair. Missing columns or values that fail numeric
    /// parsing yield `None`; bad rows never abort the run.
    pub fn coordinates(&self, index: usize) -> Option<(f64, f64)> {
        let (lat_raw, lon_raw) = self.raw_coordinates(index);
        let lat = lat_raw.trim().parse::<f64>().ok()?;
        let lon = lon_raw.trim().parse::<f64>().ok()?;
        Some((lat, lon))
    }

    /// Coordinate fields exactly as the input supplied them.
    pub fn raw_coordinates(&self, index: usize) -> (&str, &str) {
        let fields = &self.records[index].fields;
        let lat = self.lat_idx.map(|i| fields[i].as_str()).unwrap_or("");
        let lon = self.lon_idx.map(|i| fields[i].as_str()).unwrap_or("");
        (lat, lon)
    }
}
