//! Geofill core: error type, run configuration, record store.

pub mod config;
pub mod error;
pub mod record;

pub use config::EnrichConfig;
pub use error::{Error, Result};
pub use record::{RecordStore, COUNTRY_FIELD, LATITUDE_FIELD, LONGITUDE_FIELD};
