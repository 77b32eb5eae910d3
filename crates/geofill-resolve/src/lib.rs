//! Resolvers: local offline lookup and remote geocoding client.

pub mod local;
pub mod remote;
pub mod types;

pub use local::LocalResolver;
pub use remote::{CountryLookup, GoogleGeocoder};
pub use types::Outcome;
