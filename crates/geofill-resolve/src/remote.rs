//! Remote resolver: country lookups against the Google geocoding API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::types::Outcome;
use geofill_core::{Error, Result};

/// Geocoding endpoint.
const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// A single outbound lookup for a coordinate pair.
///
/// The scheduler owns pacing and retries; implementations issue exactly one
/// request per call and classify the response.
#[async_trait]
pub trait CountryLookup: Send + Sync {
    async fn lookup(&self, lat: &str, lon: &str) -> Outcome;
}

/// Live client for the Google geocoding API.
pub struct GoogleGeocoder {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl GoogleGeocoder {
    /// Build a client with a per-attempt timeout. The key, when present,
    /// is attached to every request.
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self { http, api_key })
    }
}

#[async_trait]
impl CountryLookup for GoogleGeocoder {
    async fn lookup(&self, lat: &str, lon: &str) -> Outcome {
        let latlng = format!("{},{}", lat, lon);
        let mut request = self
            .http
            .get(GEOCODE_URL)
            .query(&[("latlng", latlng.as_str())]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Geocode request for {} failed: {}", latlng, e);
                return Outcome::Transient;
            }
        };

        match response.text().await {
            Ok(body) => interpret_body(&body),
            Err(e) => {
                warn!("Geocode response for {} unreadable: {}", latlng, e);
                Outcome::Transient
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    #[serde(default)]
    long_name: String,
    #[serde(default)]
    types: Vec<String>,
}

/// Classify a response body. Any status outside the recognized set is
/// retriable, never fatal; the run only ends via completion or quota.
pub fn interpret_body(body: &str) -> Outcome {
    let parsed: GeocodeResponse = match serde_json::from_str(body) {
        Ok(p) => p,
        Err(_) => return Outcome::Transient,
    };

    match parsed.status.as_str() {
        "OK" => {
            let country = parsed.results.first().and_then(|result| {
                result
                    .address_components
                    .iter()
                    .find(|c| c.types.iter().any(|t| t == "country"))
                    .map(|c| c.long_name.clone())
            });
            match country {
                Some(name) if !name.is_empty() => Outcome::Resolved(name),
                // OK with no country component: data anomaly, retry rather
                // than leaving the record in limbo
                _ => Outcome::Transient,
            }
        }
        "ZERO_RESULTS" => Outcome::ZeroResult,
        "OVER_QUERY_LIMIT" => Outcome::QuotaExceeded,
        _ => Outcome::Transient,
    }
}
