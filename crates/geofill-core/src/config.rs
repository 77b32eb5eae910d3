//! Run configuration.

use std::time::Duration;

/// Environment variable holding the geocoding API credential.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Milliseconds between two unauthenticated dispatches.
const PAUSE_MS: u64 = 150;
/// Per-attempt request timeout in milliseconds.
const REQUEST_TIMEOUT_MS: u64 = 5000;
/// Base delay for transient-error backoff in milliseconds.
const RETRY_BASE_MS: u64 = 250;
/// Attempts per record before giving up on transient errors.
const MAX_ATTEMPTS: u32 = 8;

/// Settings for one enrichment run.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Stagger interval between unauthenticated remote dispatches.
    pub pause: Duration,
    /// Timeout for a single remote attempt.
    pub request_timeout: Duration,
    /// Base delay for exponential backoff after a transient error.
    pub retry_base: Duration,
    /// Remote attempts per record before the record is given up on.
    pub max_attempts: u32,
    /// API credential; when present, dispatches skip the stagger.
    pub api_key: Option<String>,
}

impl EnrichConfig {
    /// Build configuration from the environment. The API key is consulted
    /// only when the caller requested authenticated mode.
    pub fn from_env(use_api_key: bool) -> Self {
        let api_key = if use_api_key {
            std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty())
        } else {
            None
        };

        Self {
            api_key,
            ..Self::default()
        }
    }
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            pause: Duration::from_millis(PAUSE_MS),
            request_timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
            retry_base: Duration::from_millis(RETRY_BASE_MS),
            max_attempts: MAX_ATTEMPTS,
            api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnrichConfig::default();
        assert_eq!(config.pause, Duration::from_millis(150));
        assert_eq!(config.request_timeout, Duration::from_millis(5000));
        assert_eq!(config.max_attempts, 8);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_key_ignored_unless_requested() {
        let config = EnrichConfig::from_env(false);
        assert!(config.api_key.is_none());
    }
}
