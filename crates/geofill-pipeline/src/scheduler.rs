//! Enrichment scheduler: drives resolution for every record lacking a
//! country, pacing remote dispatches and retrying transient failures.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::time::sleep;
use tracing::{error, info, warn};

use geofill_core::{EnrichConfig, RecordStore};
use geofill_resolve::{CountryLookup, LocalResolver, Outcome};

/// Summary of one enrichment run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichReport {
    pub total: usize,
    /// Records whose country was already supplied in the input.
    pub prefilled: usize,
    pub resolved_locally: usize,
    pub resolved_remotely: usize,
    /// Records the provider found nothing for; accepted as done.
    pub zero_results: usize,
    /// Records given up on after the transient-retry cap.
    pub exhausted: usize,
    pub quota_hit: bool,
}

impl EnrichReport {
    /// Records that reached a terminal state.
    pub fn completed(&self) -> usize {
        self.prefilled
            + self.resolved_locally
            + self.resolved_remotely
            + self.zero_results
            + self.exhausted
    }
}

/// A finished remote attempt, carrying its own record context so outcomes
/// can race freely across records.
struct Attempt {
    index: usize,
    lat: String,
    lon: String,
    attempt: u32,
    outcome: Outcome,
}

/// Schedules local-vs-remote resolution over a record store.
///
/// All shared state (the store, the completion tally, the quota latch)
/// is mutated only from the aggregation loop in [`Enricher::run`]; the
/// spawned attempts are pure lookups.
pub struct Enricher {
    local: LocalResolver,
    remote: Arc<dyn CountryLookup>,
    config: EnrichConfig,
}

impl Enricher {
    pub fn new(remote: Arc<dyn CountryLookup>, config: EnrichConfig) -> Self {
        Self {
            local: LocalResolver::new(),
            remote,
            config,
        }
    }

    /// Resolve every record lacking a country.
    ///
    /// Returns once all records are terminal, or early when the provider
    /// quota is exhausted. The caller flushes the store exactly once after
    /// this returns, so both termination paths share one flush.
    pub async fn run(&self, store: &mut RecordStore) -> EnrichReport {
        let total = store.len();
        let mut report = EnrichReport {
            total,
            ..EnrichReport::default()
        };
        let mut pending = FuturesUnordered::new();
        let mut dispatched = 0usize;

        for index in 0..total {
            // Already-supplied countries are never overwritten or re-resolved
            if store.country(index).is_some() {
                report.prefilled += 1;
                continue;
            }

            if let Some((lat, lon)) = store.coordinates(index) {
                if let Some(name) = self.local.resolve(lat, lon) {
                    store.set_country(index, name);
                    report.resolved_locally += 1;
                    continue;
                }
            }

            // Unauthenticated dispatches are staggered linearly so concurrent
            // lookups spread out over time; a key lifts the pacing. The
            // stagger index advances per dispatched record, not per retry.
            let delay = if self.config.api_key.is_some() {
                Duration::ZERO
            } else {
                self.config.pause * dispatched as u32
            };
            let (lat, lon) = store.raw_coordinates(index);
            pending.push(Self::attempt(
                self.remote.clone(),
                index,
                lat.to_string(),
                lon.to_string(),
                1,
                delay,
            ));
            dispatched += 1;
        }

        while report.completed() < total {
            let Some(done) = pending.next().await else {
                break;
            };

            match done.outcome {
                Outcome::Resolved(name) => {
                    store.set_country(done.index, &name);
                    report.resolved_remotely += 1;
                }
                Outcome::ZeroResult => {
                    warn!("No result for {},{}", done.lat, done.lon);
                    report.zero_results += 1;
                }
                Outcome::Transient => {
                    if done.attempt >= self.config.max_attempts {
                        error!(
                            "Giving up on {},{} after {} attempts",
                            done.lat, done.lon, done.attempt
                        );
                        report.exhausted += 1;
                    } else {
                        info!("Trying again to find country for {},{}", done.lat, done.lon);
                        let delay = self.backoff(done.attempt);
                        pending.push(Self::attempt(
                            self.remote.clone(),
                            done.index,
                            done.lat,
                            done.lon,
                            done.attempt + 1,
                            delay,
                        ));
                    }
                }
                Outcome::QuotaExceeded => {
                    // Latched once for the whole run; dropping the task set
                    // discards every outcome still in flight.
                    report.quota_hit = true;
                    error!("Error: OVER_QUERY_LIMIT");
                    break;
                }
            }
        }

        report
    }

    async fn attempt(
        remote: Arc<dyn CountryLookup>,
        index: usize,
        lat: String,
        lon: String,
        attempt: u32,
        delay: Duration,
    ) -> Attempt {
        if !delay.is_zero() {
            sleep(delay).await;
        }
        let outcome = remote.lookup(&lat, &lon).await;
        Attempt {
            index,
            lat,
            lon,
            attempt,
            outcome,
        }
    }

    /// Backoff before retry `attempt + 1`: base doubled per failed attempt,
    /// exponent capped.
    fn backoff(&self, attempt: u32) -> Duration {
        let exponent = (attempt - 1).min(6);
        self.config.retry_base * (1u32 << exponent)
    }
}
