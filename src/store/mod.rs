//! Holds the latest known exchange rates.

pub mod scheduler;

use crate::core::rate::{MergeOutcome, RateQuote, RateSnapshot, RateSource};
use crate::core::CurrencyCode;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Result of a single refresh, for logging and inspection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshReport {
    pub updated: Vec<CurrencyCode>,
    pub missed: Vec<CurrencyCode>,
    pub error: Option<String>,
}

impl RefreshReport {
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Rate table shared between refresh tasks and readers.
///
/// Every refresh builds a new [`RateSnapshot`] and swaps it in whole, so a
/// reader sees either the previous set of rates or the next one.
pub struct RateStore {
    source: Arc<dyn RateSource>,
    current: watch::Sender<Arc<RateSnapshot>>,
}

impl RateStore {
    pub fn new(source: Arc<dyn RateSource>) -> Self {
        let (current, _) = watch::channel(Arc::new(RateSnapshot::initial()));
        Self { source, current }
    }

    /// Fetches fresh rates and publishes them. Failures keep the previous values.
    #[instrument(name = "RateRefresh", skip(self))]
    pub async fn refresh(&self) -> RefreshReport {
        let quote = match self
            .source
            .fetch_rates(CurrencyCode::BASE, &CurrencyCode::ALL)
            .await
        {
            Ok(quote) => quote,
            Err(e) => {
                warn!(error = %e, "Rate fetch failed, keeping previous rates");
                return RefreshReport {
                    error: Some(e.to_string()),
                    ..RefreshReport::default()
                };
            }
        };

        let outcome = self.publish(&quote);
        for code in &outcome.missed {
            debug!(%code, "No usable rate in response, keeping previous value");
        }
        info!(
            updated = outcome.updated.len(),
            missed = outcome.missed.len(),
            date = quote.date.as_deref().unwrap_or("unknown"),
            "Rates refreshed"
        );

        RefreshReport {
            updated: outcome.updated,
            missed: outcome.missed,
            error: None,
        }
    }

    /// Merges `quote` into the current snapshot and publishes the result.
    /// Subscribers are only notified when at least one rate changed hands.
    pub fn publish(&self, quote: &RateQuote) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        self.current.send_if_modified(|current| {
            let (next, merged) = current.merged_with(quote, Utc::now());
            outcome = merged;
            if outcome.updated.is_empty() {
                return false;
            }
            *current = Arc::new(next);
            true
        });
        outcome
    }

    /// Latest rate for `code`, 0 if it was never fetched.
    pub fn get_rate(&self, code: CurrencyCode) -> f64 {
        self.snapshot().rate(code)
    }

    pub fn snapshot(&self) -> Arc<RateSnapshot> {
        Arc::clone(&self.current.borrow())
    }

    /// Receiver that wakes up whenever a new snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<Arc<RateSnapshot>> {
        self.current.subscribe()
    }
}
