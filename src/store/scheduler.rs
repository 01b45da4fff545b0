//! Periodic background refresh of a [`RateStore`].

use super::RateStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// Clears the in-flight flag when a refresh task ends, even by panic.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Refreshes a store on a fixed period until shut down or dropped.
///
/// Every tick spawns a one-off refresh task. A tick that arrives while the
/// previous refresh is still running is skipped, so slow fetches never pile up.
pub struct RefreshScheduler {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl RefreshScheduler {
    /// Starts the timer. The first refresh happens one `period` from now.
    ///
    /// `period` must be non-zero.
    pub fn start(store: Arc<RateStore>, period: Duration) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let in_flight = Arc::new(AtomicBool::new(false));

        let handle = tokio::spawn(async move {
            let Some(first_tick) = Instant::now().checked_add(period) else {
                warn!(?period, "Refresh period out of range, background refresh disabled");
                return;
            };
            let mut ticker = tokio::time::interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = shutdown_rx.changed() => break,
                }

                if in_flight.swap(true, Ordering::AcqRel) {
                    debug!("Previous refresh still running, skipping tick");
                    continue;
                }

                let store = Arc::clone(&store);
                let guard = InFlightGuard(Arc::clone(&in_flight));
                tokio::spawn(async move {
                    let _guard = guard;
                    store.refresh().await;
                });
            }
            debug!("Refresh scheduler stopped");
        });

        Self { shutdown, handle }
    }

    /// Stops the timer and waits for the loop to exit. A refresh already
    /// running is left to finish on its own.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Refresh scheduler ended abnormally");
        }
    }
}
