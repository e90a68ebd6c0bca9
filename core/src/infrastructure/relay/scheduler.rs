use std::sync::atomic::{AtomicBool, Ordering};

use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{error, info, warn};

use crate::domain::events::EventBus;
use crate::domain::outbox::ports::OutboxStore;
use crate::infrastructure::relay::processor::OutboxProcessor;

/// Periodic driver for the batch processor.
///
/// Guarantees at most one batch in flight per process: a tick that arrives
/// while a run is still executing is skipped, not queued. This is what keeps
/// two batches from racing to fetch and mark the same rows. Nothing here
/// provides cross-process exclusion — running multiple relay instances
/// against one store can dispatch duplicates.
pub struct OutboxRelay<S, B>
where
    S: OutboxStore,
    B: EventBus,
{
    processor: OutboxProcessor<S, B>,
    poll_interval: Duration,
    in_flight: AtomicBool,
}

impl<S, B> OutboxRelay<S, B>
where
    S: OutboxStore,
    B: EventBus,
{
    pub fn new(processor: OutboxProcessor<S, B>, poll_interval: Duration) -> Self {
        Self {
            processor,
            poll_interval,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run the relay loop forever (long-running task).
    ///
    /// A failed run is logged and never terminates scheduling; the next tick
    /// retries from persisted state.
    pub async fn start(&self) {
        info!("Starting outbox relay (interval: {:?})", self.poll_interval);
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    /// Execute one scheduled run.
    ///
    /// Returns `false` when the tick was skipped because a previous run is
    /// still in flight.
    pub async fn tick(&self) -> bool {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Previous outbox batch still in flight, skipping tick");
            return false;
        }

        match self.processor.run_once().await {
            Ok(summary) if summary.fetched > 0 => {
                info!(
                    "Outbox batch complete: {} fetched, {} processed, {} failed",
                    summary.fetched, summary.processed, summary.failed
                );
            }
            Ok(_) => {}
            Err(e) => {
                // Nothing was lost: fetch and mark failures leave every
                // record pending, so the next tick picks them up again.
                error!("Outbox batch aborted: {}", e);
            }
        }

        self.in_flight.store(false, Ordering::Release);
        true
    }
}
