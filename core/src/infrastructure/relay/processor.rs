use tracing::{info, warn};

use crate::domain::common::CoreError;
use crate::domain::events::{EventBus, EventDecoderRegistry};
use crate::domain::outbox::{entities::OutboxRecord, ports::OutboxStore};

/// Outcome counts for one relay batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub fetched: usize,
    pub processed: usize,
    pub failed: usize,
}

/// Dequeues a bounded batch of pending outbox records, dispatches each to the
/// event bus, and durably records the outcome per record.
///
/// Delivery is at-least-once: a crash between a successful publish and the
/// corresponding mark leaves the record pending and it is redelivered on the
/// next run. Ordering is guaranteed only within one fetched batch, in fetch
/// order.
pub struct OutboxProcessor<S, B>
where
    S: OutboxStore,
    B: EventBus,
{
    store: S,
    bus: B,
    decoders: EventDecoderRegistry,
    batch_size: u32,
}

impl<S, B> OutboxProcessor<S, B>
where
    S: OutboxStore,
    B: EventBus,
{
    pub fn new(store: S, bus: B, decoders: EventDecoderRegistry, batch_size: u32) -> Self {
        Self {
            store,
            bus,
            decoders,
            batch_size,
        }
    }

    /// Run one batch.
    ///
    /// Records are dispatched strictly sequentially: one event is fully
    /// published, and its outcome durably marked, before the next record is
    /// attempted. A decode or handler failure is soft — the record is marked
    /// failed and stays pending for a later run while the rest of the batch
    /// proceeds. Only store errors (fetch or mark) abort the run.
    pub async fn run_once(&self) -> Result<BatchSummary, CoreError> {
        let records = self.store.fetch_pending(self.batch_size).await?;

        let mut summary = BatchSummary {
            fetched: records.len(),
            ..Default::default()
        };

        for record in records {
            match self.dispatch(&record).await {
                Ok(()) => {
                    self.store.mark_processed(record.id).await?;
                    summary.processed += 1;
                    info!(
                        "Dispatched outbox record {} ({})",
                        record.id, record.event_type
                    );
                }
                Err(e) => {
                    self.store.mark_failed(record.id, &e.to_string()).await?;
                    summary.failed += 1;
                    warn!(
                        "Outbox record {} ({}) left pending for retry: {}",
                        record.id, record.event_type, e
                    );
                }
            }
        }

        Ok(summary)
    }

    async fn dispatch(&self, record: &OutboxRecord) -> Result<(), CoreError> {
        let event = self.decoders.decode(&record.event_type, &record.content)?;
        self.bus.publish(&event).await
    }
}
