use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::common::CoreError;
use crate::domain::outbox::entities::OutboxRecord;

/// Durable storage for outbox records and the only query surface the relay
/// needs.
///
/// Outcome updates are row-level: marking one record must never lock or block
/// another, so a failed record cannot prevent committing a sibling's success
/// within the same batch.
#[async_trait]
pub trait OutboxStore: Send + Sync {
    /// Append records in one atomic store write.
    ///
    /// Business writes staging events against Postgres should not go through
    /// this method; they use `append_outbox_records` with their own
    /// transaction's executor so the records commit with the business change.
    async fn append(&self, records: &[OutboxRecord]) -> Result<(), CoreError>;

    /// Up to `limit` pending records, ordered ascending by `occurred_on_utc`,
    /// ties broken by `id`, for determinism.
    async fn fetch_pending(&self, limit: u32) -> Result<Vec<OutboxRecord>, CoreError>;

    /// Stamp `processed_on_utc` and clear `error`. Guarded: a record that is
    /// already processed is never overwritten.
    async fn mark_processed(&self, id: Uuid) -> Result<(), CoreError>;

    /// Record the latest failure detail. The record stays pending and will be
    /// fetched again on a later run.
    async fn mark_failed(&self, id: Uuid, detail: &str) -> Result<(), CoreError>;
}

#[derive(Clone)]
pub struct MockOutboxStore {
    records: Arc<Mutex<Vec<OutboxRecord>>>,
    fail_next_fetch: Arc<AtomicBool>,
}

impl MockOutboxStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            fail_next_fetch: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Snapshot of every record in the store, in insertion order.
    pub fn records(&self) -> Vec<OutboxRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn find(&self, id: Uuid) -> Option<OutboxRecord> {
        self.records.lock().unwrap().iter().find(|r| r.id == id).cloned()
    }

    /// Make the next `fetch_pending` fail, to simulate an unreachable store.
    pub fn fail_next_fetch(&self) {
        self.fail_next_fetch.store(true, Ordering::SeqCst);
    }
}

impl Default for MockOutboxStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutboxStore for MockOutboxStore {
    async fn append(&self, records: &[OutboxRecord]) -> Result<(), CoreError> {
        self.records.lock().unwrap().extend_from_slice(records);
        Ok(())
    }

    async fn fetch_pending(&self, limit: u32) -> Result<Vec<OutboxRecord>, CoreError> {
        if self.fail_next_fetch.swap(false, Ordering::SeqCst) {
            return Err(CoreError::DatabaseError {
                msg: "outbox store unavailable".to_string(),
            });
        }

        let mut pending: Vec<OutboxRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.is_pending())
            .cloned()
            .collect();
        pending.sort_by(|a, b| {
            a.occurred_on_utc
                .cmp(&b.occurred_on_utc)
                .then(a.id.cmp(&b.id))
        });
        pending.truncate(limit as usize);

        Ok(pending)
    }

    async fn mark_processed(&self, id: Uuid) -> Result<(), CoreError> {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.iter_mut().find(|r| r.id == id) {
            if record.processed_on_utc.is_none() {
                record.processed_on_utc = Some(Utc::now());
                record.error = None;
            }
        }
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, detail: &str) -> Result<(), CoreError> {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.iter_mut().find(|r| r.id == id) {
            if record.processed_on_utc.is_none() {
                record.error = Some(detail.to_string());
            }
        }
        Ok(())
    }
}
