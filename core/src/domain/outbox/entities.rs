use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A durably staged domain event awaiting dispatch.
///
/// Records are created only by capture (inside the business transaction that
/// raised the events) and have their outcome fields updated only by the batch
/// processor. Nothing in this core deletes them; retention is an external
/// concern.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OutboxRecord {
    pub id: Uuid,

    /// Assigned once per commit: every event captured in the same business
    /// transaction shares this value, so sibling events sort together.
    pub occurred_on_utc: DateTime<Utc>,

    /// Discriminator selecting the decoder on the relay side.
    pub event_type: String,

    /// Opaque serialized payload.
    pub content: Value,

    /// Set exactly once, on first successful dispatch. Never cleared or
    /// overwritten: success is terminal.
    pub processed_on_utc: Option<DateTime<Utc>>,

    /// Most recent failure detail. Does not affect pending status; a record
    /// with an error but no processed timestamp is retried indefinitely.
    pub error: Option<String>,
}

impl OutboxRecord {
    pub fn new(occurred_on_utc: DateTime<Utc>, event_type: &str, content: Value) -> Self {
        Self {
            // v7 ids are time-ordered and monotonic within a process, so the
            // id tie-break in fetch_pending preserves capture order for
            // records sharing one occurred_on_utc.
            id: Uuid::now_v7(),
            occurred_on_utc,
            event_type: event_type.to_string(),
            content,
            processed_on_utc: None,
            error: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.processed_on_utc.is_none()
    }
}
