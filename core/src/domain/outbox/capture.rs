use chrono::{DateTime, Utc};

use crate::domain::common::CoreError;
use crate::domain::events::{DomainEvent, EventSource};
use crate::domain::outbox::entities::OutboxRecord;

/// Convert every pending domain event on the given aggregates into outbox
/// records, draining the aggregates' event lists.
///
/// The caller reads the clock once per commit and passes the value here, so
/// all events staged for one business transaction share a single
/// `occurred_on_utc`. The returned records must be appended inside the same
/// transaction as the business write (`append_outbox_records` for Postgres);
/// capture itself never touches storage.
///
/// Draining makes capture idempotent: a second pass over the same aggregates
/// stages zero additional records.
///
/// # Errors
///
/// Any event that fails to serialize aborts the whole capture with
/// `CoreError::SerializationError`. The enclosing transaction must then be
/// rolled back; an undeliverable event is never dropped while the business
/// change still commits.
pub fn stage_outbox_records<E, S>(
    occurred_on_utc: DateTime<Utc>,
    sources: &mut [&mut S],
) -> Result<Vec<OutboxRecord>, CoreError>
where
    E: DomainEvent,
    S: EventSource<E> + ?Sized,
{
    let mut records = Vec::new();

    for source in sources.iter_mut() {
        for event in source.drain_pending_events() {
            let content = event.payload()?;
            records.push(OutboxRecord::new(
                occurred_on_utc,
                event.event_type(),
                content,
            ));
        }
    }

    Ok(records)
}
