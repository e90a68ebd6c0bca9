use serde_json::Value;

use crate::domain::common::CoreError;
use crate::domain::user::events::{
    self, UserCreated, UserDeleted, UserUpdated, WelcomeEmailRequested,
};

pub mod decoder;
pub mod ports;

pub use decoder::EventDecoderRegistry;
pub use ports::{EventBus, EventHandler};

/// A fact about something that happened in the business model, meant to be
/// observed elsewhere in the system.
///
/// The discriminator returned by [`event_type`](DomainEvent::event_type) is
/// stored next to the serialized payload and selects the decoder on the relay
/// side, so the wire format never carries a source-language type identity.
pub trait DomainEvent {
    fn event_type(&self) -> &'static str;

    /// Serialize the event into its opaque outbox payload.
    ///
    /// A failure here aborts the enclosing business transaction: an event
    /// that cannot be staged must never be dropped while the business
    /// change still commits.
    fn payload(&self) -> Result<Value, CoreError>;
}

/// Pre-commit hook implemented by aggregates that accumulate domain events
/// while being mutated.
///
/// Draining empties the aggregate's event list, so a second capture pass over
/// the same aggregate stages zero additional records.
pub trait EventSource<E: DomainEvent> {
    fn drain_pending_events(&mut self) -> Vec<E>;
}

/// Every domain event the admin service can raise, in decoded form.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminEvent {
    UserCreated(UserCreated),
    UserUpdated(UserUpdated),
    UserDeleted(UserDeleted),
    WelcomeEmailRequested(WelcomeEmailRequested),
}

impl DomainEvent for AdminEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AdminEvent::UserCreated(_) => events::USER_CREATED,
            AdminEvent::UserUpdated(_) => events::USER_UPDATED,
            AdminEvent::UserDeleted(_) => events::USER_DELETED,
            AdminEvent::WelcomeEmailRequested(_) => events::WELCOME_EMAIL_REQUESTED,
        }
    }

    fn payload(&self) -> Result<Value, CoreError> {
        let value = match self {
            AdminEvent::UserCreated(event) => serde_json::to_value(event),
            AdminEvent::UserUpdated(event) => serde_json::to_value(event),
            AdminEvent::UserDeleted(event) => serde_json::to_value(event),
            AdminEvent::WelcomeEmailRequested(event) => serde_json::to_value(event),
        };
        value.map_err(|e| CoreError::SerializationError { msg: e.to_string() })
    }
}
