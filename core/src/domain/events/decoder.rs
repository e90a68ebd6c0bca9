use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::common::CoreError;
use crate::domain::events::AdminEvent;
use crate::domain::user::events::{
    self, UserCreated, UserDeleted, UserUpdated, WelcomeEmailRequested,
};

/// Decodes one outbox payload into a concrete event value.
pub type DecodeFn = fn(&Value) -> Result<AdminEvent, CoreError>;

/// Registry mapping an event type discriminator to its decode function.
///
/// The relay never trusts embedded type information in the payload itself;
/// only explicitly registered discriminators can be decoded. An unregistered
/// type or a malformed payload is a soft per-record failure at the batch
/// processor, not a batch abort.
pub struct EventDecoderRegistry {
    decoders: HashMap<&'static str, DecodeFn>,
}

impl EventDecoderRegistry {
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Registry with a decoder for every event type the admin service raises.
    pub fn with_default_decoders() -> Self {
        let mut registry = Self::new();
        registry.register(events::USER_CREATED, |content| {
            decode_payload::<UserCreated>(events::USER_CREATED, content)
                .map(AdminEvent::UserCreated)
        });
        registry.register(events::USER_UPDATED, |content| {
            decode_payload::<UserUpdated>(events::USER_UPDATED, content)
                .map(AdminEvent::UserUpdated)
        });
        registry.register(events::USER_DELETED, |content| {
            decode_payload::<UserDeleted>(events::USER_DELETED, content)
                .map(AdminEvent::UserDeleted)
        });
        registry.register(events::WELCOME_EMAIL_REQUESTED, |content| {
            decode_payload::<WelcomeEmailRequested>(events::WELCOME_EMAIL_REQUESTED, content)
                .map(AdminEvent::WelcomeEmailRequested)
        });
        registry
    }

    pub fn register(&mut self, event_type: &'static str, decode: DecodeFn) {
        self.decoders.insert(event_type, decode);
    }

    pub fn decode(&self, event_type: &str, content: &Value) -> Result<AdminEvent, CoreError> {
        let decode = self
            .decoders
            .get(event_type)
            .ok_or_else(|| CoreError::UnknownEventType {
                event_type: event_type.to_string(),
            })?;
        decode(content)
    }
}

impl Default for EventDecoderRegistry {
    fn default() -> Self {
        Self::with_default_decoders()
    }
}

fn decode_payload<T: DeserializeOwned>(event_type: &str, content: &Value) -> Result<T, CoreError> {
    serde_json::from_value(content.clone()).map_err(|e| CoreError::DeserializationError {
        event_type: event_type.to_string(),
        msg: e.to_string(),
    })
}
