use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    common::CoreError,
    events::{AdminEvent, DomainEvent, EventDecoderRegistry},
    user::events::{self, UserCreated, WelcomeEmailRequested},
};

#[test]
fn registered_event_decodes_back_to_the_original_value() {
    let registry = EventDecoderRegistry::with_default_decoders();
    let event = AdminEvent::UserCreated(UserCreated {
        user_id: Uuid::new_v4(),
        username: "ada".to_string(),
        email: "ada@example.com".to_string(),
    });

    let content = event.payload().expect("payload should serialize");
    let decoded = registry
        .decode(event.event_type(), &content)
        .expect("decode should succeed");

    assert_eq!(decoded, event, "Decode must invert capture serialization");
}

#[test]
fn welcome_email_event_round_trips() {
    let registry = EventDecoderRegistry::with_default_decoders();
    let event = AdminEvent::WelcomeEmailRequested(WelcomeEmailRequested {
        user_id: Uuid::new_v4(),
        email: "grace@example.com".to_string(),
    });

    let content = event.payload().expect("payload should serialize");
    let decoded = registry
        .decode(events::WELCOME_EMAIL_REQUESTED, &content)
        .expect("decode should succeed");

    assert_eq!(decoded, event);
}

#[test]
fn unknown_event_type_is_rejected() {
    let registry = EventDecoderRegistry::with_default_decoders();

    let error = registry
        .decode("billing.invoiced", &json!({}))
        .expect_err("unregistered discriminator must not decode");

    assert!(
        matches!(error, CoreError::UnknownEventType { ref event_type } if event_type == "billing.invoiced"),
        "Expected UnknownEventType, got: {error}"
    );
}

#[test]
fn malformed_payload_is_rejected() {
    let registry = EventDecoderRegistry::with_default_decoders();

    let error = registry
        .decode(events::USER_CREATED, &json!({ "user_id": "not-a-uuid" }))
        .expect_err("junk payload must not decode");

    assert!(
        matches!(error, CoreError::DeserializationError { .. }),
        "Expected DeserializationError, got: {error}"
    );
}

#[test]
fn empty_registry_decodes_nothing() {
    let registry = EventDecoderRegistry::new();

    let error = registry
        .decode(events::USER_CREATED, &json!({}))
        .expect_err("empty registry must reject every type");

    assert!(matches!(error, CoreError::UnknownEventType { .. }));
}
