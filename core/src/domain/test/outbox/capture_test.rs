use chrono::Utc;
use serde_json::Value;

use crate::domain::{
    common::CoreError,
    events::{DomainEvent, EventSource},
    outbox::capture::stage_outbox_records,
    user::{
        entities::{InsertUserInput, User},
        events,
    },
};

fn sample_input(username: &str) -> InsertUserInput {
    InsertUserInput {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        display_name: None,
    }
}

// == Timestamp assignment ==

#[test]
fn capture_shares_one_timestamp_across_all_events() {
    let mut user = User::create(sample_input("ada"));
    let occurred_on = Utc::now();

    let records =
        stage_outbox_records(occurred_on, &mut [&mut user]).expect("capture should succeed");

    assert_eq!(records.len(), 2, "Expected one record per pending event");
    for record in &records {
        assert_eq!(
            record.occurred_on_utc, occurred_on,
            "Sibling events must share the commit timestamp"
        );
        assert!(record.is_pending(), "Fresh records must be pending");
        assert!(record.error.is_none(), "Fresh records carry no error");
    }
    assert_eq!(records[0].event_type, events::USER_CREATED);
    assert_eq!(records[1].event_type, events::WELCOME_EMAIL_REQUESTED);
}

#[test]
fn capture_spans_multiple_aggregates_in_one_commit() {
    let mut first = User::create(sample_input("ada"));
    let mut second = User::create(sample_input("grace"));
    let occurred_on = Utc::now();

    let records = stage_outbox_records(occurred_on, &mut [&mut first, &mut second])
        .expect("capture should succeed");

    assert_eq!(records.len(), 4, "Expected both aggregates to be drained");
    assert!(
        records.iter().all(|r| r.occurred_on_utc == occurred_on),
        "All records in one commit share the timestamp"
    );
}

#[test]
fn same_commit_records_sort_back_into_capture_order() {
    let mut user = User::create(sample_input("ada"));

    let mut records =
        stage_outbox_records(Utc::now(), &mut [&mut user]).expect("capture should succeed");

    // Records of one commit share occurred_on_utc, so the store's id
    // tie-break is what keeps them in capture order.
    assert!(
        records[0].id < records[1].id,
        "Ids must be time-ordered so sibling events keep their capture order"
    );

    records.sort_by(|a, b| {
        a.occurred_on_utc
            .cmp(&b.occurred_on_utc)
            .then(a.id.cmp(&b.id))
    });
    assert_eq!(records[0].event_type, events::USER_CREATED);
    assert_eq!(records[1].event_type, events::WELCOME_EMAIL_REQUESTED);
}

// == Idempotence ==

#[test]
fn capture_is_idempotent_once_events_are_drained() {
    let mut user = User::create(sample_input("ada"));

    let first = stage_outbox_records(Utc::now(), &mut [&mut user]).expect("first capture");
    let second = stage_outbox_records(Utc::now(), &mut [&mut user]).expect("second capture");

    assert_eq!(first.len(), 2);
    assert!(
        second.is_empty(),
        "A second capture pass over the same aggregate must stage nothing"
    );
    assert!(user.pending_events().is_empty());
}

// == Serialization failure ==

struct Unserializable;

impl DomainEvent for Unserializable {
    fn event_type(&self) -> &'static str {
        "test.unserializable"
    }

    fn payload(&self) -> Result<Value, CoreError> {
        Err(CoreError::SerializationError {
            msg: "no JSON representation".to_string(),
        })
    }
}

struct BrokenSource {
    events: Vec<Unserializable>,
}

impl EventSource<Unserializable> for BrokenSource {
    fn drain_pending_events(&mut self) -> Vec<Unserializable> {
        std::mem::take(&mut self.events)
    }
}

#[test]
fn serialization_failure_aborts_the_whole_capture() {
    let mut source = BrokenSource {
        events: vec![Unserializable],
    };

    let error = stage_outbox_records(Utc::now(), &mut [&mut source])
        .expect_err("capture should fail when an event cannot serialize");

    assert!(
        matches!(error, CoreError::SerializationError { .. }),
        "Expected a serialization error, got: {error}"
    );
}
