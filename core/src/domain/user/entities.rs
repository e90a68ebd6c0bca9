use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::events::{AdminEvent, EventSource};
use crate::domain::user::events::{
    user_created_from_domain, user_deleted_from_domain, user_updated_from_domain,
    welcome_email_from_domain,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct UserId(pub Uuid);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for UserId {
    fn from(uuid: Uuid) -> Self {
        UserId(uuid)
    }
}

impl From<UserId> for Uuid {
    fn from(user_id: UserId) -> Self {
        user_id.0
    }
}

/// An administrable account. The aggregate accumulates domain events while
/// being mutated; the events are drained at capture time, inside the same
/// transaction as the business write that raised them.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    #[sqlx(skip)]
    pending_events: Vec<AdminEvent>,
}

impl User {
    /// Build a new user and raise `user.created` plus the welcome
    /// notification request.
    pub fn create(input: InsertUserInput) -> User {
        let mut user = User {
            id: UserId::from(Uuid::new_v4()),
            username: input.username,
            email: input.email,
            display_name: input.display_name,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
            pending_events: Vec::new(),
        };
        user.record(AdminEvent::UserCreated(user_created_from_domain(&user)));
        user.record(AdminEvent::WelcomeEmailRequested(welcome_email_from_domain(
            &user,
        )));
        user
    }

    /// Apply the non-None fields of the update and raise `user.updated`.
    pub fn apply_update(&mut self, input: UpdateUserInput) {
        if let Some(username) = input.username {
            self.username = username;
        }
        if let Some(email) = input.email {
            self.email = email;
        }
        if input.display_name.is_some() {
            self.display_name = input.display_name;
        }
        if let Some(is_active) = input.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Some(Utc::now());
        let event = AdminEvent::UserUpdated(user_updated_from_domain(self));
        self.record(event);
    }

    /// Raise `user.deleted`. Called by repositories just before the row is
    /// removed so the event is staged in the same transaction.
    pub fn mark_deleted(&mut self) {
        self.record(AdminEvent::UserDeleted(user_deleted_from_domain(self.id)));
    }

    pub fn record(&mut self, event: AdminEvent) {
        self.pending_events.push(event);
    }

    pub fn pending_events(&self) -> &[AdminEvent] {
        &self.pending_events
    }
}

impl EventSource<AdminEvent> for User {
    fn drain_pending_events(&mut self) -> Vec<AdminEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InsertUserInput {
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateUserInput {
    pub id: UserId,
    pub username: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub is_active: Option<bool>,
}
