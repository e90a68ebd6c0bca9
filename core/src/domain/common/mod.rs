use serde::Deserialize;
use thiserror::Error;

use crate::domain::user::entities::UserId;

pub mod services;

#[derive(Error, Debug, Clone)]
pub enum CoreError {
    #[error("Service is currently unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("User with id {id} not found")]
    UserNotFound { id: UserId },

    #[error("Username cannot be empty")]
    InvalidUsername,

    #[error("Email address is not valid")]
    InvalidEmail,

    #[error("Database error: {msg}")]
    DatabaseError { msg: String },

    /// Serialization error occurred when converting an event to JSON.
    /// Raised at capture time, inside the business transaction, so the
    /// whole write aborts rather than committing with a lost event.
    #[error("Serialization error: {msg}")]
    SerializationError { msg: String },

    #[error("Failed to decode event of type {event_type}: {msg}")]
    DeserializationError { event_type: String, msg: String },

    #[error("No decoder registered for event type {event_type}")]
    UnknownEventType { event_type: String },

    #[error("Handler {handler} failed: {msg}")]
    HandlerError { handler: String, msg: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetPaginated {
    pub page: u32,
    pub limit: u32,
}

impl Default for GetPaginated {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

pub type TotalPaginatedElements = u64;
