use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::entities::{User, UserId};

pub const USER_CREATED: &str = "user.created";
pub const USER_UPDATED: &str = "user.updated";
pub const USER_DELETED: &str = "user.deleted";
pub const WELCOME_EMAIL_REQUESTED: &str = "notification.welcome_email";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreated {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
}

/// Carries the full post-update state rather than a diff, so consumers never
/// have to reassemble the aggregate from partial events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserUpdated {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDeleted {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WelcomeEmailRequested {
    pub user_id: Uuid,
    pub email: String,
}

pub fn user_created_from_domain(user: &User) -> UserCreated {
    UserCreated {
        user_id: user.id.0,
        username: user.username.clone(),
        email: user.email.clone(),
    }
}

pub fn user_updated_from_domain(user: &User) -> UserUpdated {
    UserUpdated {
        user_id: user.id.0,
        username: user.username.clone(),
        email: user.email.clone(),
        display_name: user.display_name.clone(),
        is_active: user.is_active,
    }
}

pub fn user_deleted_from_domain(user_id: UserId) -> UserDeleted {
    UserDeleted { user_id: user_id.0 }
}

pub fn welcome_email_from_domain(user: &User) -> WelcomeEmailRequested {
    WelcomeEmailRequested {
        user_id: user.id.0,
        email: user.email.clone(),
    }
}
