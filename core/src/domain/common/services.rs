use crate::domain::user::ports::UserRepository;

/// Generic application service parameterized over its repository ports.
///
/// Business-rule implementations live in per-area `services.rs` modules as
/// trait impls on this struct (see `domain::user::services`).
#[derive(Clone)]
pub struct Service<U>
where
    U: UserRepository,
{
    pub(crate) user_repository: U,
}

impl<U> Service<U>
where
    U: UserRepository,
{
    pub fn new(user_repository: U) -> Self {
        Self { user_repository }
    }
}
