use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::domain::{
    common::{CoreError, GetPaginated, TotalPaginatedElements},
    outbox::{capture::stage_outbox_records, ports::MockOutboxStore, ports::OutboxStore},
    user::entities::{InsertUserInput, UpdateUserInput, User, UserId},
};

/// Persistence port for the user aggregate.
///
/// Implementations own the transaction boundary: every write method must
/// stage the aggregate's pending domain events into the outbox within the
/// same atomic write as the business change. A caller never sees a state
/// where the user row committed but its events did not.
pub trait UserRepository: Send + Sync {
    fn insert(
        &self,
        input: InsertUserInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;
    fn find_by_id(
        &self,
        id: &UserId,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;
    fn list(
        &self,
        pagination: &GetPaginated,
    ) -> impl Future<Output = Result<(Vec<User>, TotalPaginatedElements), CoreError>> + Send;
    fn update(
        &self,
        input: UpdateUserInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;
    fn delete(&self, id: &UserId) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Business logic port for user administration.
///
/// Implementations validate input before delegating to the repository. All
/// domain events raised by an operation are staged transactionally with the
/// write itself; event dispatch happens asynchronously through the outbox
/// relay and is never visible to callers of this trait.
pub trait UserService: Send + Sync {
    /// Creates a user.
    ///
    /// Raises `user.created` and `notification.welcome_email` in the same
    /// transaction as the insert.
    ///
    /// # Returns
    ///
    /// - `Ok(User)` - The newly created user
    /// - `Err(CoreError::InvalidUsername)` - Empty or whitespace username
    /// - `Err(CoreError::InvalidEmail)` - Malformed email address
    fn create_user(
        &self,
        input: InsertUserInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// Retrieves a user by id.
    ///
    /// # Returns
    ///
    /// - `Ok(User)` - The user was found
    /// - `Err(CoreError::UserNotFound)` - No user exists with the given id
    fn get_user(&self, id: &UserId) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// Lists users with pagination support.
    fn list_users(
        &self,
        pagination: &GetPaginated,
    ) -> impl Future<Output = Result<(Vec<User>, TotalPaginatedElements), CoreError>> + Send;

    /// Updates the non-None fields of an existing user.
    ///
    /// Raises `user.updated` in the same transaction as the update.
    fn update_user(
        &self,
        input: UpdateUserInput,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// Deletes a user.
    ///
    /// Raises `user.deleted` in the same transaction as the delete.
    fn delete_user(&self, id: &UserId) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// In-memory user repository with the same atomicity contract as the
/// Postgres implementation: the user list and the backing outbox store are
/// only touched once the whole write has succeeded.
#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
    outbox: MockOutboxStore,
    fail_next_insert: Arc<AtomicBool>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::with_outbox(MockOutboxStore::new())
    }

    pub fn with_outbox(outbox: MockOutboxStore) -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
            outbox,
            fail_next_insert: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn outbox(&self) -> &MockOutboxStore {
        &self.outbox
    }

    /// Make the next insert fail before anything is written, for
    /// all-or-nothing tests.
    pub fn fail_next_insert(&self) {
        self.fail_next_insert.store(true, Ordering::SeqCst);
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository for MockUserRepository {
    async fn insert(&self, input: InsertUserInput) -> Result<User, CoreError> {
        if self.fail_next_insert.swap(false, Ordering::SeqCst) {
            return Err(CoreError::DatabaseError {
                msg: "connection reset by peer".to_string(),
            });
        }

        let mut user = User::create(input);
        let records = stage_outbox_records(Utc::now(), &mut [&mut user])?;
        self.outbox.append(&records).await?;
        self.users.lock().unwrap().push(user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, CoreError> {
        let users = self.users.lock().unwrap();

        Ok(users.iter().find(|u| &u.id == id).cloned())
    }

    async fn list(
        &self,
        pagination: &GetPaginated,
    ) -> Result<(Vec<User>, TotalPaginatedElements), CoreError> {
        let users = self.users.lock().unwrap();
        let total = users.len() as u64;

        let offset = (pagination.page.saturating_sub(1) * pagination.limit) as usize;
        let limit = pagination.limit as usize;

        let page: Vec<User> = users.iter().skip(offset).take(limit).cloned().collect();

        Ok((page, total))
    }

    async fn update(&self, input: UpdateUserInput) -> Result<User, CoreError> {
        let mut user = self
            .find_by_id(&input.id)
            .await?
            .ok_or(CoreError::UserNotFound { id: input.id })?;

        user.apply_update(input);
        let records = stage_outbox_records(Utc::now(), &mut [&mut user])?;
        self.outbox.append(&records).await?;

        let mut users = self.users.lock().unwrap();
        if let Some(slot) = users.iter_mut().find(|u| u.id == user.id) {
            *slot = user.clone();
        }

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), CoreError> {
        let mut user = self
            .find_by_id(id)
            .await?
            .ok_or(CoreError::UserNotFound { id: *id })?;

        user.mark_deleted();
        let records = stage_outbox_records(Utc::now(), &mut [&mut user])?;
        self.outbox.append(&records).await?;

        self.users.lock().unwrap().retain(|u| &u.id != id);

        Ok(())
    }
}
