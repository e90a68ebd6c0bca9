use crate::domain::{
    common::{CoreError, GetPaginated, TotalPaginatedElements, services::Service},
    user::{
        entities::{InsertUserInput, UpdateUserInput, User, UserId},
        ports::{UserRepository, UserService},
    },
};

impl<U> UserService for Service<U>
where
    U: UserRepository,
{
    async fn create_user(&self, input: InsertUserInput) -> Result<User, CoreError> {
        if input.username.trim().is_empty() {
            return Err(CoreError::InvalidUsername);
        }
        if !input.email.contains('@') {
            return Err(CoreError::InvalidEmail);
        }

        // Event capture happens inside the repository transaction, so the
        // insert and its outbox rows commit or abort together.
        self.user_repository.insert(input).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, CoreError> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or(CoreError::UserNotFound { id: *id })
    }

    async fn list_users(
        &self,
        pagination: &GetPaginated,
    ) -> Result<(Vec<User>, TotalPaginatedElements), CoreError> {
        self.user_repository.list(pagination).await
    }

    async fn update_user(&self, input: UpdateUserInput) -> Result<User, CoreError> {
        if let Some(username) = &input.username {
            if username.trim().is_empty() {
                return Err(CoreError::InvalidUsername);
            }
        }
        if let Some(email) = &input.email {
            if !email.contains('@') {
                return Err(CoreError::InvalidEmail);
            }
        }

        self.user_repository.update(input).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), CoreError> {
        self.user_repository.delete(id).await
    }
}
