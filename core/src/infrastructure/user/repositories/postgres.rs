use chrono::Utc;
use sqlx::PgPool;

use crate::domain::{
    common::{CoreError, GetPaginated, TotalPaginatedElements},
    outbox::capture::stage_outbox_records,
    user::{
        entities::{InsertUserInput, UpdateUserInput, User, UserId},
        ports::UserRepository,
    },
};
use crate::infrastructure::outbox::append_outbox_records;

/// Postgres user repository.
///
/// Every write method runs the business statement and the outbox staging in
/// one transaction, so a user row can never commit without the events it
/// raised and vice versa.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pub pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PostgresUserRepository {
    async fn insert(&self, input: InsertUserInput) -> Result<User, CoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| CoreError::DatabaseError { msg: e.to_string() })?;

        let mut user = User::create(input);
        sqlx::query(
            r#"
            INSERT INTO admin_users (id, username, email, display_name, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| CoreError::DatabaseError { msg: e.to_string() })?;

        let records = stage_outbox_records(Utc::now(), &mut [&mut user])?;
        append_outbox_records(&mut tx, &records).await?;

        tx.commit()
            .await
            .map_err(|e| CoreError::DatabaseError { msg: e.to_string() })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, CoreError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, display_name, is_active, created_at, updated_at
            FROM admin_users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CoreError::DatabaseError { msg: e.to_string() })
    }

    async fn list(
        &self,
        pagination: &GetPaginated,
    ) -> Result<(Vec<User>, TotalPaginatedElements), CoreError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| CoreError::DatabaseError { msg: e.to_string() })?;

        let offset = i64::from(pagination.page.saturating_sub(1)) * i64::from(pagination.limit);
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, display_name, is_active, created_at, updated_at
            FROM admin_users
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(i64::from(pagination.limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CoreError::DatabaseError { msg: e.to_string() })?;

        Ok((users, total as u64))
    }

    async fn update(&self, input: UpdateUserInput) -> Result<User, CoreError> {
        let mut user = self
            .find_by_id(&input.id)
            .await?
            .ok_or(CoreError::UserNotFound { id: input.id })?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| CoreError::DatabaseError { msg: e.to_string() })?;

        user.apply_update(input);
        sqlx::query(
            r#"
            UPDATE admin_users
            SET username = $2, email = $3, display_name = $4, is_active = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.is_active)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| CoreError::DatabaseError { msg: e.to_string() })?;

        let records = stage_outbox_records(Utc::now(), &mut [&mut user])?;
        append_outbox_records(&mut tx, &records).await?;

        tx.commit()
            .await
            .map_err(|e| CoreError::DatabaseError { msg: e.to_string() })?;

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), CoreError> {
        let mut user = self
            .find_by_id(id)
            .await?
            .ok_or(CoreError::UserNotFound { id: *id })?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| CoreError::DatabaseError { msg: e.to_string() })?;

        sqlx::query("DELETE FROM admin_users WHERE id = $1")
            .bind(user.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| CoreError::DatabaseError { msg: e.to_string() })?;

        user.mark_deleted();
        let records = stage_outbox_records(Utc::now(), &mut [&mut user])?;
        append_outbox_records(&mut tx, &records).await?;

        tx.commit()
            .await
            .map_err(|e| CoreError::DatabaseError { msg: e.to_string() })?;

        Ok(())
    }
}
