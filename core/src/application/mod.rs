use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::{
    domain::common::{CoreError, services::Service},
    infrastructure::{
        outbox::PgOutboxStore, user::repositories::postgres::PostgresUserRepository,
    },
};

/// Concrete service type with PostgreSQL repositories
pub type AdminService = Service<PostgresUserRepository>;

#[derive(Clone)]
pub struct AdminRepositories {
    pool: PgPool,
    pub user_repository: PostgresUserRepository,
    pub outbox_store: PgOutboxStore,
}

pub async fn create_repositories(
    pg_connection_options: PgConnectOptions,
) -> Result<AdminRepositories, CoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(pg_connection_options)
        .await
        .map_err(|e| CoreError::ServiceUnavailable(e.to_string()))?;
    let user_repository = PostgresUserRepository::new(pool.clone());
    let outbox_store = PgOutboxStore::new(pool.clone());
    Ok(AdminRepositories {
        pool,
        user_repository,
        outbox_store,
    })
}

impl Into<AdminService> for AdminRepositories {
    fn into(self) -> AdminService {
        Service::new(self.user_repository)
    }
}

impl AdminRepositories {
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn shutdown_pool(&self) {
        let _ = &self.pool.close().await;
    }
}
