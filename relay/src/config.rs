use clap::Parser;
use sqlx::postgres::PgConnectOptions;

#[derive(Clone, Parser, Debug)]
#[command(name = "admin-relay")]
#[command(about = "Outbox relay worker for the Admin Service", long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub relay: RelayConfig,
}

#[derive(Clone, Parser, Debug)]
pub struct DatabaseConfig {
    #[arg(
        long = "database-host",
        env = "DATABASE_HOST",
        default_value = "localhost"
    )]
    pub host: String,

    #[arg(long = "database-port", env = "DATABASE_PORT", default_value = "5432")]
    pub port: u16,

    #[arg(
        long = "database-user",
        env = "DATABASE_USER",
        default_value = "postgres"
    )]
    pub user: String,

    #[arg(
        long = "database-password",
        env = "DATABASE_PASSWORD",
        value_name = "database_password"
    )]
    pub password: String,

    #[arg(
        long = "database-name",
        env = "DATABASE_NAME",
        default_value = "admin",
        value_name = "database_name"
    )]
    pub db_name: String,
}

impl Into<PgConnectOptions> for DatabaseConfig {
    fn into(self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.db_name)
    }
}

#[derive(Clone, Parser, Debug)]
pub struct RelayConfig {
    /// Seconds between relay runs. Must be at least 1.
    #[arg(
        long = "relay-interval-secs",
        env = "RELAY_INTERVAL_SECS",
        default_value = "10",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_secs: u64,

    /// Maximum records fetched per run. Must be at least 1.
    #[arg(
        long = "relay-batch-size",
        env = "RELAY_BATCH_SIZE",
        default_value = "20",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub batch_size: u32,
}
