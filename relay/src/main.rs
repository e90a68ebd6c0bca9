mod config;
mod error;
mod handlers;

use std::sync::Arc;

use admin_core::{
    EventDecoderRegistry, InProcessEventBus, OutboxProcessor, OutboxRelay, PgOutboxStore,
};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tokio::time::Duration;
use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::RelayError;
use crate::handlers::AuditTrailHandler;

#[tokio::main]
async fn main() -> Result<(), RelayError> {
    // JSON output for log shipping; RUST_LOG controls the level
    // Examples: RUST_LOG=debug, RUST_LOG=relay=debug, RUST_LOG=admin_core=trace
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load .env file as fallback (only sets variables that aren't already in the environment)
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env file from: {:?}", path);
    } else {
        info!("No .env file found, using system environment variables");
    }

    let config = Config::parse();
    trace!("...config and env vars loaded.");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(config.database.clone().into())
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let mut bus = InProcessEventBus::new();
    bus.register(Arc::new(AuditTrailHandler));

    let processor = OutboxProcessor::new(
        PgOutboxStore::new(pool),
        bus,
        EventDecoderRegistry::with_default_decoders(),
        config.relay.batch_size,
    );
    let relay = OutboxRelay::new(processor, Duration::from_secs(config.relay.interval_secs));

    info!("Starting the outbox relay worker");
    relay.start().await;
    Ok(())
}
