pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use application::{AdminService, create_repositories};
pub use domain::common::CoreError;
pub use domain::common::services::Service;
pub use domain::events::{AdminEvent, EventDecoderRegistry};
pub use domain::outbox::{OutboxRecord, OutboxStore, stage_outbox_records};

// Re-export outbox pattern primitives
pub use infrastructure::bus::InProcessEventBus;
pub use infrastructure::outbox::{PgOutboxStore, append_outbox_records};
pub use infrastructure::relay::{BatchSummary, OutboxProcessor, OutboxRelay};
