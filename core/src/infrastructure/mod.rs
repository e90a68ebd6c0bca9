pub mod bus;
pub mod outbox;
pub mod relay;
pub mod user;

pub use bus::InProcessEventBus;
pub use outbox::{PgOutboxStore, append_outbox_records};
pub use relay::{OutboxProcessor, OutboxRelay};
