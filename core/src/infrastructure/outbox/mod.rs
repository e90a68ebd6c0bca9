pub mod postgres;

pub use postgres::{PgOutboxStore, append_outbox_records};
