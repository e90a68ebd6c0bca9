pub mod capture;
pub mod entities;
pub mod ports;

pub use capture::stage_outbox_records;
pub use entities::OutboxRecord;
pub use ports::OutboxStore;
