pub mod processor;
pub mod scheduler;

pub use processor::{BatchSummary, OutboxProcessor};
pub use scheduler::OutboxRelay;
