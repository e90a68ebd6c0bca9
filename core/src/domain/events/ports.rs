use async_trait::async_trait;

use crate::domain::common::CoreError;
use crate::domain::events::AdminEvent;

/// In-process event bus consumed by the batch processor.
///
/// `publish` fans an event out to zero or more handlers and reports success
/// or failure back to the caller. Delivery is at-least-once: a crash between
/// a successful publish and the durable outcome mark causes redelivery on a
/// later run, so handler idempotency is part of this contract.
pub trait EventBus: Send + Sync {
    fn publish(&self, event: &AdminEvent) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// A single subscriber on the in-process bus.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Stable handler name, used in logs and failure details.
    fn name(&self) -> &'static str;

    async fn handle(&self, event: &AdminEvent) -> Result<(), CoreError>;
}
