use std::sync::Arc;

use tracing::warn;

use crate::domain::common::CoreError;
use crate::domain::events::{AdminEvent, DomainEvent, EventBus, EventHandler};

/// In-process event bus that fans one event out to every registered handler.
///
/// Handlers run sequentially, in registration order, and every handler is
/// awaited even when an earlier one fails; the first failure is what gets
/// reported back to the batch processor. A failed publish leaves the outbox
/// record pending, so every handler will see the event again on the retry —
/// handlers must be idempotent.
#[derive(Clone, Default)]
pub struct InProcessEventBus {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl InProcessEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn register(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl EventBus for InProcessEventBus {
    async fn publish(&self, event: &AdminEvent) -> Result<(), CoreError> {
        let mut first_failure = None;

        for handler in &self.handlers {
            if let Err(e) = handler.handle(event).await {
                warn!(
                    "Handler {} failed for event {}: {}",
                    handler.name(),
                    event.event_type(),
                    e
                );
                if first_failure.is_none() {
                    first_failure = Some(CoreError::HandlerError {
                        handler: handler.name().to_string(),
                        msg: e.to_string(),
                    });
                }
            }
        }

        match first_failure {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }
}
