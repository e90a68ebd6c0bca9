use admin_core::CoreError;
use admin_core::domain::events::{AdminEvent, EventHandler};
use async_trait::async_trait;
use tracing::info;

/// Writes an audit line for every dispatched event.
///
/// Safe under redelivery: replaying an event emits the same line again,
/// which the audit trail tolerates.
pub struct AuditTrailHandler;

#[async_trait]
impl EventHandler for AuditTrailHandler {
    fn name(&self) -> &'static str {
        "audit-trail"
    }

    async fn handle(&self, event: &AdminEvent) -> Result<(), CoreError> {
        match event {
            AdminEvent::UserCreated(e) => {
                info!(user_id = %e.user_id, username = %e.username, "audit: user created")
            }
            AdminEvent::UserUpdated(e) => {
                info!(user_id = %e.user_id, "audit: user updated")
            }
            AdminEvent::UserDeleted(e) => {
                info!(user_id = %e.user_id, "audit: user deleted")
            }
            AdminEvent::WelcomeEmailRequested(e) => {
                info!(user_id = %e.user_id, email = %e.email, "audit: welcome email requested")
            }
        }
        Ok(())
    }
}
