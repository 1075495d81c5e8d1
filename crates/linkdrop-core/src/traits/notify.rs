//! Notification bus contract.

use async_trait::async_trait;

use crate::events::DomainEvent;

/// Receives typed domain events for user-facing rendering.
///
/// The UI layer turns these into toasts; the engine only emits. Delivery
/// is fire-and-forget: a sink must not fail the operation that emitted
/// the event.
#[async_trait]
pub trait NotificationSink: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver a domain event.
    async fn notify(&self, event: DomainEvent);
}
