//! Domain events emitted by tree synchronization operations.
//!
//! Events are dispatched through the [`NotificationSink`] trait and
//! rendered by the UI layer as toasts; the engine itself never renders
//! anything.
//!
//! [`NotificationSink`]: crate::traits::notify::NotificationSink

pub mod tree;
pub mod upload;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use tree::TreeEvent;
pub use upload::UploadEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A tree-mutation event.
    Tree(TreeEvent),
    /// An upload staging event.
    Upload(UploadEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
        }
    }
}
