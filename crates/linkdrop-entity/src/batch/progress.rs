//! Progress counters for multi-item operations.

use serde::{Deserialize, Serialize};

use linkdrop_core::types::ItemId;

/// A per-item failure within a batch operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItemError {
    /// The failed item.
    pub item_id: ItemId,
    /// The failure message.
    pub message: String,
}

/// Progress of a multi-item operation, published to the UI while the
/// operation is in flight.
///
/// The batch persistence action is a single bulk call, so progress moves
/// in coarse before/after steps rather than streaming per item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchProgress {
    /// Total number of items in the batch.
    pub total: usize,
    /// Items completed so far.
    pub completed: usize,
    /// Items that failed.
    pub failed: usize,
    /// Per-item failure details.
    pub errors: Vec<BatchItemError>,
}

impl BatchProgress {
    /// Progress for an idle engine (no batch in flight).
    pub fn idle() -> Self {
        Self::default()
    }

    /// Start tracking a batch of `total` items.
    pub fn begin(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            failed: 0,
            errors: Vec::new(),
        }
    }

    /// Mark every item completed.
    pub fn complete_all(&mut self) {
        self.completed = self.total;
        self.failed = 0;
    }

    /// Mark every item failed with the same reason.
    pub fn fail_all(&mut self, item_ids: &[ItemId], reason: &str) {
        self.completed = 0;
        self.failed = self.total;
        self.errors = item_ids
            .iter()
            .map(|&item_id| BatchItemError {
                item_id,
                message: reason.to_string(),
            })
            .collect();
    }

    /// Whether every item has been accounted for.
    pub fn is_finished(&self) -> bool {
        self.completed + self.failed >= self.total
    }
}
