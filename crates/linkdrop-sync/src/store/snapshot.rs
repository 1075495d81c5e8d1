//! Point-in-time copies of the tree store.

use std::collections::HashMap;

use linkdrop_core::types::ItemId;
use linkdrop_entity::item::TreeItem;

/// An immutable value copy of the tree store, captured before an
/// optimistic mutation.
///
/// Restoring a snapshot replaces the live state wholesale; there is no
/// partial or per-item rollback.
#[derive(Debug, Clone)]
pub struct TreeSnapshot {
    pub(crate) items: HashMap<ItemId, TreeItem>,
    pub(crate) roots: Vec<ItemId>,
}

impl TreeSnapshot {
    /// Number of items captured.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
