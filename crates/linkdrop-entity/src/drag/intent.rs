//! Drop gesture description and classification.

use serde::{Deserialize, Serialize};

use linkdrop_core::types::ItemId;

/// A completed drag gesture over the tree, as delivered by the UI layer.
///
/// Exists only for the duration of a single drop. The engine classifies it
/// into a [`DropIntent`] exactly once before touching the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragOperation {
    /// The dragged item IDs, in drag-selection order.
    pub item_ids: Vec<ItemId>,
    /// The item the gesture was dropped on.
    pub target_id: ItemId,
    /// Insertion index, present when the target expects a specific
    /// position among its children.
    pub insertion_index: Option<usize>,
}

impl DragOperation {
    /// A gesture dropping items onto a folder.
    pub fn onto(item_ids: Vec<ItemId>, target_id: ItemId) -> Self {
        Self {
            item_ids,
            target_id,
            insertion_index: None,
        }
    }

    /// A gesture dropping items at a specific position under a folder.
    pub fn at_index(item_ids: Vec<ItemId>, target_id: ItemId, index: usize) -> Self {
        Self {
            item_ids,
            target_id,
            insertion_index: Some(index),
        }
    }
}

/// The classified meaning of a drop gesture.
///
/// Produced once at the start of drop handling, replacing ad-hoc checks
/// spread through the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIntent {
    /// Change sibling order under an unchanged parent.
    Reorder {
        /// The parent whose children are reordered.
        parent_id: ItemId,
        /// Where the dragged items land after removal from their old
        /// positions.
        insertion_index: usize,
    },
    /// Reparent the dragged items.
    Move {
        /// The new parent folder.
        target_parent_id: ItemId,
    },
}
