//! Tree-mutation domain events.

use serde::{Deserialize, Serialize};

use crate::types::ItemId;

/// Events related to tree structure operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TreeEvent {
    /// Items were moved to a new parent.
    ItemsMoved {
        /// The moved item IDs.
        item_ids: Vec<ItemId>,
        /// The new parent folder (`None` for the container root).
        target_id: Option<ItemId>,
        /// The new parent's display name.
        target_name: String,
    },
    /// A move operation failed and was rolled back.
    MoveFailed {
        /// The item IDs that were being moved.
        item_ids: Vec<ItemId>,
        /// The failure reason.
        reason: String,
    },
    /// Sibling order under a folder was updated.
    OrderUpdated {
        /// The folder whose children were reordered.
        parent_id: ItemId,
    },
    /// A reorder operation failed and was rolled back.
    ReorderFailed {
        /// The folder whose children were being reordered.
        parent_id: ItemId,
        /// The failure reason.
        reason: String,
    },
    /// A file was renamed.
    FileRenamed {
        /// The file ID.
        item_id: ItemId,
        /// The new name.
        name: String,
    },
    /// A folder was renamed.
    FolderRenamed {
        /// The folder ID.
        item_id: ItemId,
        /// The new name.
        name: String,
    },
    /// A file rename failed.
    FileRenameFailed {
        /// The file ID.
        item_id: ItemId,
        /// The failure reason.
        reason: String,
    },
    /// A folder rename failed.
    FolderRenameFailed {
        /// The folder ID.
        item_id: ItemId,
        /// The failure reason.
        reason: String,
    },
    /// Items (and their descendants) were deleted.
    ItemsDeleted {
        /// The selected top-level item IDs.
        item_ids: Vec<ItemId>,
        /// Total number of items removed, descendants included.
        removed_count: usize,
    },
    /// A batch delete failed and was rolled back.
    BatchDeleteFailed {
        /// The selected item IDs.
        item_ids: Vec<ItemId>,
        /// The failure reason.
        reason: String,
    },
    /// A drop gesture targeted an item that cannot accept children.
    InvalidDropTarget {
        /// The rejected target ID.
        target_id: ItemId,
        /// The rejected target's display name.
        target_name: String,
    },
}
