//! Commands processed by the engine task.

use tokio::sync::oneshot;

use linkdrop_core::result::AppResult;
use linkdrop_core::types::ItemId;
use linkdrop_entity::drag::{DragOperation, DropPosition, ForeignPayload};
use linkdrop_entity::item::TreeItem;
use linkdrop_entity::tree::TreeView;

use super::{BatchOutcome, DropOutcome};

/// Reply channel carrying an operation result back to the caller.
pub(crate) type Reply<T> = oneshot::Sender<AppResult<T>>;

/// One queued engine operation.
///
/// Commands are processed strictly in arrival order; a command's reply
/// is sent only after its handler has fully completed, success or
/// failure path included.
pub(crate) enum EngineCommand {
    /// A completed drag gesture over the tree.
    Drop {
        op: DragOperation,
        reply: Reply<DropOutcome>,
    },
    /// Rename a single item.
    Rename {
        item_id: ItemId,
        new_name: String,
        reply: Reply<()>,
    },
    /// A drag payload originating outside the tree.
    ForeignDrop {
        position: DropPosition,
        payload: ForeignPayload,
        reply: Reply<Vec<ItemId>>,
    },
    /// Move many items under one target folder.
    BatchMove {
        item_ids: Vec<ItemId>,
        target_id: ItemId,
        reply: Reply<BatchOutcome>,
    },
    /// Delete many items (descendants cascade).
    BatchDelete {
        item_ids: Vec<ItemId>,
        reply: Reply<BatchOutcome>,
    },
    /// Create a staged folder for upload-time organisation.
    StageFolder {
        name: String,
        parent_id: Option<ItemId>,
        reply: Reply<TreeItem>,
    },
    /// Swap a staged item for its server-assigned identity.
    CommitUpload {
        staged_id: ItemId,
        server_item: Box<TreeItem>,
        reply: Reply<()>,
    },
    /// Drop a staged item before upload.
    AbandonUpload {
        staged_id: ItemId,
        reply: Reply<()>,
    },
    /// Merge a background refresh payload (fire-and-forget).
    ApplyRefresh { items: Vec<TreeItem> },
    /// Rebuild and return the render tree.
    View {
        reply: oneshot::Sender<TreeView>,
    },
    /// Read a single item.
    Get {
        item_id: ItemId,
        reply: oneshot::Sender<Option<TreeItem>>,
    },
    /// Stop the engine task.
    Shutdown,
}
