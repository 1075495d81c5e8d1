//! Persistence action contracts.
//!
//! The engine treats server-side persistence as a set of opaque async
//! functions. Action failures carry [`ErrorKind::Persistence`] and are
//! handled at the engine boundary with rollback plus a forced cache
//! refetch; they are never retried automatically.
//!
//! [`ErrorKind::Persistence`]: crate::error::ErrorKind::Persistence

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::{ContainerId, ItemId};

/// Summary returned by a successful move action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveSummary {
    /// The item IDs the server actually moved.
    pub moved: Vec<ItemId>,
}

/// The server-side view of an item after a rename.
///
/// The server may canonicalize the requested name (e.g. append a conflict
/// suffix); the engine applies the returned name over its optimistic one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamedItem {
    /// The renamed item's ID.
    pub item_id: ItemId,
    /// The name as persisted server-side.
    pub name: String,
}

/// Summary returned by a successful batch delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteSummary {
    /// The item IDs the server deleted, descendants included.
    pub deleted: Vec<ItemId>,
}

/// Server persistence actions for tree mutations.
///
/// Implementations wrap whatever transport the product uses (HTTP server
/// actions in the web client). Each method is a single suspension point;
/// the engine serializes calls, so implementations never see two
/// operations for the same container in flight at once.
#[async_trait]
pub trait PersistenceActions: Send + Sync + std::fmt::Debug + 'static {
    /// Move items under a new parent (`None` for the container root).
    async fn move_items(
        &self,
        container_id: ContainerId,
        item_ids: &[ItemId],
        target_parent_id: Option<ItemId>,
    ) -> AppResult<MoveSummary>;

    /// Replace the sibling order of a folder's children.
    async fn update_item_order(
        &self,
        container_id: ContainerId,
        parent_id: Option<ItemId>,
        ordered_child_ids: &[ItemId],
    ) -> AppResult<()>;

    /// Rename a single item.
    async fn rename_item(&self, item_id: ItemId, new_name: &str) -> AppResult<RenamedItem>;

    /// Delete items in bulk. The server enumerates descendants itself.
    async fn batch_delete(&self, item_ids: &[ItemId]) -> AppResult<DeleteSummary>;
}
