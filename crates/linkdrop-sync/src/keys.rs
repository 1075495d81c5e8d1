//! Cache key builders for all Linkdrop query-cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the engine invalidates.

use linkdrop_core::types::{ContainerId, ItemId};

/// Prefix applied to all Linkdrop cache keys.
const PREFIX: &str = "linkdrop";

/// Cache key for the full tree of a container.
pub fn container_tree(container_id: ContainerId) -> String {
    format!("{PREFIX}:tree:{container_id}")
}

/// Cache key for the ordered children listing of a folder.
pub fn folder_children(container_id: ContainerId, folder_id: ItemId) -> String {
    format!("{PREFIX}:children:{container_id}:{folder_id}")
}
