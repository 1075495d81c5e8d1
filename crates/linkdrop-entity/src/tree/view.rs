//! Tree view structures for hierarchical display.
//!
//! The view is rebuilt from the store after every structural mutation,
//! never incrementally diffed.

use serde::{Deserialize, Serialize};

use linkdrop_core::types::ItemId;

use crate::item::ItemKind;

/// A node in the rendered tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Item ID.
    pub id: ItemId,
    /// Item name.
    pub name: String,
    /// File or folder.
    pub kind: ItemKind,
    /// Whether the item is still pending upload.
    pub staged: bool,
    /// Child nodes, in sibling order. Empty for files.
    pub children: Vec<TreeNode>,
}

/// A complete rendered tree for one container view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeView {
    /// The root-level nodes, in order.
    pub roots: Vec<TreeNode>,
    /// Total number of items in the tree.
    pub total_items: u64,
}

impl TreeView {
    /// Create an empty tree view.
    pub fn empty() -> Self {
        Self {
            roots: Vec::new(),
            total_items: 0,
        }
    }

    /// Depth-first search for a node by ID.
    pub fn find(&self, id: ItemId) -> Option<&TreeNode> {
        fn walk(nodes: &[TreeNode], id: ItemId) -> Option<&TreeNode> {
            for node in nodes {
                if node.id == id {
                    return Some(node);
                }
                if let Some(found) = walk(&node.children, id) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.roots, id)
    }
}
