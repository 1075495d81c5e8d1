//! Tree item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use linkdrop_core::types::ItemId;

/// Discriminates files from folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A file; never has children.
    File,
    /// A folder; carries an ordered children list.
    Folder,
}

/// A file or folder in the organizational hierarchy.
///
/// Staged items exist only client-side while queued for upload; they carry
/// a client-generated ID until the server assigns its own on commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeItem {
    /// Unique item identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Whether this is a file or a folder.
    pub kind: ItemKind,
    /// Parent folder ID (`None` for root-level items).
    pub parent_id: Option<ItemId>,
    /// Ordered child IDs. `Some` exactly when `kind` is [`ItemKind::Folder`].
    pub children: Option<Vec<ItemId>>,
    /// Whether the item is not yet persisted server-side.
    pub staged: bool,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

impl TreeItem {
    /// Create a file item.
    pub fn file(id: ItemId, name: impl Into<String>, parent_id: Option<ItemId>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: ItemKind::File,
            parent_id,
            children: None,
            staged: false,
            created_at: Utc::now(),
        }
    }

    /// Create a folder item with an empty children list.
    pub fn folder(id: ItemId, name: impl Into<String>, parent_id: Option<ItemId>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: ItemKind::Folder,
            parent_id,
            children: Some(Vec::new()),
            staged: false,
            created_at: Utc::now(),
        }
    }

    /// Mark the item as staged (not yet persisted).
    pub fn staged(mut self) -> Self {
        self.staged = true;
        self
    }

    /// Check if this item is a file.
    pub fn is_file(&self) -> bool {
        matches!(self.kind, ItemKind::File)
    }

    /// Check if this item is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, ItemKind::Folder)
    }

    /// Check if this is a root-level item (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// The item's children, empty for files.
    pub fn child_ids(&self) -> &[ItemId] {
        self.children.as_deref().unwrap_or(&[])
    }
}
