//! Payloads for drags originating outside the tree.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use linkdrop_core::types::ItemId;

/// Where a foreign drag was released over the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropPosition {
    /// Directly on an item. Admissible only when the item is a folder.
    OnItem(ItemId),
    /// In the gap between two children of a folder.
    Between {
        /// The folder owning the gap.
        parent_id: ItemId,
        /// Index of the gap.
        index: usize,
    },
}

impl DropPosition {
    /// The folder the position resolves into, before admissibility checks.
    pub fn folder_id(&self) -> ItemId {
        match *self {
            Self::OnItem(id) => id,
            Self::Between { parent_id, .. } => parent_id,
        }
    }
}

/// A file carried by an OS drag payload.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// File name as reported by the OS.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// MIME type, if the OS reported one.
    pub mime_type: Option<String>,
    /// The file content.
    pub content: Bytes,
}

impl IncomingFile {
    /// Create an incoming file from its name and content.
    pub fn new(name: impl Into<String>, content: Bytes) -> Self {
        Self {
            name: name.into(),
            size_bytes: content.len() as u64,
            mime_type: None,
            content,
        }
    }
}

/// A drag payload originating outside this tree instance.
#[derive(Debug, Clone)]
pub enum ForeignPayload {
    /// Files dropped from the desktop; routed to the upload flow.
    OsFiles(Vec<IncomingFile>),
    /// Plain-text item identifiers dragged from a different tree
    /// instance. Deferred: currently rejected as unimplemented.
    TreeItemRefs(Vec<String>),
}
