//! Upload staging domain events.

use serde::{Deserialize, Serialize};

use crate::types::ItemId;

/// Events related to the upload staging flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UploadEvent {
    /// Files from a foreign drop were queued for upload.
    FilesQueued {
        /// The destination folder (`None` for the container root).
        folder_id: Option<ItemId>,
        /// Number of files queued.
        count: usize,
    },
    /// A staged item was committed with its server-assigned identity.
    UploadCommitted {
        /// The server-assigned item ID.
        item_id: ItemId,
        /// The committed item's name.
        name: String,
    },
    /// A staged item was abandoned before upload.
    UploadAbandoned {
        /// The abandoned staged item ID.
        item_id: ItemId,
    },
}
