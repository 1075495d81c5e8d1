//! Staged upload entity model.

use bytes::Bytes;
use chrono::{DateTime, Utc};

use linkdrop_core::types::{ItemId, UploadId};

/// A file queued client-side, waiting to be uploaded.
///
/// Holds the raw content alongside the staged tree item's identity; the
/// record is dropped when the upload is committed or abandoned.
#[derive(Debug, Clone)]
pub struct StagedUpload {
    /// Unique upload identifier.
    pub upload_id: UploadId,
    /// The staged tree item this payload belongs to.
    pub item_id: ItemId,
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// MIME type, if known.
    pub mime_type: Option<String>,
    /// The queued file content.
    pub content: Bytes,
    /// When the file was queued.
    pub queued_at: DateTime<Utc>,
}
