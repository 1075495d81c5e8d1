//! The upload staging store.

use bytes::Bytes;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use linkdrop_core::config::staging::StagingConfig;
use linkdrop_core::error::AppError;
use linkdrop_core::result::AppResult;
use linkdrop_core::types::{ItemId, UploadId};
use linkdrop_entity::item::TreeItem;
use linkdrop_entity::upload::StagedUpload;

/// Holds files and folders queued for upload before they exist
/// server-side.
///
/// Mirrors the tree store's shape for staged items (the tree store holds
/// the same items with `staged = true` for rendering and ordering); the
/// payload map additionally carries the queued file bytes. Mutations on
/// staged items are local-only until upload, so this store never talks
/// to persistence.
#[derive(Debug)]
pub struct StagingStore {
    /// Staging limits.
    config: StagingConfig,
    /// Staged item mirror: item ID → staged tree item.
    items: DashMap<ItemId, TreeItem>,
    /// Queued file payloads: item ID → upload record.
    payloads: DashMap<ItemId, StagedUpload>,
}

impl StagingStore {
    /// Create an empty staging store with the given limits.
    pub fn new(config: StagingConfig) -> Self {
        Self {
            config,
            items: DashMap::new(),
            payloads: DashMap::new(),
        }
    }

    /// Queue a file for upload under `parent_id`.
    ///
    /// Returns the staged tree item to insert into the tree store.
    pub fn stage_file(
        &self,
        name: &str,
        parent_id: Option<ItemId>,
        content: Bytes,
        mime_type: Option<String>,
    ) -> AppResult<TreeItem> {
        if name.trim().is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }
        if self.payloads.len() >= self.config.max_staged_files {
            return Err(AppError::validation(format!(
                "Upload queue is full ({} files)",
                self.config.max_staged_files
            )));
        }
        if content.len() as u64 > self.config.max_file_size_bytes {
            return Err(AppError::validation(format!(
                "File '{}' exceeds the {} byte limit",
                name, self.config.max_file_size_bytes
            )));
        }

        let item = TreeItem::file(ItemId::new(), name, parent_id).staged();
        let upload = StagedUpload {
            upload_id: UploadId::new(),
            item_id: item.id,
            name: item.name.clone(),
            size_bytes: content.len() as u64,
            mime_type,
            content,
            queued_at: Utc::now(),
        };

        debug!(item_id = %item.id, name = %item.name, size = upload.size_bytes, "File staged for upload");
        self.payloads.insert(item.id, upload);
        self.items.insert(item.id, item.clone());
        Ok(item)
    }

    /// Create a staged folder (no payload) under `parent_id`.
    pub fn stage_folder(&self, name: &str, parent_id: Option<ItemId>) -> AppResult<TreeItem> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }
        let item = TreeItem::folder(ItemId::new(), name, parent_id).staged();
        self.items.insert(item.id, item.clone());
        Ok(item)
    }

    /// Reparent a staged item in the mirror.
    pub fn move_staged_item(&self, item_id: ItemId, new_parent_id: Option<ItemId>) -> AppResult<()> {
        let mut item = self
            .items
            .get_mut(&item_id)
            .ok_or_else(|| AppError::not_found(format!("Staged item {item_id} not found")))?;
        item.parent_id = new_parent_id;
        Ok(())
    }

    /// Rename a staged item in the mirror.
    pub fn rename_staged_item(&self, item_id: ItemId, new_name: &str) -> AppResult<()> {
        let mut item = self
            .items
            .get_mut(&item_id)
            .ok_or_else(|| AppError::not_found(format!("Staged item {item_id} not found")))?;
        item.name = new_name.to_string();
        if let Some(mut payload) = self.payloads.get_mut(&item_id) {
            payload.name = new_name.to_string();
        }
        Ok(())
    }

    /// Remove a staged item on successful upload, returning its mirror
    /// entry. The payload is dropped; the caller replaces the tree item
    /// with the server-assigned identity.
    pub fn promote(&self, item_id: ItemId) -> AppResult<TreeItem> {
        let (_, item) = self
            .items
            .remove(&item_id)
            .ok_or_else(|| AppError::not_found(format!("Staged item {item_id} not found")))?;
        self.payloads.remove(&item_id);
        debug!(item_id = %item_id, "Staged item promoted");
        Ok(item)
    }

    /// Drop a staged item and its payload without uploading.
    pub fn abandon(&self, item_id: ItemId) -> Option<TreeItem> {
        self.payloads.remove(&item_id);
        let removed = self.items.remove(&item_id).map(|(_, item)| item);
        if removed.is_some() {
            debug!(item_id = %item_id, "Staged item abandoned");
        }
        removed
    }

    /// Whether an item is currently staged here.
    pub fn is_staged(&self, item_id: ItemId) -> bool {
        self.items.contains_key(&item_id)
    }

    /// All staged files.
    pub fn staged_files(&self) -> Vec<TreeItem> {
        self.items
            .iter()
            .filter(|entry| entry.value().is_file())
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// All staged folders.
    pub fn staged_folders(&self) -> Vec<TreeItem> {
        self.items
            .iter()
            .filter(|entry| entry.value().is_folder())
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Queued uploads in FIFO order, for the upload flow to drain.
    pub fn queued_uploads(&self) -> Vec<StagedUpload> {
        let mut uploads: Vec<StagedUpload> = self
            .payloads
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        uploads.sort_by_key(|upload| upload.queued_at);
        uploads
    }

    /// Read a queued payload by staged item ID.
    pub fn payload(&self, item_id: ItemId) -> Option<StagedUpload> {
        self.payloads.get(&item_id).map(|entry| entry.value().clone())
    }

    /// Number of staged items (files and folders).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
