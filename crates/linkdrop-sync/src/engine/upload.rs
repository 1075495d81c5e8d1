//! Staged-to-persisted transitions of queued uploads.

use tracing::{debug, info, warn};

use linkdrop_core::error::AppError;
use linkdrop_core::events::UploadEvent;
use linkdrop_core::result::AppResult;
use linkdrop_core::types::ItemId;
use linkdrop_entity::item::TreeItem;

use super::SyncEngine;

impl SyncEngine {
    /// Create a staged folder so uploaders can organise queued files
    /// before anything is persisted.
    pub(crate) async fn handle_stage_folder(
        &mut self,
        name: &str,
        parent_id: Option<ItemId>,
    ) -> AppResult<TreeItem> {
        if let Some(pid) = parent_id {
            let parent = self
                .store
                .get(pid)
                .ok_or_else(|| AppError::not_found(format!("Parent folder {pid} not found")))?;
            if parent.is_file() {
                return Err(AppError::invalid_target("Files cannot contain children"));
            }
        }

        let item = self.staging.stage_folder(name, parent_id)?;
        if !self.store.add_item(item.clone()) {
            self.staging.abandon(item.id);
            return Err(AppError::internal(
                "Could not attach staged folder to the tree",
            ));
        }
        debug!(item_id = %item.id, name = %item.name, "Folder staged");
        Ok(item)
    }

    /// Swap a staged item for its server-assigned identity after a
    /// successful upload, keeping its position among siblings.
    pub(crate) async fn handle_commit_upload(
        &mut self,
        staged_id: ItemId,
        mut server_item: TreeItem,
    ) -> AppResult<()> {
        let staged = self
            .store
            .get(staged_id)
            .ok_or_else(|| AppError::not_found(format!("Staged item {staged_id} not found")))?;
        if !staged.staged {
            return Err(AppError::validation("Item is already persisted"));
        }

        server_item.staged = false;
        let new_id = server_item.id;
        let name = server_item.name.clone();
        self.store.replace_item(staged_id, server_item)?;
        if let Err(err) = self.staging.promote(staged_id) {
            warn!(item_id = %staged_id, error = %err, "Staging mirror out of sync on commit");
        }

        info!(staged_id = %staged_id, item_id = %new_id, "Upload committed");
        self.invalidate_tree(false).await;
        self.emit_upload(UploadEvent::UploadCommitted {
            item_id: new_id,
            name,
        })
        .await;
        Ok(())
    }

    /// Drop a staged item before upload, cascading through staged
    /// descendants and their queued payloads.
    pub(crate) async fn handle_abandon_upload(&mut self, staged_id: ItemId) -> AppResult<()> {
        let staged = self
            .store
            .get(staged_id)
            .ok_or_else(|| AppError::not_found(format!("Staged item {staged_id} not found")))?;
        if !staged.staged {
            return Err(AppError::validation("Only staged items can be abandoned"));
        }

        let removed = self.store.remove_subtree(staged_id)?;
        for id in &removed {
            self.staging.abandon(*id);
        }

        info!(item_id = %staged_id, removed = removed.len(), "Upload abandoned");
        self.emit_upload(UploadEvent::UploadAbandoned { item_id: staged_id })
            .await;
        Ok(())
    }
}
