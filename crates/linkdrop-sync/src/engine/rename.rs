//! Rename handling with optimistic apply and revert on failure.

use tracing::{debug, info, warn};

use linkdrop_core::error::AppError;
use linkdrop_core::events::TreeEvent;
use linkdrop_core::result::AppResult;
use linkdrop_core::types::ItemId;

use super::SyncEngine;

impl SyncEngine {
    /// Rename one item.
    ///
    /// The optimistic name change is reverted when the persistence action
    /// fails, keeping rename consistent with move/delete rollback. On
    /// success the server's canonical name wins (it may differ when the
    /// server resolved a naming conflict).
    pub(crate) async fn handle_rename(&mut self, item_id: ItemId, new_name: &str) -> AppResult<()> {
        let name = new_name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Item name cannot be empty"));
        }

        let item = self
            .store
            .get(item_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Item {item_id} not found")))?;
        if item.name == name {
            return Ok(());
        }

        let old_name = item.name.clone();
        self.store.rename(item_id, name)?;

        if item.staged {
            self.staging.rename_staged_item(item_id, name)?;
            debug!(item_id = %item_id, name = %name, "Staged item renamed locally");
            self.emit_tree(rename_succeeded(item.is_file(), item_id, name.to_string()))
                .await;
            return Ok(());
        }

        let _guard = self.gate.hold();
        match self.actions.rename_item(item_id, name).await {
            Ok(renamed) => {
                if renamed.name != name {
                    self.store.rename(item_id, &renamed.name)?;
                }
                info!(item_id = %item_id, name = %renamed.name, "Item renamed");
                self.invalidate_tree(false).await;
                self.emit_tree(rename_succeeded(item.is_file(), item_id, renamed.name))
                    .await;
                Ok(())
            }
            Err(err) => {
                warn!(item_id = %item_id, error = %err, "Rename persistence failed; reverting");
                self.store.rename(item_id, &old_name)?;
                self.invalidate_tree(true).await;
                self.emit_tree(rename_failed(item.is_file(), item_id, err.message.clone()))
                    .await;
                Err(err)
            }
        }
    }
}

fn rename_succeeded(is_file: bool, item_id: ItemId, name: String) -> TreeEvent {
    if is_file {
        TreeEvent::FileRenamed { item_id, name }
    } else {
        TreeEvent::FolderRenamed { item_id, name }
    }
}

fn rename_failed(is_file: bool, item_id: ItemId, reason: String) -> TreeEvent {
    if is_file {
        TreeEvent::FileRenameFailed { item_id, reason }
    } else {
        TreeEvent::FolderRenameFailed { item_id, reason }
    }
}
