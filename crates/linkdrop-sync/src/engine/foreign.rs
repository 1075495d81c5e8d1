//! Admissibility and routing of drag payloads from outside the tree.

use tracing::{debug, info, warn};

use linkdrop_core::error::AppError;
use linkdrop_core::events::{TreeEvent, UploadEvent};
use linkdrop_core::result::AppResult;
use linkdrop_core::types::ItemId;
use linkdrop_entity::drag::{DropPosition, ForeignPayload, IncomingFile};

use super::SyncEngine;

impl SyncEngine {
    /// Decide whether a foreign drop is admissible and route it.
    ///
    /// Admissible positions are a folder or a between-items gap inside a
    /// folder. OS file payloads go to the upload flow (staged into the
    /// tree); payloads of tree-item identifiers from another tree
    /// instance are explicitly deferred.
    pub(crate) async fn handle_foreign_drop(
        &mut self,
        position: DropPosition,
        payload: ForeignPayload,
    ) -> AppResult<Vec<ItemId>> {
        let folder_id = position.folder_id();
        let folder = self
            .store
            .get(folder_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Drop folder {folder_id} not found")))?;
        if folder.is_file() {
            warn!(target_id = %folder.id, "Foreign drop rejected: target is a file");
            self.emit_tree(TreeEvent::InvalidDropTarget {
                target_id: folder.id,
                target_name: folder.name.clone(),
            })
            .await;
            return Err(AppError::invalid_target(
                "Foreign drops are only admissible on folders",
            ));
        }

        match payload {
            ForeignPayload::OsFiles(files) => self.queue_incoming_files(folder_id, files).await,
            ForeignPayload::TreeItemRefs(refs) => {
                debug!(count = refs.len(), "Cross-tree item drop deferred");
                Err(AppError::not_implemented(
                    "Drags between tree instances are not supported yet",
                ))
            }
        }
    }

    /// Stage each dropped file under the target folder. All-or-nothing:
    /// if one file is rejected (queue full, oversized), the ones already
    /// staged by this drop are abandoned again.
    async fn queue_incoming_files(
        &mut self,
        folder_id: ItemId,
        files: Vec<IncomingFile>,
    ) -> AppResult<Vec<ItemId>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let mut staged_ids: Vec<ItemId> = Vec::with_capacity(files.len());
        for incoming in files {
            let staged = match self.staging.stage_file(
                &incoming.name,
                Some(folder_id),
                incoming.content,
                incoming.mime_type,
            ) {
                Ok(item) => item,
                Err(err) => {
                    for id in staged_ids {
                        self.staging.abandon(id);
                        let _ = self.store.remove_item(id);
                    }
                    return Err(err);
                }
            };
            if !self.store.add_item(staged.clone()) {
                self.staging.abandon(staged.id);
                for id in staged_ids {
                    self.staging.abandon(id);
                    let _ = self.store.remove_item(id);
                }
                return Err(AppError::internal(format!(
                    "Could not attach staged file '{}' to the tree",
                    staged.name
                )));
            }
            staged_ids.push(staged.id);
        }

        info!(folder_id = %folder_id, count = staged_ids.len(), "Foreign files queued for upload");
        self.emit_upload(UploadEvent::FilesQueued {
            folder_id: Some(folder_id),
            count: staged_ids.len(),
        })
        .await;
        Ok(staged_ids)
    }
}
