//! Batch move/delete with progress publication and unit rollback.

use tracing::{info, warn};

use linkdrop_core::error::AppError;
use linkdrop_core::events::TreeEvent;
use linkdrop_core::result::AppResult;
use linkdrop_core::types::ItemId;
use linkdrop_entity::batch::BatchProgress;

use super::{BatchOutcome, SyncEngine};

impl SyncEngine {
    /// Move a selection of items under one target folder.
    ///
    /// The persistence action is called once for the whole set; on
    /// failure the entire batch rolls back as a unit and the cache is
    /// force-refetched.
    pub(crate) async fn handle_batch_move(
        &mut self,
        item_ids: Vec<ItemId>,
        target_id: ItemId,
    ) -> AppResult<BatchOutcome> {
        if item_ids.is_empty() {
            return Ok(BatchOutcome {
                progress: BatchProgress::idle(),
                clear_selection: false,
            });
        }
        self.check_batch_size(item_ids.len())?;

        let target = match self.store.get(target_id) {
            Some(target) => target.clone(),
            None => {
                return Err(AppError::not_found(format!(
                    "Target folder {target_id} not found"
                )));
            }
        };
        self.check_drop_target(&target, &item_ids).await?;

        let _guard = self.gate.hold();
        let mut progress = BatchProgress::begin(item_ids.len());
        self.publish_progress(&progress);

        match self.apply_move(&item_ids, target_id, &target.name).await {
            Ok(_) => {
                progress.complete_all();
                self.publish_progress(&progress);
                Ok(BatchOutcome {
                    progress,
                    clear_selection: true,
                })
            }
            Err(err) => {
                progress.fail_all(&item_ids, &err.message);
                self.publish_progress(&progress);
                Err(err)
            }
        }
    }

    /// Delete a selection of items.
    ///
    /// The local store cascades through descendants (staged descendants
    /// are abandoned from the upload queue), while the persistence action
    /// receives only the selected top-level IDs; the server enumerates
    /// descendants itself.
    pub(crate) async fn handle_batch_delete(
        &mut self,
        item_ids: Vec<ItemId>,
    ) -> AppResult<BatchOutcome> {
        if item_ids.is_empty() {
            return Ok(BatchOutcome {
                progress: BatchProgress::idle(),
                clear_selection: false,
            });
        }
        self.check_batch_size(item_ids.len())?;

        let mut selection: Vec<ItemId> = Vec::with_capacity(item_ids.len());
        for id in item_ids {
            if !self.store.contains(id) {
                return Err(AppError::not_found(format!("Item {id} not found")));
            }
            if !selection.contains(&id) {
                selection.push(id);
            }
        }

        // Selected IDs nested under another selected ID fall with its
        // subtree; only the top-level ones drive the removal.
        let top: Vec<ItemId> = selection
            .iter()
            .copied()
            .filter(|id| {
                !selection
                    .iter()
                    .any(|other| other != id && self.store.is_descendant_of(*id, *other))
            })
            .collect();

        let _guard = self.gate.hold();
        let mut progress = BatchProgress::begin(selection.len());
        self.publish_progress(&progress);

        let staged_removed: Vec<ItemId> = top
            .iter()
            .flat_map(|id| self.store.subtree_ids(*id))
            .filter(|id| self.store.get(*id).is_some_and(|item| item.staged))
            .collect();
        let persisted_top: Vec<ItemId> = top
            .iter()
            .copied()
            .filter(|id| self.store.get(*id).is_some_and(|item| !item.staged))
            .collect();

        let snapshot = self.store.snapshot();
        let mut removed_count = 0usize;
        for &id in &top {
            match self.store.remove_subtree(id) {
                Ok(removed) => removed_count += removed.len(),
                Err(err) => {
                    self.store.restore(snapshot);
                    return Err(err);
                }
            }
        }

        if persisted_top.is_empty() {
            for id in &staged_removed {
                self.staging.abandon(*id);
            }
            info!(count = removed_count, "Staged items deleted locally");
            progress.complete_all();
            self.publish_progress(&progress);
            self.emit_tree(TreeEvent::ItemsDeleted {
                item_ids: selection,
                removed_count,
            })
            .await;
            return Ok(BatchOutcome {
                progress,
                clear_selection: true,
            });
        }

        match self.actions.batch_delete(&persisted_top).await {
            Ok(_) => {
                for id in &staged_removed {
                    self.staging.abandon(*id);
                }
                info!(
                    selected = selection.len(),
                    removed = removed_count,
                    "Batch delete complete"
                );
                progress.complete_all();
                self.publish_progress(&progress);
                self.invalidate_tree(false).await;
                self.emit_tree(TreeEvent::ItemsDeleted {
                    item_ids: selection,
                    removed_count,
                })
                .await;
                Ok(BatchOutcome {
                    progress,
                    clear_selection: true,
                })
            }
            Err(err) => {
                warn!(error = %err, "Batch delete persistence failed; rolling back");
                self.store.restore(snapshot);
                progress.fail_all(&selection, &err.message);
                self.publish_progress(&progress);
                self.invalidate_tree(true).await;
                self.emit_tree(TreeEvent::BatchDeleteFailed {
                    item_ids: selection,
                    reason: err.message.clone(),
                })
                .await;
                Err(err)
            }
        }
    }

    fn check_batch_size(&self, len: usize) -> AppResult<()> {
        if len > self.config.max_batch_items {
            return Err(AppError::validation(format!(
                "Batch exceeds the {} item limit",
                self.config.max_batch_items
            )));
        }
        Ok(())
    }
}
