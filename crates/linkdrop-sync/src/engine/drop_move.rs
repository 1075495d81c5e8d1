//! Drop gesture handling: reorder vs. move, optimistic apply, rollback.

use tracing::{debug, info, warn};

use linkdrop_core::error::AppError;
use linkdrop_core::events::TreeEvent;
use linkdrop_core::result::AppResult;
use linkdrop_core::types::ItemId;
use linkdrop_entity::drag::{DragOperation, DropIntent};
use linkdrop_entity::item::TreeItem;

use super::{DropOutcome, SyncEngine};

impl SyncEngine {
    /// Resolve and execute a completed drag gesture.
    pub(crate) async fn handle_drop(&mut self, op: DragOperation) -> AppResult<DropOutcome> {
        if op.item_ids.is_empty() {
            return Ok(DropOutcome::NoChange);
        }

        let target = match self.store.get(op.target_id) {
            Some(target) => target.clone(),
            None => {
                return Err(AppError::not_found(format!(
                    "Drop target {} not found",
                    op.target_id
                )));
            }
        };
        self.check_drop_target(&target, &op.item_ids).await?;

        match self.classify(&op) {
            DropIntent::Reorder {
                parent_id,
                insertion_index,
            } => {
                self.apply_reorder(parent_id, &op.item_ids, insertion_index)
                    .await
            }
            DropIntent::Move { target_parent_id } => {
                self.apply_move(&op.item_ids, target_parent_id, &target.name)
                    .await
            }
        }
    }

    /// Reject drops onto files, onto a dragged item itself, or into a
    /// dragged item's own subtree. Runs before any mutation.
    pub(crate) async fn check_drop_target(
        &mut self,
        target: &TreeItem,
        item_ids: &[ItemId],
    ) -> AppResult<()> {
        if target.is_file() {
            warn!(target_id = %target.id, "Drop rejected: target is a file");
            self.emit_tree(TreeEvent::InvalidDropTarget {
                target_id: target.id,
                target_name: target.name.clone(),
            })
            .await;
            return Err(AppError::invalid_target("Files cannot contain children"));
        }

        for &id in item_ids {
            if !self.store.contains(id) {
                return Err(AppError::not_found(format!("Dragged item {id} not found")));
            }
            if id == target.id {
                self.emit_tree(TreeEvent::InvalidDropTarget {
                    target_id: target.id,
                    target_name: target.name.clone(),
                })
                .await;
                return Err(AppError::invalid_target(
                    "Cannot drop an item onto itself",
                ));
            }
            if self.store.is_descendant_of(target.id, id) {
                self.emit_tree(TreeEvent::InvalidDropTarget {
                    target_id: target.id,
                    target_name: target.name.clone(),
                })
                .await;
                return Err(AppError::invalid_target(
                    "Cannot drop an item into one of its own descendants",
                ));
            }
        }
        Ok(())
    }

    /// Classify the gesture exactly once: same parent plus an explicit
    /// insertion index means reorder, anything else is a move.
    fn classify(&self, op: &DragOperation) -> DropIntent {
        let same_parent = op.item_ids.iter().all(|id| {
            self.store.get(*id).and_then(|item| item.parent_id) == Some(op.target_id)
        });
        match op.insertion_index {
            Some(insertion_index) if same_parent => DropIntent::Reorder {
                parent_id: op.target_id,
                insertion_index,
            },
            _ => DropIntent::Move {
                target_parent_id: op.target_id,
            },
        }
    }

    /// Recompute sibling order optimistically, then persist it.
    async fn apply_reorder(
        &mut self,
        parent_id: ItemId,
        dragged: &[ItemId],
        insertion_index: usize,
    ) -> AppResult<DropOutcome> {
        let snapshot = self.store.snapshot();
        let Some(order) = self
            .store
            .reorder_children(parent_id, dragged, insertion_index)?
        else {
            debug!(parent_id = %parent_id, "Reorder produced an identical order; skipping");
            return Ok(DropOutcome::NoChange);
        };

        // Staged items are unknown to the server; an order change that
        // only moves staged items is local until upload.
        let all_dragged_staged = dragged
            .iter()
            .all(|id| self.store.get(*id).is_some_and(|item| item.staged));
        if all_dragged_staged {
            debug!(parent_id = %parent_id, "Reordered staged items locally");
            return Ok(DropOutcome::Reordered { parent_id });
        }

        let server_order: Vec<ItemId> = order
            .iter()
            .copied()
            .filter(|id| self.store.get(*id).is_some_and(|item| !item.staged))
            .collect();

        let _guard = self.gate.hold();
        match self
            .actions
            .update_item_order(self.container_id, Some(parent_id), &server_order)
            .await
        {
            Ok(()) => {
                info!(parent_id = %parent_id, count = dragged.len(), "Children reordered");
                self.invalidate_children(parent_id, false).await;
                self.emit_tree(TreeEvent::OrderUpdated { parent_id }).await;
                Ok(DropOutcome::Reordered { parent_id })
            }
            Err(err) => {
                warn!(parent_id = %parent_id, error = %err, "Reorder persistence failed; rolling back");
                self.store.restore(snapshot);
                self.invalidate_children(parent_id, true).await;
                self.emit_tree(TreeEvent::ReorderFailed {
                    parent_id,
                    reason: err.message.clone(),
                })
                .await;
                Err(err)
            }
        }
    }

    /// Reparent optimistically, then persist the move.
    ///
    /// Shared by single drops and batch moves: the dragged set may mix
    /// staged and persisted items, in which case only the persisted
    /// subset reaches the persistence action.
    pub(crate) async fn apply_move(
        &mut self,
        item_ids: &[ItemId],
        target_id: ItemId,
        target_name: &str,
    ) -> AppResult<DropOutcome> {
        let moving: Vec<ItemId> = item_ids
            .iter()
            .copied()
            .filter(|id| self.store.get(*id).and_then(|item| item.parent_id) != Some(target_id))
            .collect();
        if moving.is_empty() {
            debug!(target_id = %target_id, "Move is a no-op: items already under target");
            return Ok(DropOutcome::NoChange);
        }

        let snapshot = self.store.snapshot();
        let staged_origins: Vec<(ItemId, Option<ItemId>)> = moving
            .iter()
            .copied()
            .filter(|id| self.store.get(*id).is_some_and(|item| item.staged))
            .map(|id| (id, self.store.get(id).and_then(|item| item.parent_id)))
            .collect();

        for &id in &moving {
            if let Err(err) = self.store.move_item(id, Some(target_id)) {
                self.store.restore(snapshot);
                return Err(err);
            }
        }
        for &(id, _) in &staged_origins {
            if let Err(err) = self.staging.move_staged_item(id, Some(target_id)) {
                warn!(item_id = %id, error = %err, "Staging mirror out of sync on move");
            }
        }

        let persisted: Vec<ItemId> = moving
            .iter()
            .copied()
            .filter(|id| self.store.get(*id).is_some_and(|item| !item.staged))
            .collect();
        if persisted.is_empty() {
            info!(count = moving.len(), target_id = %target_id, "Staged items moved locally");
            return Ok(DropOutcome::Moved {
                item_ids: moving,
                persisted: false,
            });
        }

        let _guard = self.gate.hold();
        match self
            .actions
            .move_items(self.container_id, &persisted, Some(target_id))
            .await
        {
            Ok(_) => {
                info!(count = persisted.len(), target_id = %target_id, "Items moved");
                self.invalidate_tree(false).await;
                self.emit_tree(TreeEvent::ItemsMoved {
                    item_ids: moving.clone(),
                    target_id: Some(target_id),
                    target_name: target_name.to_string(),
                })
                .await;
                Ok(DropOutcome::Moved {
                    item_ids: moving,
                    persisted: true,
                })
            }
            Err(err) => {
                warn!(target_id = %target_id, error = %err, "Move persistence failed; rolling back");
                self.store.restore(snapshot);
                for (id, old_parent) in staged_origins {
                    if let Err(mirror_err) = self.staging.move_staged_item(id, old_parent) {
                        warn!(item_id = %id, error = %mirror_err, "Staging mirror out of sync on rollback");
                    }
                }
                self.invalidate_tree(true).await;
                self.emit_tree(TreeEvent::MoveFailed {
                    item_ids: moving,
                    reason: err.message.clone(),
                })
                .await;
                Err(err)
            }
        }
    }
}
