//! The single-writer synchronization engine.
//!
//! One spawned task owns the [`TreeStore`] and processes operations from
//! a command channel strictly in arrival order, each to completion
//! (including its persistence await) before the next. Two overlapping
//! drop gestures therefore never interleave their store mutations; the
//! channel is the FIFO queue the UI's concurrent gestures drain through.

mod batch;
mod command;
mod drop_move;
mod foreign;
mod handle;
mod rename;
mod upload;

pub use handle::SyncHandle;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use linkdrop_core::config::sync::SyncConfig;
use linkdrop_core::events::{DomainEvent, EventPayload, TreeEvent, UploadEvent};
use linkdrop_core::traits::{NotificationSink, PersistenceActions, QueryCache};
use linkdrop_core::types::{ContainerId, ItemId};
use linkdrop_entity::batch::BatchProgress;
use linkdrop_entity::item::TreeItem;

use crate::keys;
use crate::staging::StagingStore;
use crate::store::{RefreshGate, TreeStore};

use self::command::EngineCommand;

/// Result of a handled drop gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropOutcome {
    /// Items were reparented.
    Moved {
        /// The items that actually changed parent.
        item_ids: Vec<ItemId>,
        /// Whether a persistence action ran (`false` for staged-only
        /// moves, which are local until upload).
        persisted: bool,
    },
    /// Sibling order changed under one parent.
    Reordered {
        /// The parent whose children were reordered.
        parent_id: ItemId,
    },
    /// The gesture produced no net change; nothing was persisted or
    /// notified.
    NoChange,
}

/// Result of a batch move or delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Final progress counters for the batch.
    pub progress: BatchProgress,
    /// Whether the caller should clear its item selection.
    pub clear_selection: bool,
}

/// The engine state owned by the spawned actor task.
#[derive(Debug)]
pub struct SyncEngine {
    /// The container (workspace or link scope) this view session covers.
    container_id: ContainerId,
    /// The authoritative in-memory tree.
    store: TreeStore,
    /// Staged item mirror and upload queue.
    staging: Arc<StagingStore>,
    /// Server persistence actions.
    actions: Arc<dyn PersistenceActions>,
    /// UI query cache.
    cache: Arc<dyn QueryCache>,
    /// Notification bus.
    notifier: Arc<dyn NotificationSink>,
    /// Drag-operation-active flag.
    gate: RefreshGate,
    /// Batch progress publisher.
    progress_tx: watch::Sender<BatchProgress>,
    /// Engine settings.
    config: SyncConfig,
}

impl SyncEngine {
    /// Spawn the engine task for one container view session.
    ///
    /// `initial_items` is the server tree at session start; the returned
    /// handle is the only way to reach the engine.
    pub fn spawn(
        container_id: ContainerId,
        initial_items: Vec<TreeItem>,
        staging: Arc<StagingStore>,
        actions: Arc<dyn PersistenceActions>,
        cache: Arc<dyn QueryCache>,
        notifier: Arc<dyn NotificationSink>,
        config: SyncConfig,
    ) -> SyncHandle {
        let (tx, rx) = mpsc::channel(config.command_buffer_size.max(1));
        let (progress_tx, progress_rx) = watch::channel(BatchProgress::idle());
        let gate = RefreshGate::new();

        let engine = Self {
            container_id,
            store: TreeStore::from_items(initial_items),
            staging,
            actions,
            cache,
            notifier,
            gate: gate.clone(),
            progress_tx,
            config,
        };
        tokio::spawn(engine.run(rx));

        SyncHandle::new(container_id, tx, gate, progress_rx)
    }

    async fn run(mut self, mut rx: mpsc::Receiver<EngineCommand>) {
        info!(
            container_id = %self.container_id,
            items = self.store.len(),
            "Sync engine started"
        );

        while let Some(command) = rx.recv().await {
            match command {
                EngineCommand::Drop { op, reply } => {
                    let result = self.handle_drop(op).await;
                    let _ = reply.send(result);
                }
                EngineCommand::Rename {
                    item_id,
                    new_name,
                    reply,
                } => {
                    let result = self.handle_rename(item_id, &new_name).await;
                    let _ = reply.send(result);
                }
                EngineCommand::ForeignDrop {
                    position,
                    payload,
                    reply,
                } => {
                    let result = self.handle_foreign_drop(position, payload).await;
                    let _ = reply.send(result);
                }
                EngineCommand::BatchMove {
                    item_ids,
                    target_id,
                    reply,
                } => {
                    let result = self.handle_batch_move(item_ids, target_id).await;
                    let _ = reply.send(result);
                }
                EngineCommand::BatchDelete { item_ids, reply } => {
                    let result = self.handle_batch_delete(item_ids).await;
                    let _ = reply.send(result);
                }
                EngineCommand::StageFolder {
                    name,
                    parent_id,
                    reply,
                } => {
                    let result = self.handle_stage_folder(&name, parent_id).await;
                    let _ = reply.send(result);
                }
                EngineCommand::CommitUpload {
                    staged_id,
                    server_item,
                    reply,
                } => {
                    let result = self.handle_commit_upload(staged_id, *server_item).await;
                    let _ = reply.send(result);
                }
                EngineCommand::AbandonUpload { staged_id, reply } => {
                    let result = self.handle_abandon_upload(staged_id).await;
                    let _ = reply.send(result);
                }
                EngineCommand::ApplyRefresh { items } => self.apply_refresh(items),
                EngineCommand::View { reply } => {
                    let _ = reply.send(self.store.build_view());
                }
                EngineCommand::Get { item_id, reply } => {
                    let _ = reply.send(self.store.get(item_id).cloned());
                }
                EngineCommand::Shutdown => break,
            }
        }

        info!(container_id = %self.container_id, "Sync engine stopped");
    }

    /// Merge a background-refresh payload into the store.
    ///
    /// Discarded when a mutating operation holds the gate. Persisted
    /// items are replaced by the server view; staged items are carried
    /// over, re-rooted if their parent disappeared server-side.
    fn apply_refresh(&mut self, items: Vec<TreeItem>) {
        if self.gate.is_active() {
            debug!("Refresh payload discarded: mutation in flight");
            return;
        }

        let staged = self.store.staged_items();
        self.store = TreeStore::from_items(items);

        // Staged folders may nest; retry until no more can be linked.
        let mut pending = staged;
        loop {
            let before = pending.len();
            pending.retain(|item| !self.store.add_item(item.clone()));
            if pending.is_empty() || pending.len() == before {
                break;
            }
        }
        for mut item in pending {
            warn!(item_id = %item.id, "Staged item's parent vanished server-side; re-rooting");
            item.parent_id = None;
            if self.store.add_item(item.clone()) && self.staging.is_staged(item.id) {
                let _ = self.staging.move_staged_item(item.id, None);
            }
        }

        debug!(items = self.store.len(), "Background refresh applied");
    }

    /// Publish a batch progress update to subscribed UI components.
    fn publish_progress(&self, progress: &BatchProgress) {
        self.progress_tx.send_replace(progress.clone());
    }

    async fn emit_tree(&self, event: TreeEvent) {
        self.notifier
            .notify(DomainEvent::new(EventPayload::Tree(event)))
            .await;
    }

    async fn emit_upload(&self, event: UploadEvent) {
        self.notifier
            .notify(DomainEvent::new(EventPayload::Upload(event)))
            .await;
    }

    /// Mark the container tree stale. Invalidation failures are logged,
    /// never propagated into the operation result.
    async fn invalidate_tree(&self, refetch_now: bool) {
        let key = keys::container_tree(self.container_id);
        if let Err(err) = self.cache.invalidate(&key, refetch_now).await {
            warn!(key = %key, error = %err, "Cache invalidation failed");
        }
    }

    /// Mark one folder's children listing stale.
    async fn invalidate_children(&self, parent_id: ItemId, refetch_now: bool) {
        let key = keys::folder_children(self.container_id, parent_id);
        if let Err(err) = self.cache.invalidate(&key, refetch_now).await {
            warn!(key = %key, error = %err, "Cache invalidation failed");
        }
    }
}
