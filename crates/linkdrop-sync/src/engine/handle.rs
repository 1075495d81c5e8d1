//! The cloneable public API of the engine task.

use tokio::sync::{mpsc, oneshot, watch};
use tracing::debug;

use linkdrop_core::error::AppError;
use linkdrop_core::result::AppResult;
use linkdrop_core::types::{ContainerId, ItemId};
use linkdrop_entity::batch::BatchProgress;
use linkdrop_entity::drag::{DragOperation, DropPosition, ForeignPayload};
use linkdrop_entity::item::TreeItem;
use linkdrop_entity::tree::TreeView;

use crate::store::RefreshGate;

use super::command::EngineCommand;
use super::{BatchOutcome, DropOutcome};

/// Handle to a running [`SyncEngine`] task.
///
/// Every method sends a command and awaits the engine's reply; commands
/// queue FIFO behind whatever operation is currently executing. Dropping
/// a handle does not stop the engine; dropping all of them does.
///
/// [`SyncEngine`]: super::SyncEngine
#[derive(Debug, Clone)]
pub struct SyncHandle {
    container_id: ContainerId,
    tx: mpsc::Sender<EngineCommand>,
    gate: RefreshGate,
    progress: watch::Receiver<BatchProgress>,
}

impl SyncHandle {
    pub(crate) fn new(
        container_id: ContainerId,
        tx: mpsc::Sender<EngineCommand>,
        gate: RefreshGate,
        progress: watch::Receiver<BatchProgress>,
    ) -> Self {
        Self {
            container_id,
            tx,
            gate,
            progress,
        }
    }

    /// The container this engine session covers.
    pub fn container_id(&self) -> ContainerId {
        self.container_id
    }

    /// The drag-operation-active flag, shared with the engine.
    pub fn gate(&self) -> &RefreshGate {
        &self.gate
    }

    /// Subscribe to batch progress updates.
    pub fn progress(&self) -> watch::Receiver<BatchProgress> {
        self.progress.clone()
    }

    /// Submit a completed drag gesture.
    pub async fn drop_items(&self, op: DragOperation) -> AppResult<DropOutcome> {
        let (reply, rx) = oneshot::channel();
        self.request(EngineCommand::Drop { op, reply }, rx).await
    }

    /// Rename a single item. The name must already be trimmed and
    /// non-empty; the engine revalidates.
    pub async fn rename_item(
        &self,
        item_id: ItemId,
        new_name: impl Into<String>,
    ) -> AppResult<()> {
        let (reply, rx) = oneshot::channel();
        self.request(
            EngineCommand::Rename {
                item_id,
                new_name: new_name.into(),
                reply,
            },
            rx,
        )
        .await
    }

    /// Submit a drag payload originating outside the tree. Returns the
    /// IDs of any items staged for upload.
    pub async fn foreign_drop(
        &self,
        position: DropPosition,
        payload: ForeignPayload,
    ) -> AppResult<Vec<ItemId>> {
        let (reply, rx) = oneshot::channel();
        self.request(
            EngineCommand::ForeignDrop {
                position,
                payload,
                reply,
            },
            rx,
        )
        .await
    }

    /// Move many items under one target folder.
    pub async fn batch_move(
        &self,
        item_ids: Vec<ItemId>,
        target_id: ItemId,
    ) -> AppResult<BatchOutcome> {
        let (reply, rx) = oneshot::channel();
        self.request(
            EngineCommand::BatchMove {
                item_ids,
                target_id,
                reply,
            },
            rx,
        )
        .await
    }

    /// Delete many items; descendants cascade locally.
    pub async fn batch_delete(&self, item_ids: Vec<ItemId>) -> AppResult<BatchOutcome> {
        let (reply, rx) = oneshot::channel();
        self.request(EngineCommand::BatchDelete { item_ids, reply }, rx)
            .await
    }

    /// Create a staged folder for upload-time organisation.
    pub async fn stage_folder(
        &self,
        name: impl Into<String>,
        parent_id: Option<ItemId>,
    ) -> AppResult<TreeItem> {
        let (reply, rx) = oneshot::channel();
        self.request(
            EngineCommand::StageFolder {
                name: name.into(),
                parent_id,
                reply,
            },
            rx,
        )
        .await
    }

    /// Replace a staged item with its server-assigned identity after a
    /// successful upload.
    pub async fn commit_upload(&self, staged_id: ItemId, server_item: TreeItem) -> AppResult<()> {
        let (reply, rx) = oneshot::channel();
        self.request(
            EngineCommand::CommitUpload {
                staged_id,
                server_item: Box::new(server_item),
                reply,
            },
            rx,
        )
        .await
    }

    /// Drop a staged item (and staged descendants) before upload.
    pub async fn abandon_upload(&self, staged_id: ItemId) -> AppResult<()> {
        let (reply, rx) = oneshot::channel();
        self.request(EngineCommand::AbandonUpload { staged_id, reply }, rx)
            .await
    }

    /// Hand the engine a freshly loaded server tree. Fire-and-forget.
    ///
    /// A payload that arrives while a mutating operation holds the gate
    /// is stale by definition and is discarded here rather than queued
    /// behind the mutation, where it would overwrite the fresher
    /// optimistic state.
    pub async fn apply_refresh(&self, items: Vec<TreeItem>) -> AppResult<()> {
        if self.gate.is_active() {
            debug!("Refresh payload discarded: mutation in flight");
            return Ok(());
        }
        self.tx
            .send(EngineCommand::ApplyRefresh { items })
            .await
            .map_err(|_| AppError::internal("Sync engine is not running"))
    }

    /// Rebuild and return the current render tree.
    pub async fn view(&self) -> AppResult<TreeView> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(EngineCommand::View { reply })
            .await
            .map_err(|_| AppError::internal("Sync engine is not running"))?;
        rx.await
            .map_err(|_| AppError::internal("Sync engine dropped the reply"))
    }

    /// Read a single item from the store.
    pub async fn get(&self, item_id: ItemId) -> AppResult<Option<TreeItem>> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(EngineCommand::Get { item_id, reply })
            .await
            .map_err(|_| AppError::internal("Sync engine is not running"))?;
        rx.await
            .map_err(|_| AppError::internal("Sync engine dropped the reply"))
    }

    /// Ask the engine task to stop once queued commands are drained.
    pub async fn shutdown(&self) {
        let _ = self.tx.send(EngineCommand::Shutdown).await;
    }

    async fn request<T>(
        &self,
        command: EngineCommand,
        rx: oneshot::Receiver<AppResult<T>>,
    ) -> AppResult<T> {
        self.tx
            .send(command)
            .await
            .map_err(|_| AppError::internal("Sync engine is not running"))?;
        rx.await
            .map_err(|_| AppError::internal("Sync engine dropped the reply"))?
    }
}
