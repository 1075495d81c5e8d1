//! # Linkdrop
//!
//! Client-side tree synchronization engine for the Linkdrop
//! file-collection product: optimistic drag-and-drop, move, reorder, and
//! rename over an in-memory tree, coordinated with asynchronous server
//! persistence and rolled back on failure.
//!
//! This crate is the facade: it re-exports the public surface of the
//! member crates and provides the tracing initialisation helper.

pub mod logging;

pub use linkdrop_core::config::logging::LoggingConfig;
pub use linkdrop_core::config::refresh::RefreshConfig;
pub use linkdrop_core::config::staging::StagingConfig;
pub use linkdrop_core::config::sync::SyncConfig;
pub use linkdrop_core::config::AppConfig;
pub use linkdrop_core::error::ErrorKind;
pub use linkdrop_core::events::{DomainEvent, EventPayload, TreeEvent, UploadEvent};
pub use linkdrop_core::traits::persistence::{DeleteSummary, MoveSummary, RenamedItem};
pub use linkdrop_core::traits::{NotificationSink, PersistenceActions, QueryCache};
pub use linkdrop_core::types::{ContainerId, ItemId, UploadId};
pub use linkdrop_core::{AppError, AppResult};

pub use linkdrop_entity::batch::{BatchItemError, BatchProgress};
pub use linkdrop_entity::drag::{
    DragOperation, DropIntent, DropPosition, ForeignPayload, IncomingFile,
};
pub use linkdrop_entity::item::{ItemKind, TreeItem};
pub use linkdrop_entity::tree::{TreeNode, TreeView};
pub use linkdrop_entity::upload::StagedUpload;

pub use linkdrop_sync::{
    BatchOutcome, DropOutcome, RefreshGate, RefreshScheduler, StagingStore, SyncEngine,
    SyncHandle, TreeLoader, TreeSnapshot, TreeStore,
};
