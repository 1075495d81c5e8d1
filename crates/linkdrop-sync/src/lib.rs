//! # linkdrop-sync
//!
//! The client-side tree synchronization engine. A single-writer actor
//! owns the in-memory tree store and processes drop/move, rename,
//! foreign-drop, and batch operations strictly in arrival order,
//! applying each optimistically and rolling back on persistence failure.

pub mod engine;
pub mod keys;
pub mod refresh;
pub mod staging;
pub mod store;

pub use engine::{BatchOutcome, DropOutcome, SyncEngine, SyncHandle};
pub use refresh::{RefreshScheduler, TreeLoader};
pub use staging::StagingStore;
pub use store::{RefreshGate, TreeSnapshot, TreeStore};
