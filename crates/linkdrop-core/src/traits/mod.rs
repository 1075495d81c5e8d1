//! Trait definitions for the engine's external collaborators.

pub mod cache;
pub mod notify;
pub mod persistence;

pub use cache::QueryCache;
pub use notify::NotificationSink;
pub use persistence::PersistenceActions;
