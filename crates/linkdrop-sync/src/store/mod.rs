//! In-memory tree state owned by the engine task.

pub mod gate;
pub mod snapshot;
pub mod tree;

pub use gate::{GateGuard, RefreshGate};
pub use snapshot::TreeSnapshot;
pub use tree::TreeStore;
