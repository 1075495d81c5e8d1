//! Drag gesture value objects.

pub mod foreign;
pub mod intent;

pub use foreign::{DropPosition, ForeignPayload, IncomingFile};
pub use intent::{DragOperation, DropIntent};
