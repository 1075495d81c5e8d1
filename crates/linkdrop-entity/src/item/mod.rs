//! Tree item entity.

pub mod model;

pub use model::{ItemKind, TreeItem};
