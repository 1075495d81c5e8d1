//! Rebuilt render tree structures.

pub mod view;

pub use view::{TreeNode, TreeView};
