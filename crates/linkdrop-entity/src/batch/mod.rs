//! Batch operation progress tracking.

pub mod progress;

pub use progress::{BatchItemError, BatchProgress};
