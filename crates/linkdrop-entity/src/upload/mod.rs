//! Staged upload records.

pub mod model;

pub use model::StagedUpload;
