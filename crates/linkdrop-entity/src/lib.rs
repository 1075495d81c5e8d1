//! # linkdrop-entity
//!
//! Domain entity models for Linkdrop's tree synchronization engine.
//! Every struct in this crate is a plain value object; all entities
//! derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod batch;
pub mod drag;
pub mod item;
pub mod tree;
pub mod upload;
