//! Pose capture documents and the entry catalog.

/// Entry catalog (`name -> {title, type}`).
pub mod catalog;
/// Pose documents and the shrink transform.
pub mod document;
