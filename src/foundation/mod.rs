//! Cross-cutting types: error taxonomy and run configuration.

/// Path roots and fixed conversion constants.
pub mod config;
/// Error taxonomy and result alias.
pub mod error;
