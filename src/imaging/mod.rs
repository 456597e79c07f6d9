//! Pixel-level border detection and the frame trimmer built on it.

/// Pixel color sampling and `#rrggbb` codes.
pub mod color;
/// Uniform-band boundary scans.
pub mod margin;
/// Trim, fit-resize and re-encode of one decoded frame.
pub mod trimmer;
