//! Archive-to-distribution conversion.
//!
//! [`batch::BatchRunner`] walks the catalog and hands each entry's archive to
//! [`convert::ConversionPipeline`], which writes the shrunk document and the frame
//! images. Frame failures stay inside the entry; entry failures stay inside the batch.

/// Zip container access.
pub mod archive;
/// Catalog-wide driver.
pub mod batch;
/// Single-entry conversion.
pub mod convert;
/// Per-entry-type settings.
pub mod profile;
