//! pose-dist turns archived pose capture sets into a trimmed distribution format.
//!
//! Each capture set is a zip archive holding a `poses.json` document of time-indexed
//! pose vectors plus one snapshot image per record. Conversion produces, per entry:
//!
//! - a shrunk `poses.json` with only the distributable record fields, and
//! - one `frame-<t>.<ext>` image per record whose snapshot could be found, with
//!   uniform black letterbox bands cropped off and the result fit to a fixed width.
//!
//! # Pipeline overview
//!
//! 1. **Catalog**: [`Catalog`] lists entries in file order.
//! 2. **Batch**: [`BatchRunner`] skips entries whose output exists and isolates failures.
//! 3. **Convert**: [`ConversionPipeline`] shrinks the document and prepares each frame.
//! 4. **Trim**: [`ImageTrimmer`] detects the border color, crops, fits and re-encodes.
//!
//! Everything runs sequentially on the calling thread.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod imaging;
mod pipeline;
mod pose;

pub use foundation::config::{
    DIST_DOCUMENT_NAME, DistConfig, FRAME_FIT_WIDTH, FRAME_JPEG_QUALITY, POSE_PAYLOAD_NAME,
};
pub use foundation::error::{ErrorScope, PoseDistError, PoseDistResult};
pub use imaging::color::{ColorCode, sample_color};
pub use imaging::margin::{ScanDirection, find_edge};
pub use imaging::trimmer::{EncodeFormat, ImageTrimmer, TrimReport, fit_dimensions};
pub use pipeline::archive::PoseArchive;
pub use pipeline::batch::{BatchReport, BatchRunner, EntryOutcome};
pub use pipeline::convert::{
    ConversionPipeline, ConversionResult, PreparedFrame, locate_frame, prepare_frame,
};
pub use pipeline::profile::{EntryProfile, TrimPolicy};
pub use pose::catalog::{Catalog, CatalogEntry, EntryType};
pub use pose::document::{DROPPED_DOCUMENT_KEYS, DistributionDocument, PoseDocument, PoseRecord};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;
