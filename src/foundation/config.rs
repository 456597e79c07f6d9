use std::path::PathBuf;

use crate::foundation::error::{PoseDistError, PoseDistResult};

/// Member name of the pose document inside each capture archive.
pub const POSE_PAYLOAD_NAME: &str = "poses.json";

/// File name of the shrunk document inside each output directory.
pub const DIST_DOCUMENT_NAME: &str = "poses.json";

/// Width bound applied to trimmed frames. The height bound is the frame's own height.
pub const FRAME_FIT_WIDTH: u32 = 800;

/// JPEG quality used when re-encoding trimmed frames.
pub const FRAME_JPEG_QUALITY: u8 = 80;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Path roots for one batch run.
pub struct DistConfig {
    /// Catalog JSON mapping entry names to `{title, type}`.
    pub catalog_path: PathBuf,
    /// Directory holding `<entry>.zip` / `<entry>-poses.zip` archives.
    pub poses_dir: PathBuf,
    /// Output root; one subdirectory is created per converted entry.
    pub out_dir: PathBuf,
}

impl Default for DistConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("poses").join("poses.json"),
            poses_dir: PathBuf::from("poses"),
            out_dir: PathBuf::from("dist"),
        }
    }
}

impl DistConfig {
    /// Reject configurations with empty path roots.
    pub fn validate(&self) -> PoseDistResult<()> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(PoseDistError::validation("catalog path must not be empty"));
        }
        if self.poses_dir.as_os_str().is_empty() {
            return Err(PoseDistError::validation("poses directory must not be empty"));
        }
        if self.out_dir.as_os_str().is_empty() {
            return Err(PoseDistError::validation("output directory must not be empty"));
        }
        Ok(())
    }

    /// Output directory for one entry.
    pub fn entry_out_dir(&self, name: &str) -> PathBuf {
        self.out_dir.join(name)
    }

    /// Candidate archive paths for one entry, in lookup order.
    pub fn archive_candidates(&self, name: &str) -> [PathBuf; 2] {
        [
            self.poses_dir.join(format!("{name}.zip")),
            self.poses_dir.join(format!("{name}-poses.zip")),
        ]
    }

    /// Locate the archive for one entry.
    pub fn locate_archive(&self, name: &str) -> PoseDistResult<PathBuf> {
        self.archive_candidates(name)
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| PoseDistError::MissingArchive(name.to_owned()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
