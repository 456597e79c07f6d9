use std::{
    collections::HashSet,
    io::{Read, Seek},
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context as _;

use crate::{
    foundation::{
        config::{DIST_DOCUMENT_NAME, POSE_PAYLOAD_NAME},
        error::{ErrorScope, PoseDistError, PoseDistResult},
    },
    imaging::trimmer::{ImageTrimmer, TrimReport},
    pipeline::{
        archive::PoseArchive,
        profile::{EntryProfile, TrimPolicy},
    },
    pose::{catalog::CatalogEntry, document::PoseDocument},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Frame counters for one converted entry.
pub struct ConversionResult {
    /// Records for which a frame was attempted (one per record).
    pub frames_attempted: usize,
    /// Frames found in the archive under either naming convention.
    pub frames_located: usize,
    /// Frames written to the output tree.
    pub frames_saved: usize,
    /// Saved frames that were trimmed and re-encoded.
    pub frames_trimmed: usize,
    /// Records with no frame image in the archive.
    pub frames_missing: usize,
    /// Located frames that failed to process or write.
    pub frames_failed: usize,
    /// Records whose `t` repeats an earlier record; the first one owns the frame file.
    pub frames_duplicate: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Bytes to persist for one frame.
pub struct PreparedFrame {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// Trim boundaries when the frame was trimmed, `None` for pass-through.
    pub trim: Option<TrimReport>,
}

/// Trim, fit and re-encode one frame if its border matches `policy`; otherwise
/// return the original bytes.
pub fn prepare_frame(bytes: Vec<u8>, policy: Option<&TrimPolicy>) -> PoseDistResult<PreparedFrame> {
    let Some(policy) = policy else {
        return Ok(PreparedFrame { bytes, trim: None });
    };

    let mut trimmer = ImageTrimmer::from_bytes(&bytes)?;
    if !policy.is_eligible(trimmer.detect_margin_color()) {
        return Ok(PreparedFrame { bytes, trim: None });
    }

    let report = trimmer.trim_margin(policy.color)?;
    trimmer.resize_to_fit(Some(policy.fit_width), None)?;
    let encoded = trimmer.encode(policy.format, Some(policy.quality))?;
    Ok(PreparedFrame {
        bytes: encoded,
        trim: Some(report),
    })
}

/// Look up the frame for timestamp `t` under the primary, then the fallback name.
pub fn locate_frame<R: Read + Seek>(
    archive: &mut PoseArchive<R>,
    profile: &EntryProfile,
    t: i64,
) -> PoseDistResult<(String, Vec<u8>)> {
    archive
        .read_first(&profile.frame_candidates(t))?
        .ok_or(PoseDistError::MissingFrameAsset(t))
}

/// Converts one archive into one output directory.
#[derive(Clone, Debug)]
pub struct ConversionPipeline {
    out_root: PathBuf,
}

impl ConversionPipeline {
    /// Pipeline writing entry directories under `out_root`.
    pub fn new(out_root: impl Into<PathBuf>) -> Self {
        Self {
            out_root: out_root.into(),
        }
    }

    /// Output directory for entry `name`.
    pub fn entry_dir(&self, name: &str) -> PathBuf {
        self.out_root.join(name)
    }

    /// Convert one entry.
    ///
    /// Document-level failures (missing or malformed payload, an existing output
    /// directory) abort the entry before anything is written. After the shrunk
    /// document is written, frame-scoped failures are counted and skipped while
    /// entry-scoped ones abort the entry.
    #[tracing::instrument(skip(self, entry, archive), fields(title = %entry.title))]
    pub fn convert<R: Read + Seek>(
        &self,
        name: &str,
        entry: &CatalogEntry,
        archive: &mut PoseArchive<R>,
    ) -> PoseDistResult<ConversionResult> {
        let payload = archive
            .read_string(POSE_PAYLOAD_NAME)?
            .ok_or_else(|| PoseDistError::MissingPayload(POSE_PAYLOAD_NAME.to_owned()))?;
        let document = PoseDocument::from_json_str(&payload)?;
        let profile = EntryProfile::for_type(entry.kind);

        tracing::info!(records = document.poses.len(), "generating shrunk json");
        let json = document.shrink(profile.record_fields).to_json_pretty()?;
        let out_dir = self.claim_entry_dir(name)?;
        let doc_path = out_dir.join(DIST_DOCUMENT_NAME);
        std::fs::write(&doc_path, json)
            .with_context(|| format!("write document '{}'", doc_path.display()))?;

        tracing::info!("saving frame images");
        let started = Instant::now();
        let mut result = ConversionResult::default();
        let mut seen = HashSet::with_capacity(document.poses.len());
        for record in &document.poses {
            result.frames_attempted += 1;
            let out_name = profile.output_frame_name(record.t);
            if !seen.insert(record.t) {
                result.frames_duplicate += 1;
                tracing::warn!(
                    t = record.t,
                    frame = %out_name,
                    "duplicate timestamp, frame kept from first record"
                );
                continue;
            }

            let (member, bytes) = match locate_frame(archive, &profile, record.t) {
                Ok(hit) => hit,
                Err(e) if e.scope() == ErrorScope::Entry => return Err(e),
                Err(e) => {
                    tracing::warn!(t = record.t, frame = %out_name, error = %e, "frame skipped");
                    match e {
                        PoseDistError::MissingFrameAsset(_) => result.frames_missing += 1,
                        _ => result.frames_failed += 1,
                    }
                    continue;
                }
            };
            result.frames_located += 1;
            tracing::debug!(t = record.t, member = %member, "frame located");

            match Self::save_frame(&out_dir, &out_name, bytes, profile.trim.as_ref()) {
                Ok(trim) => {
                    result.frames_saved += 1;
                    if let Some(report) = trim {
                        result.frames_trimmed += 1;
                        tracing::debug!(
                            t = record.t,
                            margin_top = report.margin_top,
                            margin_bottom = report.margin_bottom,
                            "frame trimmed"
                        );
                    }
                }
                Err(e) if e.scope() == ErrorScope::Entry => return Err(e),
                Err(e) => {
                    result.frames_failed += 1;
                    tracing::warn!(t = record.t, frame = %out_name, error = %e, "frame failed");
                }
            }
        }

        tracing::info!(
            saved = result.frames_saved,
            attempted = result.frames_attempted,
            "saved {} frame images ({}sec.)",
            result.frames_saved,
            started.elapsed().as_secs()
        );
        Ok(result)
    }

    fn claim_entry_dir(&self, name: &str) -> PoseDistResult<PathBuf> {
        std::fs::create_dir_all(&self.out_root).with_context(|| {
            format!("create output root '{}'", self.out_root.display())
        })?;

        // `create_dir` fails on an existing directory, so the existence check and the
        // creation happen as one step.
        let dir = self.entry_dir(name);
        match std::fs::create_dir(&dir) {
            Ok(()) => Ok(dir),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(PoseDistError::OutputExists(dir))
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("create entry dir '{}'", dir.display()))
                .into()),
        }
    }

    fn save_frame(
        out_dir: &Path,
        out_name: &str,
        bytes: Vec<u8>,
        policy: Option<&TrimPolicy>,
    ) -> PoseDistResult<Option<TrimReport>> {
        let frame = prepare_frame(bytes, policy)?;
        let path = out_dir.join(out_name);
        std::fs::write(&path, &frame.bytes)
            .with_context(|| format!("write frame '{}'", path.display()))?;
        Ok(frame.trim)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/convert.rs"]
mod tests;
