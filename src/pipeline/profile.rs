use crate::{
    foundation::config::{FRAME_FIT_WIDTH, FRAME_JPEG_QUALITY},
    imaging::{color::ColorCode, trimmer::EncodeFormat},
    pose::catalog::EntryType,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a trim-eligible frame is reshaped and re-encoded.
pub struct TrimPolicy {
    /// Border color that makes a frame trim-eligible. Compared exactly.
    pub color: ColorCode,
    /// Fit width after trimming. The fit height is the trimmed height.
    pub fit_width: u32,
    /// Output codec for trimmed frames.
    pub format: EncodeFormat,
    /// Codec quality for trimmed frames.
    pub quality: u8,
}

impl TrimPolicy {
    /// Black letterbox, 800 px wide, JPEG at quality 80.
    pub const BLACK_LETTERBOX: Self = Self {
        color: ColorCode::BLACK,
        fit_width: FRAME_FIT_WIDTH,
        format: EncodeFormat::Jpeg,
        quality: FRAME_JPEG_QUALITY,
    };

    /// `true` if a frame whose border was detected as `color` should be trimmed.
    pub fn is_eligible(&self, color: Option<ColorCode>) -> bool {
        color == Some(self.color)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Per-format settings for the conversion pipeline.
pub struct EntryProfile {
    /// Record fields kept besides `t`.
    pub record_fields: &'static [&'static str],
    /// Extension of frame images inside the archive and in the output tree.
    pub frame_ext: &'static str,
    /// Trim settings; `None` passes every frame through unchanged.
    pub trim: Option<TrimPolicy>,
}

impl EntryProfile {
    /// Profile for a catalog entry type.
    pub fn for_type(kind: EntryType) -> Self {
        match kind {
            EntryType::Legacy => Self {
                record_fields: &["d", "vectors"],
                frame_ext: "jpg",
                trim: Some(TrimPolicy::BLACK_LETTERBOX),
            },
            EntryType::Compact => Self {
                record_fields: &["d", "v"],
                frame_ext: "jpg",
                trim: Some(TrimPolicy::BLACK_LETTERBOX),
            },
            EntryType::Extended => Self {
                record_fields: &["d", "v", "h", "e"],
                frame_ext: "webp",
                trim: None,
            },
        }
    }

    /// Archive member names for timestamp `t`: primary, then fallback.
    pub fn frame_candidates(&self, t: i64) -> [String; 2] {
        [
            format!("frame-{t}.{}", self.frame_ext),
            format!("snapshot-{t}.{}", self.frame_ext),
        ]
    }

    /// Output file name for timestamp `t`.
    pub fn output_frame_name(&self, t: i64) -> String {
        format!("frame-{t}.{}", self.frame_ext)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/profile.rs"]
mod tests;
