use std::{io::Cursor, path::Path};

use anyhow::Context as _;
use image::{
    DynamicImage, ImageEncoder as _, RgbaImage,
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
    imageops::{self, FilterType},
};

use crate::{
    foundation::error::{PoseDistError, PoseDistResult},
    imaging::{
        color::{ColorCode, sample_color},
        margin::{ScanDirection, find_edge},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Output container for [`ImageTrimmer::encode`].
pub enum EncodeFormat {
    /// Baseline JPEG; alpha is discarded.
    Jpeg,
    /// Lossless RGBA PNG.
    Png,
}

impl EncodeFormat {
    /// Infer the format from a file extension (`jpg`, `jpeg`, `png`; case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Boundaries computed by [`ImageTrimmer::trim_margin`].
pub struct TrimReport {
    /// First kept row in the pre-crop image.
    pub margin_top: u32,
    /// One past the last kept row in the pre-crop image.
    pub margin_bottom: u32,
    /// Image height before cropping.
    pub height: u32,
}

impl TrimReport {
    /// `true` when the crop kept every row.
    pub fn is_noop(&self) -> bool {
        self.margin_top == 0 && self.margin_bottom == self.height
    }
}

/// Owns one decoded frame and applies margin trim, fit-resize and re-encode to it.
///
/// An instance loads at most one image. Load a new instance for the next frame.
#[derive(Debug, Default)]
pub struct ImageTrimmer {
    image: Option<RgbaImage>,
}

impl ImageTrimmer {
    /// Create an unloaded trimmer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode encoded image bytes into a loaded trimmer.
    pub fn from_bytes(bytes: &[u8]) -> PoseDistResult<Self> {
        let mut trimmer = Self::new();
        trimmer.load_bytes(bytes)?;
        Ok(trimmer)
    }

    /// Read and decode an image file into a loaded trimmer.
    pub fn from_path(path: &Path) -> PoseDistResult<Self> {
        let mut trimmer = Self::new();
        trimmer.load_path(path)?;
        Ok(trimmer)
    }

    /// Decode encoded image bytes. Fails if an image is already loaded.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> PoseDistResult<()> {
        if self.image.is_some() {
            return Err(PoseDistError::precondition("image is already loaded"));
        }
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| PoseDistError::decode(format!("decode image from memory: {e}")))?;
        self.image = Some(decoded.to_rgba8());
        Ok(())
    }

    /// Read and decode an image file. Fails if an image is already loaded.
    pub fn load_path(&mut self, path: &Path) -> PoseDistResult<()> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read image '{}'", path.display()))?;
        self.load_bytes(&bytes)
    }

    /// Current width, if loaded.
    pub fn width(&self) -> Option<u32> {
        self.image.as_ref().map(|img| img.width())
    }

    /// Current height, if loaded.
    pub fn height(&self) -> Option<u32> {
        self.image.as_ref().map(|img| img.height())
    }

    /// Borrow the current raster, if loaded.
    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    /// Presumed border color: the top-left pixel.
    ///
    /// Returns `None` while unloaded or for an empty raster.
    pub fn detect_margin_color(&self) -> Option<ColorCode> {
        let img = self.image.as_ref()?;
        if img.width() == 0 || img.height() == 0 {
            return None;
        }
        Some(sample_color(img, 0, 0))
    }

    /// Crop uniform `color` bands off the top and bottom edges, keeping full width.
    ///
    /// The kept row range is `[margin_top, margin_bottom)` where both bounds come from
    /// [`find_edge`]. When the two scans meet or cross, the whole image is the margin
    /// color and nothing is cropped.
    pub fn trim_margin(&mut self, color: ColorCode) -> PoseDistResult<TrimReport> {
        let img = self.loaded_mut("trim_margin")?;
        let (width, height) = img.dimensions();

        let top = find_edge(img, color, ScanDirection::Top, None);
        let bottom = find_edge(img, color, ScanDirection::Bottom, None);

        let (margin_top, margin_bottom) = if bottom <= top {
            (0, height)
        } else {
            (top, bottom)
        };

        if margin_top != 0 || margin_bottom != height {
            let cropped =
                imageops::crop_imm(&*img, 0, margin_top, width, margin_bottom - margin_top)
                    .to_image();
            *img = cropped;
        }

        Ok(TrimReport {
            margin_top,
            margin_bottom,
            height,
        })
    }

    /// Scale to fit inside `max_width` x `max_height`, preserving aspect ratio.
    ///
    /// A missing bound defaults to the current size on that axis. The binding axis
    /// lands exactly on its bound; the other axis is `round_half_up(len * scale)`,
    /// computed in integers and clamped to at least 1. The image may grow when both
    /// bounds exceed the current size.
    pub fn resize_to_fit(
        &mut self,
        max_width: Option<u32>,
        max_height: Option<u32>,
    ) -> PoseDistResult<(u32, u32)> {
        let img = self.loaded_mut("resize_to_fit")?;
        let (width, height) = img.dimensions();
        let bound_w = max_width.unwrap_or(width);
        let bound_h = max_height.unwrap_or(height);
        if bound_w == 0 || bound_h == 0 {
            return Err(PoseDistError::validation("fit bounds must be non-zero"));
        }

        let target = fit_dimensions(width, height, bound_w, bound_h);
        resize_in_place(img, target);
        Ok(target)
    }

    /// Scale both axes by `factor` with the same rounding as [`Self::resize_to_fit`].
    pub fn resize_by_scale(&mut self, factor: f64) -> PoseDistResult<(u32, u32)> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PoseDistError::validation(format!(
                "scale factor must be positive and finite, got {factor}"
            )));
        }
        let img = self.loaded_mut("resize_by_scale")?;
        let (width, height) = img.dimensions();
        let scale = |len: u32| ((f64::from(len) * factor + 0.5).floor() as u32).max(1);
        let target = (scale(width), scale(height));
        resize_in_place(img, target);
        Ok(target)
    }

    /// Serialize the current raster. `quality` (1..=100) applies to JPEG only.
    pub fn encode(&self, format: EncodeFormat, quality: Option<u8>) -> PoseDistResult<Vec<u8>> {
        let img = self
            .image
            .as_ref()
            .ok_or_else(|| PoseDistError::encode("no image is loaded"))?;

        let mut buf = Vec::new();
        match format {
            EncodeFormat::Jpeg => {
                let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
                let encoder = match quality {
                    Some(q) => JpegEncoder::new_with_quality(&mut buf, q.clamp(1, 100)),
                    None => JpegEncoder::new(&mut buf),
                };
                encoder
                    .write_image(
                        rgb.as_raw(),
                        rgb.width(),
                        rgb.height(),
                        image::ExtendedColorType::Rgb8,
                    )
                    .map_err(|e| PoseDistError::encode(format!("jpeg: {e}")))?;
            }
            EncodeFormat::Png => {
                PngEncoder::new(Cursor::new(&mut buf))
                    .write_image(
                        img.as_raw(),
                        img.width(),
                        img.height(),
                        image::ExtendedColorType::Rgba8,
                    )
                    .map_err(|e| PoseDistError::encode(format!("png: {e}")))?;
            }
        }
        Ok(buf)
    }

    /// Encode by the extension of `path` and write the result.
    pub fn save_to_path(&self, path: &Path, quality: Option<u8>) -> PoseDistResult<()> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let format = EncodeFormat::from_extension(ext).ok_or_else(|| {
            PoseDistError::encode(format!(
                "unsupported output extension for '{}'",
                path.display()
            ))
        })?;
        let bytes = self.encode(format, quality)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("write image '{}'", path.display()))?;
        Ok(())
    }

    fn loaded_mut(&mut self, op: &str) -> PoseDistResult<&mut RgbaImage> {
        self.image
            .as_mut()
            .ok_or_else(|| PoseDistError::precondition(format!("{op}: image is not loaded")))
    }
}

/// Fit `width` x `height` inside `bound_w` x `bound_h`.
///
/// Integer arithmetic keeps the result identical across runs and platforms; the
/// free axis rounds half up.
pub fn fit_dimensions(width: u32, height: u32, bound_w: u32, bound_h: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }
    // Products of two u32 values plus the doubling for rounding need more than 64 bits.
    let (w, h) = (u128::from(width), u128::from(height));
    let (bw, bh) = (u128::from(bound_w), u128::from(bound_h));

    // Compare bw / w against bh / h without dividing. The derived axis never exceeds
    // its own bound, so it fits back into u32.
    let (new_w, new_h) = if bw * h <= bh * w {
        (bw, (2 * h * bw + w) / (2 * w))
    } else {
        ((2 * w * bh + h) / (2 * h), bh)
    };
    (new_w.max(1) as u32, new_h.max(1) as u32)
}

fn resize_in_place(img: &mut RgbaImage, (width, height): (u32, u32)) {
    if img.dimensions() == (width, height) {
        return;
    }
    *img = imageops::resize(&*img, width, height, FilterType::Triangle);
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/trimmer.rs"]
mod tests;
