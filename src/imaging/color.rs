use std::{fmt, str::FromStr};

use image::RgbaImage;

use crate::foundation::error::PoseDistError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Opaque RGB color compared by its normalized `#rrggbb` form.
///
/// Alpha never takes part in comparisons: two pixels with the same RGB channels
/// and different alpha produce the same code.
pub struct ColorCode {
    rgb: [u8; 3],
}

impl ColorCode {
    /// Pure black, the border color of letterboxed capture frames.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Build a code from red, green and blue channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { rgb: [r, g, b] }
    }

    /// Channels as `[r, g, b]`.
    pub fn channels(self) -> [u8; 3] {
        self.rgb
    }

    /// Normalized lowercase `#rrggbb` string.
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.rgb;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for ColorCode {
    type Err = PoseDistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(PoseDistError::validation(format!(
                "color must be #rrggbb, got \"{s}\""
            )));
        }

        let byte = |pair: &str| {
            u8::from_str_radix(pair, 16).map_err(|_| {
                PoseDistError::validation(format!("invalid hex byte \"{pair}\" in \"{s}\""))
            })
        };
        Ok(Self::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?))
    }
}

/// Read the color of pixel `(x, y)`, ignoring alpha.
///
/// Coordinates must be inside the image; an out-of-range pixel panics.
pub fn sample_color(image: &RgbaImage, x: u32, y: u32) -> ColorCode {
    let [r, g, b, _a] = image.get_pixel(x, y).0;
    ColorCode::rgb(r, g, b)
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/color.rs"]
mod tests;
