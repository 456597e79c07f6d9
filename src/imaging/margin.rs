use std::ops::Range;

use image::RgbaImage;

use crate::imaging::color::{ColorCode, sample_color};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Edge a margin scan starts from.
pub enum ScanDirection {
    /// Rows `0, 1, ..` downwards from the top edge.
    Top,
    /// Rows `height - 1, height - 2, ..` upwards from the bottom edge.
    Bottom,
}

/// Find where a uniform `color` band ends, scanning rows from one edge.
///
/// A row is part of the band only if every pixel in `columns` (default: the full
/// width) matches `color`. The scan stops at the first row that does not match.
///
/// - [`ScanDirection::Top`] returns the index of the last matching row, or `0` when
///   row `0` already fails.
/// - [`ScanDirection::Bottom`] returns the index of the last matching row counted
///   from the bottom, or `height` when the bottom row already fails.
///
/// `columns` is clamped to the image width. An empty column range selects no pixels
/// and yields the no-margin default.
pub fn find_edge(
    image: &RgbaImage,
    color: ColorCode,
    direction: ScanDirection,
    columns: Option<Range<u32>>,
) -> u32 {
    let (width, height) = image.dimensions();
    let columns = columns.unwrap_or(0..width);
    let columns = columns.start.min(width)..columns.end.min(width);

    let no_margin = match direction {
        ScanDirection::Top => 0,
        ScanDirection::Bottom => height,
    };
    if columns.is_empty() {
        return no_margin;
    }

    let row_matches = |y: u32| columns.clone().all(|x| sample_color(image, x, y) == color);

    let mut edge = no_margin;
    match direction {
        ScanDirection::Top => {
            for y in (0..height).take_while(|&y| row_matches(y)) {
                edge = y;
            }
        }
        ScanDirection::Bottom => {
            for y in (0..height).rev().take_while(|&y| row_matches(y)) {
                edge = y;
            }
        }
    }
    edge
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/margin.rs"]
mod tests;
