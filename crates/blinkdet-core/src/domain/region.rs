//! Eye bounding rectangle.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::EyeEstimate;

/// Axis-aligned rectangle in image coordinates (min inclusive, max exclusive).
///
/// May extend past the image it was derived for; use [`Rectangle::clip`] to
/// get the overlapping part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    /// First row.
    pub min_row: i32,
    /// First column.
    pub min_col: i32,
    /// One past the last row.
    pub max_row: i32,
    /// One past the last column.
    pub max_col: i32,
}

impl Rectangle {
    /// Creates a rectangle from its corners.
    #[must_use]
    pub const fn new(min_row: i32, min_col: i32, max_row: i32, max_col: i32) -> Self {
        Self {
            min_row,
            min_col,
            max_row,
            max_col,
        }
    }

    /// Builds the eye box `center ± floor(factor * scale)` on both axes.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn around(eye: &EyeEstimate, factor: f32) -> Self {
        // NaN and negative scales collapse to an empty box.
        let half = (eye.scale * factor).floor().max(0.0) as i32;
        Self::new(
            eye.row.saturating_sub(half),
            eye.col.saturating_sub(half),
            eye.row.saturating_add(half),
            eye.col.saturating_add(half),
        )
    }

    /// Number of columns covered.
    #[must_use]
    pub const fn width(&self) -> i32 {
        if self.max_col > self.min_col {
            self.max_col - self.min_col
        } else {
            0
        }
    }

    /// Number of rows covered.
    #[must_use]
    pub const fn height(&self) -> i32 {
        if self.max_row > self.min_row {
            self.max_row - self.min_row
        } else {
            0
        }
    }

    /// Returns `true` if the rectangle covers no pixel.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Intersects with a `width` x `height` image, `None` if nothing overlaps.
    #[allow(clippy::cast_possible_wrap)]
    #[must_use]
    pub fn clip(&self, width: u32, height: u32) -> Option<Self> {
        let clipped = Self::new(
            self.min_row.max(0),
            self.min_col.max(0),
            self.max_row.min(height.min(i32::MAX as u32) as i32),
            self.max_col.min(width.min(i32::MAX as u32) as i32),
        );
        (!clipped.is_empty()).then_some(clipped)
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[rows {}..{}, cols {}..{}]",
            self.min_row, self.max_row, self.min_col, self.max_col
        )
    }
}
