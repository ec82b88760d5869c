//! Ray-cast measurements and the per-eye verdict.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use super::Rectangle;

/// One of the four cardinal rays cast from the eye-region center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ray {
    /// Toward increasing column.
    Right,
    /// Toward decreasing column.
    Left,
    /// Toward increasing row.
    Down,
    /// Toward decreasing row.
    Up,
}

/// Distances to the nearest edge along each ray, and the derived aperture ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapMeasurement {
    /// Right-ray distance.
    pub cx1: u32,
    /// Left-ray distance.
    pub cx2: u32,
    /// Down-ray distance.
    pub cy1: u32,
    /// Up-ray distance.
    pub cy2: u32,
    /// Vertical over horizontal span, `0.0` when either span is empty.
    pub ratio: f64,
    /// The ray whose counter was zeroed as saturated, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturated: Option<Ray>,
}

impl GapMeasurement {
    /// Horizontal span `cx1 + cx2`.
    #[must_use]
    pub const fn horizontal(&self) -> u32 {
        self.cx1 + self.cx2
    }

    /// Vertical span `cy1 + cy2`.
    #[must_use]
    pub const fn vertical(&self) -> u32 {
        self.cy1 + self.cy2
    }

    /// Returns `true` when the eye is judged closed at threshold `th`.
    ///
    /// A ratio exactly equal to the threshold counts as closed.
    #[must_use]
    pub fn is_closed(&self, th: f64) -> bool {
        self.ratio <= th
    }
}

/// Outcome of classifying one eye.
#[derive(Debug, Clone)]
pub struct BlinkVerdict {
    /// `true` when the eye is closed.
    pub is_blink: bool,
    /// Binarized eye region with the four scan lines tinted red.
    pub diagnostic: RgbImage,
    /// Ray distances behind the decision.
    pub measurement: GapMeasurement,
    /// The image rectangle that was analyzed (after clipping).
    pub region: Rectangle,
}
