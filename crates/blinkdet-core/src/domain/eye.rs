//! Pupil and face estimates supplied by upstream detectors.

use serde::{Deserialize, Serialize};

/// Vertical offset of the eye seed below the face center, as a fraction of face scale.
const EYE_ROW_OFFSET: f32 = 0.085;
/// Horizontal offset of each eye seed from the face center, as a fraction of face scale.
const EYE_COL_OFFSET: f32 = 0.185;
/// Eye seed scale as a fraction of face scale.
const EYE_SCALE_RATIO: f32 = 0.4;

/// Approximate pupil location produced by a pupil localizer.
///
/// A localizer signals "no eye found" by returning an estimate with
/// `row <= 0` or `col <= 0`; see [`EyeEstimate::is_found`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeEstimate {
    /// Pupil center row in image coordinates.
    pub row: i32,
    /// Pupil center column in image coordinates.
    pub col: i32,
    /// Linear size estimate of the eye region, in pixels.
    pub scale: f32,
    /// Number of perturbations the localizer should run around this seed.
    pub perturbs: u32,
}

impl EyeEstimate {
    /// Creates an estimate with no perturbation request.
    #[must_use]
    pub const fn new(row: i32, col: i32, scale: f32) -> Self {
        Self {
            row,
            col,
            scale,
            perturbs: 0,
        }
    }

    /// Sets the perturbation count.
    #[must_use]
    pub const fn with_perturbs(mut self, perturbs: u32) -> Self {
        self.perturbs = perturbs;
        self
    }

    /// The sentinel a localizer returns when it finds nothing.
    #[must_use]
    pub const fn not_found() -> Self {
        Self::new(0, 0, 0.0)
    }

    /// Returns `false` for the localizer's "no eye found" sentinel.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.row > 0 && self.col > 0
    }
}

/// Which eye of a face, in image orientation (left = smaller column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyeSide {
    /// Eye on the image-left side of the face.
    Left,
    /// Eye on the image-right side of the face.
    Right,
}

/// A face candidate from an upstream face detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceDetection {
    /// Face center row.
    pub row: i32,
    /// Face center column.
    pub col: i32,
    /// Face size in pixels.
    pub scale: f32,
    /// Detector confidence.
    pub score: f32,
}

impl FaceDetection {
    /// Derives the pupil-search seed for one eye of this face.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn eye_seed(&self, side: EyeSide, perturbs: u32) -> EyeEstimate {
        let row = self.row - (EYE_ROW_OFFSET * self.scale) as i32;
        let col_offset = (EYE_COL_OFFSET * self.scale) as i32;
        let col = match side {
            EyeSide::Left => self.col - col_offset,
            EyeSide::Right => self.col + col_offset,
        };
        EyeEstimate::new(row, col, self.scale * EYE_SCALE_RATIO).with_perturbs(perturbs)
    }
}
