//! Analysis result types.

use serde::{Deserialize, Serialize};

use super::{BlinkError, BlinkVerdict, EyeEstimate, EyeSide, FaceDetection, GapMeasurement};

/// Basic image information extracted during loading.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Path to the image file.
    pub path: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Decoded image data.
    pub image: image::DynamicImage,
}

impl ImageInfo {
    /// Wraps a decoded image, reading its dimensions.
    #[must_use]
    pub fn new(path: impl Into<String>, image: image::DynamicImage) -> Self {
        Self {
            path: path.into(),
            width: image.width(),
            height: image.height(),
            image,
        }
    }
}

/// Image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageDimensions {
    /// Creates a dimensions record.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// What happened to one eye.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EyeStatus {
    /// The localizer found no pupil; classification was skipped.
    NotFound,
    /// Eye classified open.
    Open {
        /// Ray distances behind the decision.
        measurement: GapMeasurement,
    },
    /// Eye classified closed.
    Closed {
        /// Ray distances behind the decision.
        measurement: GapMeasurement,
    },
    /// Classification failed.
    Failed {
        /// Error description.
        reason: String,
    },
}

impl EyeStatus {
    /// Returns `true` for a closed eye.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }
}

impl From<&BlinkVerdict> for EyeStatus {
    fn from(verdict: &BlinkVerdict) -> Self {
        let measurement = verdict.measurement;
        if verdict.is_blink {
            Self::Closed { measurement }
        } else {
            Self::Open { measurement }
        }
    }
}

impl From<&BlinkError> for EyeStatus {
    fn from(err: &BlinkError) -> Self {
        Self::Failed {
            reason: err.to_string(),
        }
    }
}

/// Classification report for one pupil estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyeReport {
    /// Position of the estimate in the request (0-based).
    pub index: usize,
    /// Side of the face, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<EyeSide>,
    /// Pupil estimate that was classified.
    pub pupil: EyeEstimate,
    /// Classification outcome.
    #[serde(flatten)]
    pub status: EyeStatus,
    /// Where the diagnostic image was written, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic_path: Option<String>,
}

/// Per-face blink result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceResult {
    /// Face candidate from the detector.
    pub face: FaceDetection,
    /// Image-left eye.
    pub left: EyeReport,
    /// Image-right eye.
    pub right: EyeReport,
    /// `true` if any eye of this face is closed.
    pub blinking: bool,
}

/// Complete analysis result for a single image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Path to the analyzed image.
    pub path: String,
    /// Timestamp of analysis (ISO 8601).
    pub timestamp: String,
    /// Image dimensions.
    pub dimensions: ImageDimensions,
    /// One report per requested eye.
    pub eyes: Vec<EyeReport>,
}

impl AnalysisResult {
    /// Number of eyes classified closed.
    #[must_use]
    pub fn blink_count(&self) -> usize {
        self.eyes.iter().filter(|e| e.status.is_closed()).count()
    }
}
