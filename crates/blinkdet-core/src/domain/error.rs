//! Error types returned by the classification pipeline.

use thiserror::Error;

use super::Rectangle;

/// Failure reported by a smoothing or gradient primitive.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The input image has zero width or height.
    #[error("{stage} received an empty {width}x{height} image")]
    EmptyImage {
        /// Name of the filter stage that rejected the input.
        stage: &'static str,
        /// Input width in pixels.
        width: u32,
        /// Input height in pixels.
        height: u32,
    },
}

/// Errors that abort classification of a single eye.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlinkError {
    /// The eye rectangle does not overlap the source image.
    #[error("eye region {rect} lies outside the {width}x{height} image")]
    OutOfBounds {
        /// The requested eye rectangle.
        rect: Rectangle,
        /// Source image width.
        width: u32,
        /// Source image height.
        height: u32,
    },

    /// The localizer reported no eye; classification must be skipped.
    #[error("no eye found (row={row}, col={col})")]
    NoEyeFound {
        /// Reported row.
        row: i32,
        /// Reported column.
        col: i32,
    },

    /// A raw pixel buffer does not match the declared dimensions.
    #[error("pixel buffer size mismatch: expected {expected}, got {actual}")]
    BufferSize {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes.
        actual: usize,
    },

    /// The smoothing or gradient primitive rejected its input.
    #[error(transparent)]
    Filter(#[from] FilterError),
}
