//! Core domain types for blink classification.

mod error;
mod eye;
mod region;
mod result;
mod verdict;

pub use error::{BlinkError, FilterError};
pub use eye::{EyeEstimate, EyeSide, FaceDetection};
pub use region::Rectangle;
pub use result::{AnalysisResult, EyeReport, EyeStatus, FaceResult, ImageDimensions, ImageInfo};
pub use verdict::{BlinkVerdict, GapMeasurement, Ray};
