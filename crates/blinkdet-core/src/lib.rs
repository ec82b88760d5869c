//! Blink detection core.
//!
//! Classifies an eye as open or closed from a single still image, given a
//! pupil estimate. The pipeline crops a box around the pupil, converts it to
//! luma, smooths it, takes the gradient magnitude, binarizes the result and
//! casts four rays from the center to measure the eyelid gap.
//!
//! ```no_run
//! use blinkdet_core::{classify_blink, EyeEstimate};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let image = image::open("portrait.jpg")?;
//! let verdict = classify_blink(&EyeEstimate::new(212, 340, 24.0), &image, 0.44)?;
//! println!("blink: {}", verdict.is_blink);
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod modules;
pub mod ports;
pub mod stages;

pub use domain::{
    AnalysisResult, BlinkError, BlinkVerdict, EyeEstimate, EyeReport, EyeSide, EyeStatus,
    FaceDetection, FaceResult, FilterError, GapMeasurement, ImageDimensions, ImageInfo, Ray,
    Rectangle,
};
pub use modules::{classify_blink, BlinkClassifier, BlinkConfig, EyesConfig, EyesModule};
pub use ports::{FaceDetector, PupilLocalizer, ResultOutput};
