//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod face_detector;
mod pupil_localizer;
mod result_output;

pub use face_detector::FaceDetector;
pub use pupil_localizer::PupilLocalizer;
pub use result_output::ResultOutput;
