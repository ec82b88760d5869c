//! Test support utilities for blinkdet.
//!
//! Provides mocks for the core ports and synthetic eye images with known
//! open/closed outcomes.
//!
//! # Example
//!
//! ```
//! use blinkdet_core::classify_blink;
//! use blinkdet_test_support::SyntheticEyeBuilder;
//!
//! let eye = SyntheticEyeBuilder::closed();
//! let pupil = SyntheticEyeBuilder::centered_pupil();
//! let verdict = classify_blink(&pupil, &eye.image, 0.44).unwrap();
//! assert!(verdict.is_blink);
//! ```

mod builders;
mod mocks;

pub use builders::{SyntheticEyeBuilder, EYE_CANVAS, EYE_SCALE};
pub use mocks::{MockFaceDetector, MockPupilLocalizer, MockResultOutput};
