//! Face detection port.

use image::DynamicImage;

use crate::domain::FaceDetection;

/// Port for locating face candidates in an image.
pub trait FaceDetector: Send + Sync {
    /// Returns every face candidate, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the detector cannot run on this image.
    fn detect(&self, image: &DynamicImage) -> anyhow::Result<Vec<FaceDetection>>;
}
