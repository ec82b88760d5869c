//! Pupil localization port.

use image::DynamicImage;

use crate::domain::EyeEstimate;

/// Port for refining a rough eye seed into a pupil estimate.
pub trait PupilLocalizer: Send + Sync {
    /// Refines `seed` against `image`.
    ///
    /// A result for which [`EyeEstimate::is_found`] is `false` means the
    /// eye should be skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if localization itself fails.
    fn localize(&self, seed: &EyeEstimate, image: &DynamicImage) -> anyhow::Result<EyeEstimate>;
}
