//! Single-eye blink classification.
//!
//! Runs the full per-eye pipeline: region extraction, luma conversion,
//! smoothing, gradient magnitude, binarization and the eyelid-gap ray-caster.

use image::DynamicImage;
use tracing::debug;

use crate::domain::{BlinkError, BlinkVerdict, EyeEstimate};
use crate::stages::{
    binarize, extract_region, measure_gap, to_luma_image, BoxBlur, GradientOperator, Smoother,
    Sobel,
};

/// Tunables for the blink classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct BlinkConfig {
    /// Aperture ratio at or below which an eye counts as closed.
    pub ratio_threshold: f64,
    /// Half-side of the eye region as a multiple of the pupil scale.
    pub region_scale: f32,
    /// Smoothing radius in pixels.
    pub blur_radius: u32,
    /// Gradient magnitudes below this are suppressed.
    pub gradient_threshold: u16,
    /// Luma above this binarizes to white.
    pub binarize_cutoff: u8,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            ratio_threshold: 0.44,
            region_scale: 1.5,
            blur_radius: 5,
            gradient_threshold: 70,
            binarize_cutoff: 127,
        }
    }
}

impl BlinkConfig {
    /// Sets the ratio threshold.
    #[must_use]
    pub const fn with_ratio_threshold(mut self, threshold: f64) -> Self {
        self.ratio_threshold = threshold;
        self
    }

    /// Sets the region scale factor.
    #[must_use]
    pub const fn with_region_scale(mut self, scale: f32) -> Self {
        self.region_scale = scale;
        self
    }

    /// Sets the smoothing radius.
    #[must_use]
    pub const fn with_blur_radius(mut self, radius: u32) -> Self {
        self.blur_radius = radius;
        self
    }

    /// Sets the gradient threshold.
    #[must_use]
    pub const fn with_gradient_threshold(mut self, threshold: u16) -> Self {
        self.gradient_threshold = threshold;
        self
    }

    /// Sets the binarization cutoff.
    #[must_use]
    pub const fn with_binarize_cutoff(mut self, cutoff: u8) -> Self {
        self.binarize_cutoff = cutoff;
        self
    }
}

/// Blink classifier context.
///
/// Built once and shared by reference; it holds no mutable state, so one
/// instance can classify eyes from several threads at once.
pub struct BlinkClassifier {
    config: BlinkConfig,
    smoother: Box<dyn Smoother>,
    gradient: Box<dyn GradientOperator>,
}

impl Default for BlinkClassifier {
    fn default() -> Self {
        Self::new(BlinkConfig::default())
    }
}

impl std::fmt::Debug for BlinkClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlinkClassifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BlinkClassifier {
    /// Creates a classifier with the built-in box blur and Sobel operator.
    #[must_use]
    pub fn new(config: BlinkConfig) -> Self {
        Self::with_filters(config, Box::new(BoxBlur), Box::new(Sobel))
    }

    /// Creates a classifier with caller-supplied filter primitives.
    #[must_use]
    pub fn with_filters(
        config: BlinkConfig,
        smoother: Box<dyn Smoother>,
        gradient: Box<dyn GradientOperator>,
    ) -> Self {
        Self {
            config,
            smoother,
            gradient,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &BlinkConfig {
        &self.config
    }

    /// Classifies one eye at the configured threshold.
    ///
    /// # Errors
    ///
    /// See [`Self::classify_with_threshold`].
    pub fn classify(
        &self,
        pupil: &EyeEstimate,
        image: &DynamicImage,
    ) -> Result<BlinkVerdict, BlinkError> {
        self.classify_with_threshold(pupil, image, self.config.ratio_threshold)
    }

    /// Classifies one eye, overriding the ratio threshold for this call.
    ///
    /// # Errors
    ///
    /// - [`BlinkError::NoEyeFound`] if `pupil` is a "not found" estimate.
    /// - [`BlinkError::OutOfBounds`] if the eye region misses the image.
    /// - [`BlinkError::Filter`] if a filter rejects its input.
    pub fn classify_with_threshold(
        &self,
        pupil: &EyeEstimate,
        image: &DynamicImage,
        threshold: f64,
    ) -> Result<BlinkVerdict, BlinkError> {
        if !pupil.is_found() {
            return Err(BlinkError::NoEyeFound {
                row: pupil.row,
                col: pupil.col,
            });
        }

        let (region, rect) = extract_region(image, pupil, self.config.region_scale)?;
        debug!(
            "Eye at ({}, {}) scale {:.1}: region {}",
            pupil.row, pupil.col, pupil.scale, rect
        );

        let gray = to_luma_image(&region);
        let smoothed = self.smoother.smooth(&gray, self.config.blur_radius)?;
        let edges = self
            .gradient
            .magnitude(&smoothed, self.config.gradient_threshold)?;

        let mut diagnostic = binarize(&edges, self.config.binarize_cutoff);
        let measurement = measure_gap(&mut diagnostic);
        let is_blink = measurement.is_closed(threshold);

        debug!(
            "cx={} cy={} ratio={:.3} threshold={:.3} -> {}",
            measurement.horizontal(),
            measurement.vertical(),
            measurement.ratio,
            threshold,
            if is_blink { "closed" } else { "open" }
        );

        Ok(BlinkVerdict {
            is_blink,
            diagnostic,
            measurement,
            region: rect,
        })
    }
}

/// Classifies one eye with default filters at the given threshold.
///
/// # Errors
///
/// See [`BlinkClassifier::classify_with_threshold`].
pub fn classify_blink(
    pupil: &EyeEstimate,
    image: &DynamicImage,
    threshold: f64,
) -> Result<BlinkVerdict, BlinkError> {
    BlinkClassifier::default().classify_with_threshold(pupil, image, threshold)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::FilterError;
    use image::{GrayImage, Luma};

    fn uniform(size: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(size, size, Luma([value])))
    }

    #[test]
    fn test_default_config() {
        let config = BlinkConfig::default();
        assert!((config.ratio_threshold - 0.44).abs() < f64::EPSILON);
        assert!((config.region_scale - 1.5).abs() < f32::EPSILON);
        assert_eq!(config.blur_radius, 5);
        assert_eq!(config.gradient_threshold, 70);
        assert_eq!(config.binarize_cutoff, 127);
    }

    #[test]
    fn test_config_builders() {
        let config = BlinkConfig::default()
            .with_ratio_threshold(0.3)
            .with_region_scale(2.0)
            .with_blur_radius(2)
            .with_gradient_threshold(40)
            .with_binarize_cutoff(100);
        assert!((config.ratio_threshold - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.blur_radius, 2);
        assert_eq!(config.gradient_threshold, 40);
        assert_eq!(config.binarize_cutoff, 100);
    }

    #[test]
    fn test_not_found_rejected() {
        let err = classify_blink(&EyeEstimate::not_found(), &uniform(50, 128), 0.44).unwrap_err();
        assert!(matches!(err, BlinkError::NoEyeFound { .. }));
    }

    #[test]
    fn test_out_of_bounds() {
        let pupil = EyeEstimate::new(500, 500, 10.0);
        let err = classify_blink(&pupil, &uniform(50, 128), 0.44).unwrap_err();
        assert!(matches!(err, BlinkError::OutOfBounds { .. }));
    }

    #[test]
    fn test_uniform_region_has_no_edges() {
        // Only the forced gradient frame is white, so every ray saturates.
        let pupil = EyeEstimate::new(25, 25, 10.0);
        let verdict = BlinkClassifier::default()
            .classify(&pupil, &uniform(50, 128))
            .unwrap();

        assert_eq!(verdict.diagnostic.dimensions(), (30, 30));
        assert_eq!(verdict.region.width(), 30);
        assert!(verdict.measurement.saturated.is_some());
    }

    #[test]
    fn test_threshold_override() {
        let pupil = EyeEstimate::new(25, 25, 10.0);
        let image = uniform(50, 128);
        let classifier = BlinkClassifier::default();

        let verdict = classifier.classify(&pupil, &image).unwrap();
        let ratio = verdict.measurement.ratio;

        let lenient = classifier
            .classify_with_threshold(&pupil, &image, ratio - 0.01)
            .unwrap();
        let strict = classifier
            .classify_with_threshold(&pupil, &image, ratio)
            .unwrap();
        assert!(!lenient.is_blink);
        assert!(strict.is_blink);
    }

    struct Rejecting;

    impl Smoother for Rejecting {
        fn smooth(&self, image: &GrayImage, _radius: u32) -> Result<GrayImage, FilterError> {
            Err(FilterError::EmptyImage {
                stage: "test",
                width: image.width(),
                height: image.height(),
            })
        }
    }

    #[test]
    fn test_filter_error_propagates() {
        let classifier =
            BlinkClassifier::with_filters(BlinkConfig::default(), Box::new(Rejecting), Box::new(Sobel));
        let err = classifier
            .classify(&EyeEstimate::new(25, 25, 10.0), &uniform(50, 128))
            .unwrap_err();
        assert!(matches!(err, BlinkError::Filter(_)));
    }

    #[test]
    fn test_classifier_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BlinkClassifier>();
    }
}
