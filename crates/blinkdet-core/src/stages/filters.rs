//! Smoothing and gradient-magnitude primitives.
//!
//! The classifier only relies on the contracts of [`Smoother`] and
//! [`GradientOperator`]; [`BoxBlur`] and [`Sobel`] are the stock implementations.

use image::{GrayImage, Luma};
use imageproc::filter::box_filter;
use imageproc::gradients::sobel_gradients;

use crate::domain::FilterError;

/// Noise suppression over a grayscale image.
pub trait Smoother: Send + Sync {
    /// Returns a smoothed copy of `image` with identical dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyImage`] for a zero-area input.
    fn smooth(&self, image: &GrayImage, radius: u32) -> Result<GrayImage, FilterError>;
}

/// Edge-strength estimate over a grayscale image.
pub trait GradientOperator: Send + Sync {
    /// Returns per-pixel gradient magnitude, with values below `threshold`
    /// suppressed to zero.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyImage`] for a zero-area input.
    fn magnitude(&self, image: &GrayImage, threshold: u16) -> Result<GrayImage, FilterError>;
}

/// Box blur with a square window of side `2 * radius + 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxBlur;

impl Smoother for BoxBlur {
    fn smooth(&self, image: &GrayImage, radius: u32) -> Result<GrayImage, FilterError> {
        ensure_non_empty("smooth", image)?;
        Ok(box_filter(image, radius, radius))
    }
}

/// Sobel gradient magnitude, saturating at 255.
///
/// The last row and the last column have no forward neighbour and are always
/// reported as full-strength edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sobel;

impl GradientOperator for Sobel {
    #[allow(clippy::cast_possible_truncation)]
    fn magnitude(&self, image: &GrayImage, threshold: u16) -> Result<GrayImage, FilterError> {
        ensure_non_empty("gradient", image)?;

        let gradients = sobel_gradients(image);
        let (width, height) = gradients.dimensions();

        Ok(GrayImage::from_fn(width, height, |x, y| {
            if x + 1 == width || y + 1 == height {
                return Luma([u8::MAX]);
            }
            let m = gradients.get_pixel(x, y)[0];
            if m < threshold {
                Luma([0])
            } else {
                Luma([m.min(u16::from(u8::MAX)) as u8])
            }
        }))
    }
}

fn ensure_non_empty(stage: &'static str, image: &GrayImage) -> Result<(), FilterError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(FilterError::EmptyImage {
            stage,
            width,
            height,
        });
    }
    Ok(())
}
