//! Eye region extraction.

#![allow(clippy::cast_sign_loss)]

use image::DynamicImage;
use tracing::debug;

use crate::domain::{BlinkError, EyeEstimate, Rectangle};

/// Crops the eye box `center ± floor(factor * scale)` out of `image`.
///
/// The part of the box that overlaps the image is returned together with the
/// clipped rectangle.
///
/// # Errors
///
/// Returns [`BlinkError::OutOfBounds`] if the box does not overlap the image.
pub fn extract_region(
    image: &DynamicImage,
    eye: &EyeEstimate,
    factor: f32,
) -> Result<(DynamicImage, Rectangle), BlinkError> {
    let rect = Rectangle::around(eye, factor);
    let (width, height) = (image.width(), image.height());

    let clipped = rect.clip(width, height).ok_or(BlinkError::OutOfBounds {
        rect,
        width,
        height,
    })?;

    if clipped != rect {
        debug!("Eye region {} clipped to {}", rect, clipped);
    }

    // Clipped coordinates are non-negative and inside the image.
    let region = image.crop_imm(
        clipped.min_col as u32,
        clipped.min_row as u32,
        clipped.width() as u32,
        clipped.height() as u32,
    );

    Ok((region, clipped))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn ramp(width: u32, height: u32) -> DynamicImage {
        #[allow(clippy::cast_possible_truncation)]
        let img = GrayImage::from_fn(width, height, |x, y| Luma([(x + y * width) as u8]));
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn test_extract_inside() {
        let img = ramp(16, 16);
        let (region, rect) = extract_region(&img, &EyeEstimate::new(8, 8, 2.0), 1.5).unwrap();

        assert_eq!(rect, Rectangle::new(5, 5, 11, 11));
        assert_eq!((region.width(), region.height()), (6, 6));
        // Top-left of the region is image pixel (col 5, row 5).
        assert_eq!(region.to_luma8().get_pixel(0, 0)[0], 5 + 5 * 16);
    }

    #[test]
    fn test_extract_partial_overlap() {
        let img = ramp(16, 16);
        let (region, rect) = extract_region(&img, &EyeEstimate::new(2, 14, 4.0), 1.5).unwrap();

        assert_eq!(rect, Rectangle::new(0, 8, 8, 16));
        assert_eq!((region.width(), region.height()), (8, 8));
    }

    #[test]
    fn test_extract_out_of_bounds() {
        let img = ramp(16, 16);
        let err = extract_region(&img, &EyeEstimate::new(100, 100, 4.0), 1.5).unwrap_err();

        assert!(matches!(
            err,
            BlinkError::OutOfBounds {
                width: 16,
                height: 16,
                ..
            }
        ));
    }

    #[test]
    fn test_extract_zero_area() {
        let img = ramp(16, 16);
        let err = extract_region(&img, &EyeEstimate::new(8, 8, 0.4), 1.5).unwrap_err();
        assert!(matches!(err, BlinkError::OutOfBounds { .. }));
    }
}
