//! Luma conversion with fixed perceptual weights.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use image::{DynamicImage, GrayImage, Luma};

use crate::domain::BlinkError;

const RED_WEIGHT: f64 = 0.299;
const GREEN_WEIGHT: f64 = 0.587;
const BLUE_WEIGHT: f64 = 0.114;

/// Luma of one pixel given 16-bit channels, truncated to 8 bits.
///
/// 8-bit sources must be widened first (`v * 257`), which is what
/// [`DynamicImage::to_rgba16`] does.
#[must_use]
pub fn luma(r: u16, g: u16, b: u16) -> u8 {
    let y = BLUE_WEIGHT.mul_add(
        f64::from(b),
        RED_WEIGHT.mul_add(f64::from(r), GREEN_WEIGHT * f64::from(g)),
    );
    (y / 256.0) as u8
}

/// Row-major luma values of every pixel.
#[must_use]
pub fn to_luma_vec(image: &DynamicImage) -> Vec<u8> {
    image
        .to_rgba16()
        .pixels()
        .map(|p| luma(p[0], p[1], p[2]))
        .collect()
}

/// Single-channel image of the same shape.
#[must_use]
pub fn to_luma_image(image: &DynamicImage) -> GrayImage {
    let rgba = image.to_rgba16();
    GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let p = rgba.get_pixel(x, y);
        Luma([luma(p[0], p[1], p[2])])
    })
}

/// Builds a grayscale image from a row-major `cols` x `rows` byte buffer.
///
/// # Errors
///
/// Returns [`BlinkError::BufferSize`] if `pixels.len() != cols * rows`.
pub fn gray_from_raw(pixels: &[u8], cols: u32, rows: u32) -> Result<DynamicImage, BlinkError> {
    let expected = cols as usize * rows as usize;
    GrayImage::from_raw(cols, rows, pixels.to_vec())
        .filter(|_| pixels.len() == expected)
        .map(DynamicImage::ImageLuma8)
        .ok_or(BlinkError::BufferSize {
            expected,
            actual: pixels.len(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, RgbImage, Rgba};

    #[test]
    fn test_extremes() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(u16::MAX, u16::MAX, u16::MAX), 255);
    }

    #[test]
    fn test_weights() {
        // Pure red: 0.299 * 65535 / 256 = 76.5
        assert_eq!(luma(u16::MAX, 0, 0), 76);
        // Pure green: 0.587 * 65535 / 256 = 150.3
        assert_eq!(luma(0, u16::MAX, 0), 150);
        // Pure blue: 0.114 * 65535 / 256 = 29.2
        assert_eq!(luma(0, 0, u16::MAX), 29);
    }

    #[test]
    fn test_variants_agree() {
        let img = RgbImage::from_fn(7, 5, |x, y| {
            Rgb([(x * 30) as u8, (y * 50) as u8, ((x + y) * 20) as u8])
        });
        let dynamic = DynamicImage::ImageRgb8(img);

        let flat = to_luma_vec(&dynamic);
        let gray = to_luma_image(&dynamic);

        assert_eq!(flat.len(), 35);
        assert_eq!(gray.dimensions(), (7, 5));
        assert_eq!(flat, gray.into_raw());
    }

    #[test]
    fn test_sixteen_bit_source_scaled_down() {
        let img: ImageBuffer<Rgba<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(2, 2, Rgba([32896, 32896, 32896, 0]));
        let gray = to_luma_image(&DynamicImage::ImageRgba16(img));
        assert!(gray.pixels().all(|p| p[0] == 128));
    }

    #[test]
    fn test_alpha_ignored() {
        let opaque = image::RgbaImage::from_pixel(1, 1, Rgba([90, 120, 30, 255]));
        let clear = image::RgbaImage::from_pixel(1, 1, Rgba([90, 120, 30, 0]));
        assert_eq!(
            to_luma_vec(&DynamicImage::ImageRgba8(opaque)),
            to_luma_vec(&DynamicImage::ImageRgba8(clear))
        );
    }

    #[test]
    fn test_gray_from_raw() {
        let img = gray_from_raw(&[1, 2, 3, 4, 5, 6], 3, 2).unwrap();
        let gray = img.to_luma8();
        assert_eq!(gray.get_pixel(2, 1)[0], 6);
        assert_eq!(gray.get_pixel(0, 1)[0], 4);
    }

    #[test]
    fn test_gray_from_raw_size_mismatch() {
        let err = gray_from_raw(&[0; 5], 3, 2).unwrap_err();
        assert_eq!(
            err,
            BlinkError::BufferSize {
                expected: 6,
                actual: 5
            }
        );
    }
}
