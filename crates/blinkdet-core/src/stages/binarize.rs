//! Two-level thresholding of the gradient image.

use image::{GrayImage, Rgb, RgbImage};

/// Edge pixel.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
/// Background pixel.
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Maps every pixel brighter than `cutoff` to [`WHITE`], all others to [`BLACK`].
#[must_use]
pub fn binarize(gradient: &GrayImage, cutoff: u8) -> RgbImage {
    let (width, height) = gradient.dimensions();
    RgbImage::from_fn(width, height, |x, y| {
        if gradient.get_pixel(x, y)[0] > cutoff {
            WHITE
        } else {
            BLACK
        }
    })
}

/// Returns `true` if every pixel is exactly [`WHITE`] or [`BLACK`].
#[must_use]
pub fn is_binary(image: &RgbImage) -> bool {
    image.pixels().all(|p| *p == WHITE || *p == BLACK)
}
