//! Synthetic eye images for testing.

use blinkdet_core::domain::{EyeEstimate, ImageInfo};
use image::{DynamicImage, Rgb, RgbImage};

/// Skin-like background level.
const SKIN: Rgb<u8> = Rgb([200, 200, 200]);
/// Pupil and lash level.
const DARK: Rgb<u8> = Rgb([0, 0, 0]);

/// Pupil scale the eye fixtures are drawn for.
///
/// With the default region scale this yields a 60x60 eye region.
pub const EYE_SCALE: f32 = 20.0;

/// Side of one square eye canvas.
pub const EYE_CANVAS: u32 = 120;

/// Builder for synthetic eye images.
///
/// Open eyes are a dark disk on a light background; closed eyes are a thin
/// dark horizontal band, the lash line, across the whole canvas.
pub struct SyntheticEyeBuilder;

impl SyntheticEyeBuilder {
    /// Open eye: dark disk of `radius` centered on the canvas.
    #[must_use]
    pub fn open_eye(size: u32, radius: u32) -> ImageInfo {
        let img = Self::draw(size, size, |x, y| {
            let (dx, dy) = (i64::from(x) - i64::from(size / 2), i64::from(y) - i64::from(size / 2));
            dx * dx + dy * dy <= i64::from(radius) * i64::from(radius)
        });
        ImageInfo::new("synthetic://open_eye", DynamicImage::ImageRgb8(img))
    }

    /// Closed eye: dark band of `2 * half + 1` rows through the canvas center.
    #[must_use]
    pub fn closed_eye(size: u32, half: u32) -> ImageInfo {
        let img = Self::draw(size, size, |_, y| y.abs_diff(size / 2) <= half);
        ImageInfo::new("synthetic://closed_eye", DynamicImage::ImageRgb8(img))
    }

    /// Default open eye on a standard canvas.
    #[must_use]
    pub fn open() -> ImageInfo {
        Self::open_eye(EYE_CANVAS, 12)
    }

    /// Default closed eye on a standard canvas.
    #[must_use]
    pub fn closed() -> ImageInfo {
        Self::closed_eye(EYE_CANVAS, 1)
    }

    /// Two eye canvases side by side, left and right.
    ///
    /// Pupils sit at [`Self::left_pupil`] and [`Self::right_pupil`].
    #[must_use]
    pub fn eye_pair(left_open: bool, right_open: bool) -> ImageInfo {
        let pick = |open: bool| {
            if open {
                Self::open().image.to_rgb8()
            } else {
                Self::closed().image.to_rgb8()
            }
        };
        let (left, right) = (pick(left_open), pick(right_open));

        let img = RgbImage::from_fn(EYE_CANVAS * 2, EYE_CANVAS, |x, y| {
            if x < EYE_CANVAS {
                *left.get_pixel(x, y)
            } else {
                *right.get_pixel(x - EYE_CANVAS, y)
            }
        });
        ImageInfo::new("synthetic://eye_pair", DynamicImage::ImageRgb8(img))
    }

    /// Pupil at the center of a single eye canvas.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn centered_pupil() -> EyeEstimate {
        let c = (EYE_CANVAS / 2) as i32;
        EyeEstimate::new(c, c, EYE_SCALE)
    }

    /// Pupil of the left eye in [`Self::eye_pair`].
    #[must_use]
    pub const fn left_pupil() -> EyeEstimate {
        Self::centered_pupil()
    }

    /// Pupil of the right eye in [`Self::eye_pair`].
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn right_pupil() -> EyeEstimate {
        let c = (EYE_CANVAS / 2) as i32;
        EyeEstimate::new(c, c + EYE_CANVAS as i32, EYE_SCALE)
    }

    /// Uniform gray RGB image.
    #[must_use]
    pub fn uniform(width: u32, height: u32, value: u8) -> ImageInfo {
        let img = RgbImage::from_pixel(width, height, Rgb([value, value, value]));
        ImageInfo::new("synthetic://uniform", DynamicImage::ImageRgb8(img))
    }

    /// Binary region whose rays measure exactly `[right, left, down, up]`.
    ///
    /// Black field with white edge pixels placed along the four rays and the
    /// last row and column white.
    #[must_use]
    pub fn ray_fixture(width: u32, height: u32, distances: [u32; 4]) -> RgbImage {
        let white = Rgb([255, 255, 255]);
        let mut img = RgbImage::from_fn(width, height, |x, y| {
            if x + 1 == width || y + 1 == height {
                white
            } else {
                Rgb([0, 0, 0])
            }
        });
        let (c, r) = (width / 2, height / 2);
        let [right, left, down, up] = distances;
        img.put_pixel(c + right, r, white);
        img.put_pixel(c - 1 - left, r, white);
        img.put_pixel(c, r + 1 + down, white);
        img.put_pixel(c, r - 1 - up, white);
        img
    }

    fn draw(width: u32, height: u32, dark: impl Fn(u32, u32) -> bool) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| if dark(x, y) { DARK } else { SKIN })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_eye_shape() {
        let img = SyntheticEyeBuilder::open().image.to_rgb8();
        assert_eq!(*img.get_pixel(60, 60), DARK);
        assert_eq!(*img.get_pixel(72, 60), DARK);
        assert_eq!(*img.get_pixel(73, 60), SKIN);
        assert_eq!(*img.get_pixel(0, 0), SKIN);
    }

    #[test]
    fn test_closed_eye_shape() {
        let img = SyntheticEyeBuilder::closed().image.to_rgb8();
        assert_eq!(*img.get_pixel(0, 59), DARK);
        assert_eq!(*img.get_pixel(119, 61), DARK);
        assert_eq!(*img.get_pixel(60, 58), SKIN);
        assert_eq!(*img.get_pixel(60, 62), SKIN);
    }

    #[test]
    fn test_eye_pair_layout() {
        let info = SyntheticEyeBuilder::eye_pair(true, false);
        assert_eq!((info.width, info.height), (240, 120));

        let img = info.image.to_rgb8();
        let (l, r) = (SyntheticEyeBuilder::left_pupil(), SyntheticEyeBuilder::right_pupil());
        #[allow(clippy::cast_sign_loss)]
        {
            assert_eq!(*img.get_pixel(l.col as u32, l.row as u32), DARK);
            assert_eq!(*img.get_pixel(r.col as u32, r.row as u32), DARK);
            // Above the right pupil is skin for a closed eye, pupil for an open one.
            assert_eq!(*img.get_pixel(r.col as u32, r.row as u32 - 5), SKIN);
            assert_eq!(*img.get_pixel(l.col as u32, l.row as u32 - 5), DARK);
        }
    }

    #[test]
    fn test_ray_fixture_edges() {
        let img = SyntheticEyeBuilder::ray_fixture(40, 20, [5, 6, 2, 3]);
        let white = Rgb([255, 255, 255]);
        assert_eq!(*img.get_pixel(25, 10), white);
        assert_eq!(*img.get_pixel(13, 10), white);
        assert_eq!(*img.get_pixel(20, 13), white);
        assert_eq!(*img.get_pixel(20, 6), white);
        assert_eq!(*img.get_pixel(39, 0), white);
        assert_eq!(*img.get_pixel(20, 10), Rgb([0, 0, 0]));
    }
}
