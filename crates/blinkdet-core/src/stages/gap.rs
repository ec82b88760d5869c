//! Eyelid-gap ray-caster.
//!
//! Four rays leave the center of the binarized eye region along the cardinal
//! axes and stop at the first edge pixel. The vertical over horizontal span
//! of the opening separates open eyes from closed ones.
//!
//! The caster both measures and annotates its input: every black pixel a ray
//! crosses is tinted red so the scan lines show up in the diagnostic image.

use image::RgbImage;
use tracing::{debug, trace};

use crate::domain::{GapMeasurement, Ray};

/// Ray distances before the aspect ratio is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RayCounts {
    /// Right-ray distance.
    pub cx1: u32,
    /// Left-ray distance.
    pub cx2: u32,
    /// Down-ray distance.
    pub cy1: u32,
    /// Up-ray distance.
    pub cy2: u32,
}

impl RayCounts {
    fn get_mut(&mut self, ray: Ray) -> &mut u32 {
        match ray {
            Ray::Right => &mut self.cx1,
            Ray::Left => &mut self.cx2,
            Ray::Down => &mut self.cy1,
            Ray::Up => &mut self.cy2,
        }
    }
}

/// Casts the four rays over `image`, tinting the crossed black pixels.
///
/// A zero-area image yields an all-zero measurement.
#[must_use]
pub fn measure_gap(image: &mut RgbImage) -> GapMeasurement {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return finish(RayCounts::default(), None);
    }

    let (start_col, start_row) = (width / 2, height / 2);

    let mut counts = RayCounts {
        cx1: cast_ray(image, (start_col..width).map(|x| (x, start_row))),
        cx2: cast_ray(image, (0..start_col).rev().map(|x| (x, start_row))),
        cy1: cast_ray(image, (start_row + 1..height).map(|y| (start_col, y))),
        cy2: cast_ray(image, (0..start_row).rev().map(|y| (start_col, y))),
    };
    trace!("Raw ray counts {:?} in {}x{} region", counts, width, height);

    let saturated = correct_saturation(&mut counts, width, height);
    if let Some(ray) = saturated {
        debug!("Ray {:?} saturated, ignoring its distance", ray);
    }

    finish(counts, saturated)
}

/// Walks `path` until the first white pixel; returns the number of pixels
/// visited before it.
fn cast_ray(image: &mut RgbImage, path: impl Iterator<Item = (u32, u32)>) -> u32 {
    let mut count = 0;
    for (x, y) in path {
        let pixel = image.get_pixel_mut(x, y);
        match pixel[0] {
            u8::MAX => break,
            0 => pixel[0] = u8::MAX,
            _ => {}
        }
        count += 1;
    }
    count
}

/// Zeroes the first counter, in right, left, down, up order, that spans its
/// whole half of the region.
///
/// The gradient operator marks the last row and column as edges, so a ray
/// that met no interior edge ends one short on the right and down rays. Only
/// one counter is ever zeroed even when several rays saturate.
pub fn correct_saturation(counts: &mut RayCounts, width: u32, height: u32) -> Option<Ray> {
    let (half_w, half_h) = (width / 2, height / 2);

    let ray = if half_w.checked_sub(1) == Some(counts.cx1) {
        Ray::Right
    } else if counts.cx2 == half_w {
        Ray::Left
    } else if half_h.checked_sub(1) == Some(counts.cy1) {
        Ray::Down
    } else if counts.cy2 == half_h {
        Ray::Up
    } else {
        return None;
    };

    *counts.get_mut(ray) = 0;
    Some(ray)
}

/// Vertical over horizontal span.
///
/// Zero when the horizontal span is empty, whatever the vertical span.
#[must_use]
pub fn aspect_ratio(counts: &RayCounts) -> f64 {
    let cx = counts.cx1 + counts.cx2;
    let cy = if cx == 0 { 0 } else { counts.cy1 + counts.cy2 };

    if cx > 0 && cy > 0 {
        f64::from(cy) / f64::from(cx)
    } else {
        0.0
    }
}

fn finish(counts: RayCounts, saturated: Option<Ray>) -> GapMeasurement {
    GapMeasurement {
        cx1: counts.cx1,
        cx2: counts.cx2,
        cy1: counts.cy1,
        cy2: counts.cy2,
        ratio: aspect_ratio(&counts),
        saturated,
    }
}
