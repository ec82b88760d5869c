//! Pipeline stages, leaf-first.
//!
//! Region extraction → luma → smoothing → gradient magnitude → binarization → ray-cast.

mod binarize;
mod filters;
mod gap;
mod luma;
mod region;

pub use binarize::{binarize, is_binary, BLACK, WHITE};
pub use filters::{BoxBlur, GradientOperator, Smoother, Sobel};
pub use gap::{aspect_ratio, correct_saturation, measure_gap, RayCounts};
pub use luma::{gray_from_raw, luma, to_luma_image, to_luma_vec};
pub use region::extract_region;
