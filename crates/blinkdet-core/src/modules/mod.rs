//! Classification modules.
//!
//! [`BlinkClassifier`] judges a single eye; [`EyesModule`] drives it over
//! every face a detector reports.

mod blink;
mod eyes;

pub use blink::{classify_blink, BlinkClassifier, BlinkConfig};
pub use eyes::{EyesConfig, EyesModule};
