//! Blinkdet Adapters - External adapters for blinkdet.
//!
//! This crate provides adapters for:
//! - Loading images from the filesystem
//! - Writing diagnostic eye images

pub mod fs;

pub use fs::{is_supported_image, load_image, DiagnosticWriter};
