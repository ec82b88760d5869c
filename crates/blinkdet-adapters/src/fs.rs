//! Filesystem adapter for loading images and writing diagnostics.

use anyhow::{Context, Result};
use blinkdet_core::ImageInfo;
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supported image extensions.
const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "webp", "bmp", "gif"];

/// Checks if a path has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| RASTER_EXTENSIONS.contains(&e.as_str()))
}

/// Loads an image from the filesystem.
///
/// # Errors
///
/// Returns an error if the extension is unsupported or decoding fails.
pub fn load_image(path: &Path) -> Result<ImageInfo> {
    if !is_supported_image(path) {
        anyhow::bail!("Unsupported file type: {}", path.display());
    }

    let image =
        image::open(path).with_context(|| format!("Failed to open image: {}", path.display()))?;
    debug!(
        "Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );

    Ok(ImageInfo::new(path.to_string_lossy(), image))
}

/// Writes per-eye diagnostic images as PNG files.
#[derive(Debug, Clone)]
pub struct DiagnosticWriter {
    dir: PathBuf,
}

impl DiagnosticWriter {
    /// Creates a writer targeting `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create debug directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Returns the target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the diagnostic for eye `index` of `source`: `<stem>_eye<index>.png`.
    #[must_use]
    pub fn path_for(&self, source: &Path, index: usize) -> PathBuf {
        let stem = source
            .file_stem()
            .map_or_else(|| "image".into(), |s| s.to_string_lossy());
        self.dir.join(format!("{stem}_eye{index}.png"))
    }

    /// Saves `diagnostic` for eye `index` of `source`, returning the written path.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save(&self, source: &Path, index: usize, diagnostic: &RgbImage) -> Result<PathBuf> {
        let path = self.path_for(source, index);
        diagnostic
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("Failed to write diagnostic: {}", path.display()))?;
        debug!("Wrote diagnostic {}", path.display());
        Ok(path)
    }
}
