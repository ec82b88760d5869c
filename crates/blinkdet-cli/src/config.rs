//! Configuration file support for blinkdet.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/blinkdet/config.toml` (lowest priority)
//! - Project-local: `.blinkdet.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use blinkdet_core::BlinkConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Project-local config file name.
pub const PROJECT_CONFIG: &str = ".blinkdet.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Decision settings.
    pub classifier: ClassifierConfig,
    /// Pre-filter settings.
    pub filters: FiltersConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// Blink decision configuration.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Aperture ratio at or below which an eye is closed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio_threshold: Option<f64>,
    /// Eye region half-side as a multiple of the pupil scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_scale: Option<f32>,
}

/// Pre-filter configuration.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FiltersConfig {
    /// Smoothing radius in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur_radius: Option<u32>,
    /// Gradient magnitude floor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_threshold: Option<u16>,
    /// Binarization cutoff (0-255).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binarize_cutoff: Option<u8>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Pretty-print JSON output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
    /// Directory for diagnostic images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/blinkdet/config.toml`
    /// 2. Project-local: `.blinkdet.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings
    /// and dropped.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        for problem in config.sanitize() {
            eprintln!("warning: {problem}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(t) = self.classifier.ratio_threshold {
            if !t.is_finite() || t < 0.0 {
                return Err(format!(
                    "classifier.ratio_threshold must be a non-negative number, got {t}"
                ));
            }
        }
        if let Some(s) = self.classifier.region_scale {
            if !s.is_finite() || s <= 0.0 {
                return Err(format!(
                    "classifier.region_scale must be greater than 0, got {s}"
                ));
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Drops invalid values one at a time, returning what was dropped.
    fn sanitize(&mut self) -> Vec<String> {
        let mut problems = Vec::new();
        while let Err(e) = self.validate() {
            if e.starts_with("classifier.ratio_threshold") {
                self.classifier.ratio_threshold = None;
            } else if e.starts_with("classifier.region_scale") {
                self.classifier.region_scale = None;
            } else {
                self.output.format = None;
            }
            problems.push(e);
        }
        problems
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // Classifier
        self.classifier.ratio_threshold = other
            .classifier
            .ratio_threshold
            .or(self.classifier.ratio_threshold);
        self.classifier.region_scale = other
            .classifier
            .region_scale
            .or(self.classifier.region_scale);

        // Filters
        self.filters.blur_radius = other.filters.blur_radius.or(self.filters.blur_radius);
        self.filters.gradient_threshold = other
            .filters
            .gradient_threshold
            .or(self.filters.gradient_threshold);
        self.filters.binarize_cutoff = other
            .filters
            .binarize_cutoff
            .or(self.filters.binarize_cutoff);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.debug_dir = other
            .output
            .debug_dir
            .or_else(|| self.output.debug_dir.take());
    }

    /// Copy with every unset value replaced by its built-in default.
    #[must_use]
    pub fn resolved(&self) -> Self {
        let defaults = BlinkConfig::default();
        let mut out = self.clone();

        out.classifier.ratio_threshold = Some(
            self.classifier
                .ratio_threshold
                .unwrap_or(defaults.ratio_threshold),
        );
        out.classifier.region_scale =
            Some(self.classifier.region_scale.unwrap_or(defaults.region_scale));
        out.filters.blur_radius = Some(self.filters.blur_radius.unwrap_or(defaults.blur_radius));
        out.filters.gradient_threshold = Some(
            self.filters
                .gradient_threshold
                .unwrap_or(defaults.gradient_threshold),
        );
        out.filters.binarize_cutoff = Some(
            self.filters
                .binarize_cutoff
                .unwrap_or(defaults.binarize_cutoff),
        );
        out.output.format = Some(
            self.output
                .format
                .clone()
                .unwrap_or_else(|| "jsonl".to_string()),
        );
        out.output.pretty = Some(self.output.pretty.unwrap_or(false));

        out
    }
}

/// Get the XDG config file path.
pub fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("blinkdet").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
pub fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.blinkdet.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(PROJECT_CONFIG);
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
