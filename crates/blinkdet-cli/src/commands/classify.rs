//! Classify command - judge each requested eye as open or closed.

use std::path::{Path, PathBuf};

use anyhow::Result;
use blinkdet_adapters::{load_image, DiagnosticWriter};
use blinkdet_core::{
    AnalysisResult, BlinkClassifier, BlinkConfig, EyeEstimate, EyeReport, EyeStatus,
    ImageDimensions, ImageInfo, ResultOutput,
};
use clap::Args;
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, OutputFormat};

/// Parse a `ROW,COL,SCALE` pupil estimate.
fn parse_eye(s: &str) -> Result<EyeEstimate, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [row, col, scale] = parts.as_slice() else {
        return Err(format!("'{s}' is not ROW,COL,SCALE"));
    };

    let row: i32 = row
        .parse()
        .map_err(|_| format!("row '{row}' is not an integer"))?;
    let col: i32 = col
        .parse()
        .map_err(|_| format!("column '{col}' is not an integer"))?;
    let scale: f32 = scale
        .parse()
        .map_err(|_| format!("scale '{scale}' is not a number"))?;
    if !scale.is_finite() || scale < 0.0 {
        return Err(format!("scale {scale} must be a non-negative number"));
    }

    Ok(EyeEstimate::new(row, col, scale))
}

/// Parse a non-negative ratio threshold.
fn parse_ratio(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} must be a non-negative number"))
    }
}

/// Parse a strictly positive scale factor.
fn parse_scale(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} must be greater than 0"))
    }
}

/// Shared arguments for eye classification.
#[derive(Args, Clone, Default)]
pub struct ClassifyArgs {
    /// Image to analyze
    pub image: Option<PathBuf>,

    /// Pupil estimate as ROW,COL,SCALE (repeatable)
    #[arg(
        short,
        long = "eye",
        value_name = "ROW,COL,SCALE",
        value_parser = parse_eye,
        allow_hyphen_values = true
    )]
    pub eyes: Vec<EyeEstimate>,

    /// Aperture ratio at or below which an eye is closed
    #[arg(short, long, value_parser = parse_ratio, allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    /// Eye region half-side as a multiple of the pupil scale
    #[arg(long, value_parser = parse_scale, allow_negative_numbers = true)]
    pub region_scale: Option<f32>,

    /// Smoothing radius in pixels
    #[arg(long)]
    pub blur_radius: Option<u32>,

    /// Gradient magnitude floor
    #[arg(long)]
    pub gradient_threshold: Option<u16>,

    /// Binarization cutoff (0-255)
    #[arg(long)]
    pub cutoff: Option<u8>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Write a diagnostic PNG per eye into this directory
    #[arg(long, value_name = "DIR")]
    pub debug_dir: Option<PathBuf>,
}

impl ClassifyArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (`BlinkConfig::default()`)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.threshold = args.threshold.or(config.classifier.ratio_threshold);
        args.region_scale = args.region_scale.or(config.classifier.region_scale);
        args.blur_radius = args.blur_radius.or(config.filters.blur_radius);
        args.gradient_threshold = args
            .gradient_threshold
            .or(config.filters.gradient_threshold);
        args.cutoff = args.cutoff.or(config.filters.binarize_cutoff);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_deref()
                .and_then(OutputFormat::from_name);
        }
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if args.debug_dir.is_none() {
            args.debug_dir.clone_from(&config.output.debug_dir);
        }

        args
    }

    /// Classifier configuration with defaults for anything unset.
    fn blink_config(&self) -> BlinkConfig {
        let defaults = BlinkConfig::default();
        BlinkConfig {
            ratio_threshold: self.threshold.unwrap_or(defaults.ratio_threshold),
            region_scale: self.region_scale.unwrap_or(defaults.region_scale),
            blur_radius: self.blur_radius.unwrap_or(defaults.blur_radius),
            gradient_threshold: self
                .gradient_threshold
                .unwrap_or(defaults.gradient_threshold),
            binarize_cutoff: self.cutoff.unwrap_or(defaults.binarize_cutoff),
        }
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Result of running the classify command.
pub struct ClassifyResult {
    /// Number of eyes classified closed.
    pub blinks: usize,
    /// Number of eyes whose classification failed.
    pub failed: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the classify command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &ClassifyArgs) -> Result<ClassifyResult> {
    let output = JsonOutput::stdout(args.format(), args.pretty);
    run_with_output(args, &output)
}

/// Run the classify command, writing the report through `output`.
pub fn run_with_output(args: &ClassifyArgs, output: &dyn ResultOutput) -> Result<ClassifyResult> {
    let Some(path) = args.image.as_deref() else {
        anyhow::bail!("No image specified. Use --help for usage information.");
    };
    if args.eyes.is_empty() {
        anyhow::bail!("No eyes specified. Pass --eye ROW,COL,SCALE at least once.");
    }

    info!(
        "Classifying {} eye(s) in {}",
        args.eyes.len(),
        path.display()
    );

    let image = load_image(path)?;
    let classifier = BlinkClassifier::new(args.blink_config());
    debug!("Classifier config: {:?}", classifier.config());

    let diagnostics = args
        .debug_dir
        .as_ref()
        .map(DiagnosticWriter::new)
        .transpose()?;

    let eyes = classify_eyes(&classifier, &image, &args.eyes, diagnostics.as_ref(), path);

    let result = AnalysisResult {
        path: image.path.clone(),
        timestamp: iso_timestamp(),
        dimensions: ImageDimensions::new(image.width, image.height),
        eyes,
    };

    output.write(&result)?;
    output.flush()?;

    let blinks = result.blink_count();
    let failed = result
        .eyes
        .iter()
        .filter(|e| matches!(e.status, EyeStatus::Failed { .. }))
        .count();

    let exit_code = if blinks > 0 {
        ExitCode::BlinkDetected
    } else if failed > 0 {
        ExitCode::Error
    } else {
        ExitCode::Success
    };
    info!("{blinks} closed, {failed} failed of {} eye(s)", result.eyes.len());

    Ok(ClassifyResult {
        blinks,
        failed,
        exit_code,
    })
}

/// Classify each pupil estimate in request order.
fn classify_eyes(
    classifier: &BlinkClassifier,
    image: &ImageInfo,
    pupils: &[EyeEstimate],
    diagnostics: Option<&DiagnosticWriter>,
    source: &Path,
) -> Vec<EyeReport> {
    pupils
        .iter()
        .enumerate()
        .map(|(index, pupil)| {
            let mut report = EyeReport {
                index,
                side: None,
                pupil: *pupil,
                status: EyeStatus::NotFound,
                diagnostic_path: None,
            };

            if !pupil.is_found() {
                debug!("Eye {index}: no pupil at ({}, {})", pupil.row, pupil.col);
                return report;
            }

            match classifier.classify(pupil, &image.image) {
                Ok(verdict) => {
                    report.status = EyeStatus::from(&verdict);
                    if let Some(writer) = diagnostics {
                        match writer.save(source, index, &verdict.diagnostic) {
                            Ok(p) => report.diagnostic_path = Some(p.to_string_lossy().into_owned()),
                            Err(e) => warn!("Eye {index}: {e:#}"),
                        }
                    }
                }
                Err(e) => {
                    warn!("Eye {index}: {e}");
                    report.status = EyeStatus::from(&e);
                }
            }

            report
        })
        .collect()
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use blinkdet_test_support::{MockResultOutput, SyntheticEyeBuilder};
    use tempfile::TempDir;

    #[test]
    fn test_parse_eye() {
        let eye = parse_eye("60,72,20.5").unwrap();
        assert_eq!((eye.row, eye.col), (60, 72));
        assert!((eye.scale - 20.5).abs() < f32::EPSILON);

        assert_eq!(parse_eye(" 1, 2, 3 ").unwrap().col, 2);
        assert_eq!(parse_eye("-5,10,4").unwrap().row, -5);
    }

    #[test]
    fn test_parse_eye_rejects_malformed() {
        assert!(parse_eye("60,72").is_err());
        assert!(parse_eye("60,72,20,1").is_err());
        assert!(parse_eye("a,72,20").unwrap_err().contains("row"));
        assert!(parse_eye("60,7.5,20").unwrap_err().contains("column"));
        assert!(parse_eye("60,72,-1").is_err());
        assert!(parse_eye("60,72,nan").is_err());
    }

    #[test]
    fn test_parse_ratio_and_scale() {
        assert!((parse_ratio("0.44").unwrap() - 0.44).abs() < f64::EPSILON);
        assert!(parse_ratio("-0.1").is_err());
        assert!(parse_ratio("inf").is_err());
        assert!(parse_scale("0").is_err());
        assert!((parse_scale("1.5").unwrap() - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cli_wins_over_config() {
        let mut config = AppConfig::default();
        config.classifier.ratio_threshold = Some(0.3);
        config.filters.blur_radius = Some(2);
        config.output.format = Some("json".into());

        let args = ClassifyArgs {
            threshold: Some(0.6),
            ..ClassifyArgs::default()
        };
        let merged = ClassifyArgs::with_config(args, &config);

        assert_eq!(merged.threshold, Some(0.6));
        assert_eq!(merged.blur_radius, Some(2));
        assert_eq!(merged.format(), OutputFormat::Json);
    }

    #[test]
    fn test_blink_config_defaults() {
        let args = ClassifyArgs {
            cutoff: Some(90),
            ..ClassifyArgs::default()
        };
        let config = args.blink_config();

        assert_eq!(config.binarize_cutoff, 90);
        assert_eq!(config, BlinkConfig::default().with_binarize_cutoff(90));
        assert_eq!(args.format(), OutputFormat::Jsonl);
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let ts = iso_timestamp();
        assert!(
            time::OffsetDateTime::parse(&ts, &time::format_description::well_known::Rfc3339)
                .is_ok()
        );
    }

    #[test]
    fn test_run_writes_through_output_port() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("closed.png");
        SyntheticEyeBuilder::closed().image.save(&path).unwrap();

        let args = ClassifyArgs {
            image: Some(path),
            eyes: vec![
                SyntheticEyeBuilder::centered_pupil(),
                EyeEstimate::not_found(),
                EyeEstimate::new(500, 500, 20.0),
            ],
            ..ClassifyArgs::default()
        };
        let output = MockResultOutput::new();
        let result = run_with_output(&args, &output).unwrap();

        assert_eq!(result.blinks, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(result.exit_code, ExitCode::BlinkDetected);

        let written = output.results();
        assert_eq!(written.len(), 1);
        assert_eq!(output.flush_count(), 1);

        let statuses: Vec<_> = written[0].eyes.iter().map(|e| &e.status).collect();
        assert!(matches!(statuses[0], EyeStatus::Closed { .. }));
        assert_eq!(statuses[1], &EyeStatus::NotFound);
        assert!(matches!(statuses[2], EyeStatus::Failed { .. }));
    }

    #[test]
    fn test_run_open_eye_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("open.png");
        SyntheticEyeBuilder::open().image.save(&path).unwrap();

        let args = ClassifyArgs {
            image: Some(path),
            eyes: vec![SyntheticEyeBuilder::centered_pupil()],
            ..ClassifyArgs::default()
        };
        let output = MockResultOutput::new();
        let result = run_with_output(&args, &output).unwrap();

        assert_eq!((result.blinks, result.failed), (0, 0));
        assert_eq!(result.exit_code, ExitCode::Success);
        assert!(matches!(
            output.results()[0].eyes[0].status,
            EyeStatus::Open { .. }
        ));
    }
}
