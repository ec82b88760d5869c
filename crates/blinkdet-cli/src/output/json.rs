//! JSON output adapter.

use anyhow::Result;
use blinkdet_core::{AnalysisResult, EyeReport, ResultOutput};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Mutex;

use super::OutputFormat;

/// One JSON Lines record: an eye report tagged with its image.
#[derive(Serialize)]
struct EyeLine<'a> {
    path: &'a str,
    #[serde(flatten)]
    report: &'a EyeReport,
}

/// JSON and JSON Lines output adapter.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    format: OutputFormat,
    pretty: bool,
}

impl JsonOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout(format: OutputFormat, pretty: bool) -> Self {
        Self::new(Box::new(io::stdout()), format, pretty)
    }

    /// Creates a new JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            format,
            pretty,
        }
    }

    fn render(&self, result: &AnalysisResult) -> Result<Vec<String>> {
        let lines = match self.format {
            OutputFormat::Jsonl => result
                .eyes
                .iter()
                .map(|report| {
                    serde_json::to_string(&EyeLine {
                        path: &result.path,
                        report,
                    })
                })
                .collect::<Result<_, _>>()?,
            OutputFormat::Json if self.pretty => vec![serde_json::to_string_pretty(result)?],
            OutputFormat::Json => vec![serde_json::to_string(result)?],
        };
        Ok(lines)
    }
}

impl ResultOutput for JsonOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, result: &AnalysisResult) -> Result<()> {
        let lines = self.render(result)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        for line in lines {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}
