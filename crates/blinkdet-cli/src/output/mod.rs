//! Output formatting for CLI.

mod json;

use clap::ValueEnum;

pub use json::JsonOutput;

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per eye)
    #[default]
    Jsonl,
    /// Single JSON object per image
    Json,
}

impl OutputFormat {
    /// Parses a config-file format name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "json" => Some(Self::Json),
            "jsonl" => Some(Self::Jsonl),
            _ => None,
        }
    }
}
