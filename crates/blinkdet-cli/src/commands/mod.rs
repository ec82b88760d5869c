//! CLI command definitions and handlers.

pub mod classify;
pub mod config;

use clap::{Parser, Subcommand};

/// Blinkdet - classify eyes in still images as open or closed
#[derive(Parser)]
#[command(name = "blinkdet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared classify arguments (image, eyes, thresholds).
    #[command(flatten)]
    pub classify: classify::ClassifyArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Classify eyes in an image
    Classify(classify::ClassifyArgs),
    /// Inspect configuration
    Config(config::ConfigArgs),
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every classified eye is open.
    Success = 0,
    /// At least one eye is closed.
    BlinkDetected = 1,
    /// The run failed.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
