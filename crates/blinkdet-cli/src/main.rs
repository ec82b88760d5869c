//! Blinkdet CLI - open/closed eye classification for still images.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::classify::{self, ClassifyArgs};
use commands::{Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let app_config = AppConfig::load();

    let exit_code = match cli.command {
        Some(Commands::Classify(args)) => run_classify(args, &app_config),
        Some(Commands::Config(ref args)) => match commands::config::run(args, &app_config) {
            Ok(()) => ExitCode::Success,
            Err(e) => {
                eprintln!("error: {e:#}");
                ExitCode::Error
            }
        },
        None => {
            // Default behavior: run classify with flattened args
            if cli.classify.image.is_none() {
                eprintln!("error: No image specified. Use --help for usage information.");
                return ExitCode::Error.into();
            }
            run_classify(cli.classify, &app_config)
        }
    };

    exit_code.into()
}

fn run_classify(args: ClassifyArgs, config: &AppConfig) -> ExitCode {
    let args = ClassifyArgs::with_config(args, config);
    match classify::run(&args) {
        Ok(result) => result.exit_code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    }
}
