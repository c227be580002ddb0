//! Command line interface for the release bundler.
//!
//! This module provides the CLI for release operations,
//! with argument parsing, command execution, and user feedback.

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, RuntimeConfig};
pub use output::OutputManager;

use crate::error::{CliError, ReleaseError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    run_with_args(Args::parse_args()).await
}

/// Executes already-parsed arguments.
pub async fn run_with_args(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| ReleaseError::Cli(CliError::InvalidArguments { reason }))?;

    let runtime = RuntimeConfig::from(&args);
    commands::execute(&args, &runtime).await
}
