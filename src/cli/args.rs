//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap,
//! with validation and the runtime configuration derived from it.

use super::OutputManager;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Release tooling for a desktop application
#[derive(Parser, Debug)]
#[command(
    name = "release_bundler",
    version,
    styles = styles(),
    about = "Build, package, checksum and version desktop application releases",
    long_about = "Builds a platform executable with an external compiler, packages it into a
release archive, maintains a checksum manifest and keeps the project version in sync.

Usage:
  release_bundler build
  release_bundler build --platform linux --json
  release_bundler bump patch --yes
  release_bundler bump 2.0.0 --dry-run

Exit code 0 = the requested operation completed."
)]
pub struct Args {
    /// Project root directory
    #[arg(short = 'p', long, global = true, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Configuration file (defaults to <project>/release.toml)
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show detailed output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compile, package and checksum a release for one platform
    Build {
        /// Target platform: windows, macos, linux (defaults to the host)
        #[arg(long, value_name = "PLATFORM")]
        platform: Option<String>,

        /// Print the build report as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Regenerate the checksum manifest of the release directory
    Checksums,

    /// Bump the project version and propagate it to every version file
    Bump {
        /// major, minor, patch, or an explicit X.Y.Z version
        #[arg(value_name = "TARGET")]
        target: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Show what would change without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Changelog entry date (defaults to today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },

    /// Print the current project version
    Version,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.project.as_os_str().is_empty() {
            return Err("Project directory cannot be empty".to_string());
        }

        match &self.command {
            Command::Build {
                platform: Some(platform),
                ..
            } if platform.trim().is_empty() => Err("Platform cannot be empty".to_string()),
            Command::Bump { target, .. } if target.trim().is_empty() => {
                Err("Bump target cannot be empty".to_string())
            }
            _ => Ok(()),
        }
    }

    /// Whether stdout must carry machine-readable output only.
    pub fn wants_json(&self) -> bool {
        matches!(self.command, Command::Build { json: true, .. })
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        // JSON reports own stdout
        let quiet = args.quiet || args.wants_json();
        Self {
            output: OutputManager::new(args.verbose, quiet),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}

fn styles() -> clap::builder::Styles {
    use anstyle::{AnsiColor, Color, Style};

    clap::builder::Styles::styled()
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .error(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::White))))
}
