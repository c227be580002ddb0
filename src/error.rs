//! Top-level error types for release operations.
//!
//! Every library error converts into [`ReleaseError`], which carries the
//! recovery hints printed by the binary after the error itself.

use crate::{bundler, bundler::builder::Stage, version};
use thiserror::Error;

/// Result type alias for release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] bundler::Error),

    /// Version management errors
    #[error("Version error: {0}")]
    Version(#[from] version::Error),

    /// A release pipeline stage failed
    #[error("Build failed: {0}")]
    Pipeline(#[from] bundler::PipelineFailure),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Cli(CliError::ExecutionFailed { command, .. })
                if command == "read_release_toml" =>
            {
                vec![
                    "Create a release.toml in the project root with at least an [app] name".to_string(),
                    "Or point to it with --config <PATH>".to_string(),
                ]
            }
            ReleaseError::Toml(_) => vec![
                "Check release.toml syntax and field names".to_string(),
                "Version file kinds are: project-manifest, script-constant, display-tag".to_string(),
            ],
            ReleaseError::Version(version::Error::NotFound { path }) => vec![format!(
                "Add a version field to {} or fix [version].source in release.toml",
                path.display()
            )],
            ReleaseError::Version(version::Error::InvalidBumpKind(_)) => {
                vec!["Use major, minor, patch or an explicit X.Y.Z version".to_string()]
            }
            ReleaseError::Version(version::Error::Overflow { .. }) => {
                vec!["Set the next version explicitly, e.g. `bump 1.0.0`".to_string()]
            }
            ReleaseError::Version(version::Error::PartialWrite { written, .. }) => {
                let mut hints = vec![
                    "Some files were updated before the failure; the project now has mixed versions"
                        .to_string(),
                ];
                hints.extend(
                    written
                        .iter()
                        .map(|p| format!("Already rewritten: {}", p.display())),
                );
                hints.push("Restore them from version control and retry".to_string());
                hints
            }
            ReleaseError::Bundler(bundler::Error::UnsupportedPlatform(_)) => {
                vec!["Supported platforms: windows, macos, linux".to_string()]
            }
            ReleaseError::Pipeline(failure) => match failure.stage {
                Stage::Compiling => vec![
                    "Check that the compiler is installed and on PATH".to_string(),
                    "Review the compiler diagnostics above".to_string(),
                ],
                Stage::Packaging => vec![
                    "Check that the compiler produced the expected artifact in the dist directory"
                        .to_string(),
                    "Any leftover staging directory in the release directory can be deleted".to_string(),
                ],
                Stage::Cleaning | Stage::Checksumming => {
                    vec!["Check permissions on the build, dist and release directories".to_string()]
                }
            },
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
