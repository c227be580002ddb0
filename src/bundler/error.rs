//! Error types for build and packaging operations.
//!
//! Every failure the pipeline can hit maps to one [`Error`] variant. The
//! [`ErrorExt`] and [`Context`] helpers attach paths and descriptions at the
//! call site so the operator sees what was being done when it failed.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, packaging or checksumming a release.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem operation failed on a specific path
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path the operation touched
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        error: io::Error,
    },

    /// Untagged I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// An external command could not be spawned
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Program name
        command: String,
        /// Spawn error
        error: io::Error,
    },

    /// The platform identifier has no packaging profile
    #[error("unsupported platform `{0}` (expected one of: windows, macos, linux)")]
    UnsupportedPlatform(String),

    /// The artifact compiler ran and reported failure
    #[error("artifact compiler `{program}` failed ({status})\n{diagnostics}")]
    Compile {
        /// Compiler program
        program: String,
        /// Exit status description
        status: String,
        /// Captured compiler output
        diagnostics: String,
    },

    /// The compiler finished but its output is not where it should be
    #[error("compiled artifact not found: {}", .0.display())]
    ArtifactNotFound(PathBuf),

    /// Staging or compressing the release archive failed
    #[error("packaging failed: {0}")]
    Packaging(String),

    /// An archive could not be digested
    #[error("checksum failed for {}: {reason}", path.display())]
    Checksum {
        /// Archive path
        path: PathBuf,
        /// Why the digest could not be computed
        reason: String,
    },

    /// Directory traversal error
    #[error("walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix error during staging
    #[error("path error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// ZIP writer error
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Info.plist read or write error
    #[error("plist error: {0}")]
    Plist(#[from] plist::Error),

    /// Glob pattern error during archive discovery
    #[error("pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Anything else
    #[error("{0}")]
    GenericError(String),
}

/// Attach filesystem context to I/O results.
pub trait ErrorExt<T> {
    /// Wraps the I/O error with a description and the path involved.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Turn missing options into [`Error::GenericError`] with a message.
pub trait Context<T> {
    /// Attaches a message.
    fn context<C: Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

/// Return early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
