//! Release tooling for desktop applications.
//!
//! This library provides:
//! - A build pipeline that compiles, packages and checksums one platform release
//! - Version synchronization across every file that carries the version
//! - Changelog maintenance for version bumps
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod changelog;
pub mod cli;
pub mod error;
pub mod metadata;
pub mod version;

// Re-export commonly used types
pub use error::{CliError, ReleaseError, Result};
