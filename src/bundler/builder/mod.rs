//! Release build orchestration.
//!
//! This module provides the [`BuildPipeline`] that turns an application
//! source tree into a named, checksummed release archive.
//!
//! # Overview
//!
//! The pipeline:
//! 1. Cleans previous compiler output and ensures the release directory exists
//! 2. Runs the artifact compiler with platform-specific arguments
//! 3. Stages the artifact plus distribution files and compresses them
//! 4. Regenerates the checksum manifest over every archive in the release directory
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA-256 digests and the checksum manifest
//! - [`compiler`] - Compiler argument building and process execution
//! - [`orchestrator`] - [`BuildPipeline`] and its stage model
//! - [`packager`] - Staging directory and archive assembly

pub mod checksum;
pub mod compiler;
pub mod orchestrator;
pub mod packager;

pub use checksum::{ArtifactHasher, ChecksumManifest, ManifestEntry, Sha256Hasher};
pub use compiler::{CommandOutput, CommandRunner, CompilerInvocation, SystemCommandRunner};
pub use orchestrator::{BuildPipeline, BuildReport, PipelineFailure, Stage};
pub use packager::ReleasePackager;
