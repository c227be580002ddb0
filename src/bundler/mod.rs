//! Build, package and checksum releases.
//!
//! - [`platform`] - per-platform packaging profiles
//! - [`settings`] - run configuration
//! - [`builder`] - the pipeline and its stages
//! - [`utils`] - filesystem and archive helpers

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::{
    ArtifactHasher, BuildPipeline, BuildReport, ChecksumManifest, CommandOutput, CommandRunner,
    CompilerInvocation, ManifestEntry, PipelineFailure, ReleasePackager, Sha256Hasher, Stage,
    SystemCommandRunner,
};
pub use error::{Error, Result};
pub use platform::{ArchiveFormat, BundleKind, PlatformId, PlatformProfile};
pub use settings::{Arch, BundleSettings, DataFile, PackageSettings, Settings, SettingsBuilder};
