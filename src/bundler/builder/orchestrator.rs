//! Release pipeline orchestration.
//!
//! This module provides the [`BuildPipeline`] that sequences the release
//! stages and turns the first failure into a terminal [`PipelineFailure`].

use super::{
    checksum::{ArtifactHasher, ChecksumManifest, ManifestEntry, Sha256Hasher},
    compiler::{CommandRunner, CompilerInvocation, SystemCommandRunner},
    packager::ReleasePackager,
};
use crate::bundler::{
    Error, Result, Settings,
    platform::{PlatformId, PlatformProfile},
    utils::fs,
};
use std::{fmt, path::PathBuf};

/// A pipeline stage. Stages run strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Remove previous build output, ensure the release directory exists
    Cleaning,
    /// Run the artifact compiler
    Compiling,
    /// Stage and compress the release archive
    Packaging,
    /// Regenerate the checksum manifest
    Checksumming,
}

impl Stage {
    /// Operator-facing progress message.
    pub fn description(self) -> &'static str {
        match self {
            Stage::Cleaning => "Cleaning build directories...",
            Stage::Compiling => "Building executable...",
            Stage::Packaging => "Packaging release...",
            Stage::Checksumming => "Generating checksums...",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Cleaning => "cleaning",
            Stage::Compiling => "compiling",
            Stage::Packaging => "packaging",
            Stage::Checksumming => "checksumming",
        })
    }
}

/// The stage that failed and why. Terminal: later stages never ran.
#[derive(Debug, thiserror::Error)]
#[error("{stage} stage failed: {error}")]
pub struct PipelineFailure {
    /// Stage that was running
    pub stage: Stage,
    /// Underlying cause
    #[source]
    pub error: Error,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildReport {
    /// Product name
    pub product_name: String,
    /// Released version
    pub version: String,
    /// Target platform
    pub platform: PlatformId,
    /// Archive produced by this run
    pub archive: PathBuf,
    /// Checksum manifest path
    pub manifest: PathBuf,
    /// Every archive in the release directory with its digest
    pub checksums: Vec<ManifestEntry>,
}

/// Sequences clean → compile → package → checksum for one platform.
///
/// The compiler process and the archive hasher are injected so the pipeline
/// can run without a real toolchain.
///
/// # Examples
///
/// ```no_run
/// use release_bundler::bundler::{BuildPipeline, PlatformId, PlatformProfile, Settings};
///
/// # async fn example(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
/// let profile = PlatformProfile::resolve(PlatformId::detect()?, settings.product_name());
/// let report = BuildPipeline::new(settings, profile).run().await?;
/// println!("Created {}", report.archive.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BuildPipeline<R = SystemCommandRunner, H = Sha256Hasher> {
    settings: Settings,
    profile: PlatformProfile,
    runner: R,
    hasher: H,
}

impl BuildPipeline {
    /// Creates a pipeline that runs the real compiler and hashes with SHA-256.
    pub fn new(settings: Settings, profile: PlatformProfile) -> Self {
        Self::with_collaborators(settings, profile, SystemCommandRunner, Sha256Hasher)
    }
}

impl<R: CommandRunner, H: ArtifactHasher> BuildPipeline<R, H> {
    /// Creates a pipeline with a custom command runner and hasher.
    pub fn with_collaborators(settings: Settings, profile: PlatformProfile, runner: R, hasher: H) -> Self {
        Self {
            settings,
            profile,
            runner,
            hasher,
        }
    }

    /// Runs every stage.
    pub async fn run(self) -> std::result::Result<BuildReport, PipelineFailure> {
        self.run_with(|_| {}).await
    }

    /// Runs every stage, calling `on_stage` as each one starts.
    ///
    /// The first failing stage aborts the run. Nothing is retried and the
    /// staging directory of a failed packaging stage is kept.
    pub async fn run_with<F: FnMut(Stage)>(
        self,
        mut on_stage: F,
    ) -> std::result::Result<BuildReport, PipelineFailure> {
        let mut enter = |stage: Stage| {
            log::info!("{}", stage.description());
            on_stage(stage);
            move |error: Error| {
                log::error!("{stage} stage failed: {error}");
                PipelineFailure { stage, error }
            }
        };

        let fail = enter(Stage::Cleaning);
        self.clean().await.map_err(fail)?;

        let fail = enter(Stage::Compiling);
        self.compile().await.map_err(fail)?;

        let fail = enter(Stage::Packaging);
        let archive = ReleasePackager::new(&self.settings, &self.profile)
            .package()
            .await
            .map_err(fail)?;

        let fail = enter(Stage::Checksumming);
        let (manifest, checksums) = self.checksum().await.map_err(fail)?;

        Ok(BuildReport {
            product_name: self.settings.product_name().to_string(),
            version: self.settings.version().to_string(),
            platform: self.profile.platform(),
            archive,
            manifest,
            checksums,
        })
    }

    async fn clean(&self) -> Result<()> {
        for dir in [self.settings.build_dir(), self.settings.dist_dir()] {
            if fs::remove_dir_all(dir).await? {
                log::info!("Removed {}", dir.display());
            } else {
                log::debug!("{} absent, nothing to clean", dir.display());
            }
        }

        fs::create_dir_all(self.settings.release_dir(), false).await
    }

    async fn compile(&self) -> Result<()> {
        let invocation = CompilerInvocation::new(&self.settings, &self.profile);
        let output = invocation
            .execute(&self.runner, self.settings.project_root())
            .await?;
        log::debug!("Compiler output:\n{}", output.stdout);
        Ok(())
    }

    async fn checksum(&self) -> Result<(PathBuf, Vec<ManifestEntry>)> {
        let release_dir = self.settings.release_dir();
        let manifest = ChecksumManifest::generate(
            release_dir,
            self.settings.display_name(),
            self.settings.version(),
            &self.hasher,
        )
        .await?;
        let path = manifest.write(release_dir).await?;
        Ok((path, manifest.entries))
    }
}
