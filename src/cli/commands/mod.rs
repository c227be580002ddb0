//! Command execution functions for release operations.
//!
//! Each command receives the parsed [`Args`](super::Args), the derived
//! [`RuntimeConfig`] and the loaded [`ProjectContext`].

mod build;
mod bump;
mod checksums;
mod version;

pub use build::execute_build;
pub use bump::execute_bump;
pub use checksums::execute_checksums;
pub use version::execute_version;

use super::{Args, RuntimeConfig};
use crate::{
    error::{CliError, ReleaseError, Result},
    metadata::{self, CONFIG_FILE_NAME, ReleaseConfig},
};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Absolute project root plus its parsed configuration.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    root: PathBuf,
    config: ReleaseConfig,
}

impl ProjectContext {
    /// Resolves the project root and loads its configuration.
    pub fn load(args: &Args) -> Result<Self> {
        let root = args
            .project
            .absolutize()
            .map_err(|e| {
                ReleaseError::Cli(CliError::InvalidArguments {
                    reason: format!("Cannot resolve project path {}: {}", args.project.display(), e),
                })
            })?
            .into_owned();

        if !root.is_dir() {
            return Err(ReleaseError::Cli(CliError::InvalidArguments {
                reason: format!("Project directory {} does not exist", root.display()),
            }));
        }

        let config_path = match &args.config {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => root.join(path),
            None => root.join(CONFIG_FILE_NAME),
        };
        log::debug!("Loading configuration from {}", config_path.display());

        let config = metadata::load_config(&config_path)?;
        Ok(Self { root, config })
    }

    /// Absolute project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parsed `release.toml`.
    pub fn config(&self) -> &ReleaseConfig {
        &self.config
    }
}

/// Dispatches the parsed command.
pub async fn execute(args: &Args, runtime: &RuntimeConfig) -> Result<i32> {
    let project = ProjectContext::load(args)?;

    match &args.command {
        super::args::Command::Build { platform, json } => {
            execute_build(&project, runtime, platform.as_deref(), *json).await
        }
        super::args::Command::Checksums => execute_checksums(&project, runtime).await,
        super::args::Command::Bump {
            target,
            yes,
            dry_run,
            date,
        } => execute_bump(&project, runtime, target, *yes, *dry_run, *date).await,
        super::args::Command::Version => execute_version(&project, runtime).await,
    }
}
