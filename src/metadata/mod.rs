//! Project configuration from `release.toml`.

use crate::bundler::{BundleSettings, DataFile, PackageSettings, SettingsBuilder};
use crate::error::{CliError, ReleaseError, Result};
use crate::version::{Version, VersionStore, VersionStrategy, VersionedFile};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "release.toml";

/// Complete `release.toml` contents.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfig {
    /// `[app]` section
    pub app: AppConfig,

    /// `[build]` section
    #[serde(default)]
    pub build: BuildConfig,

    /// `[version]` section
    #[serde(default)]
    pub version: VersionConfig,
}

/// Application identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Name used for the executable and archive names
    pub name: String,

    /// Human-readable name; defaults to `name`
    #[serde(default)]
    pub display_name: Option<String>,

    /// Entry point handed to the compiler
    #[serde(default = "default_entry_script")]
    pub entry_script: PathBuf,
}

fn default_entry_script() -> PathBuf {
    PathBuf::from("main.py")
}

/// Compiler inputs and output directories.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Compiler executable
    pub compiler: String,
    /// Compiler scratch directory
    pub build_dir: PathBuf,
    /// Compiler output directory
    pub dist_dir: PathBuf,
    /// Archive and manifest directory
    pub release_dir: PathBuf,
    /// Data files embedded by the compiler
    pub data_files: Vec<DataFile>,
    /// Modules the compiler must not omit
    pub hidden_imports: Vec<String>,
    /// Files shipped next to the artifact
    pub dist_files: Vec<PathBuf>,
    /// Bundle identifier for directory-bundle platforms
    pub bundle_identifier: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        let bundle = BundleSettings::default();
        Self {
            compiler: bundle.compiler,
            build_dir: PathBuf::from("build"),
            dist_dir: PathBuf::from("dist"),
            release_dir: PathBuf::from("releases"),
            data_files: bundle.data_files,
            hidden_imports: bundle.hidden_imports,
            dist_files: bundle.dist_files,
            bundle_identifier: bundle.bundle_identifier,
        }
    }
}

/// Where the version lives and which files follow it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersionConfig {
    /// Source-of-truth file
    pub source: VersionedFile,
    /// Files rewritten on every bump, in order
    pub files: Vec<VersionedFile>,
    /// Changelog document
    pub changelog: PathBuf,
}

impl Default for VersionConfig {
    fn default() -> Self {
        let manifest = VersionedFile::new("pyproject.toml", VersionStrategy::ProjectManifest);
        Self {
            source: manifest.clone(),
            files: vec![manifest],
            changelog: PathBuf::from("CHANGELOG.md"),
        }
    }
}

impl ReleaseConfig {
    /// Display name, falling back to the app name.
    pub fn display_name(&self) -> &str {
        self.app.display_name.as_deref().unwrap_or(&self.app.name)
    }

    /// Version store for a project rooted at `root`.
    pub fn version_store(&self, root: &Path) -> VersionStore {
        VersionStore::new(root, self.version.source.clone(), self.version.files.clone())
    }

    /// Changelog location for a project rooted at `root`.
    pub fn changelog_path(&self, root: &Path) -> PathBuf {
        root.join(&self.version.changelog)
    }

    /// Settings builder pre-filled from this configuration.
    pub fn settings_builder(&self, root: &Path, version: Version) -> SettingsBuilder {
        SettingsBuilder::new()
            .project_root(root)
            .package_settings(PackageSettings {
                product_name: self.app.name.clone(),
                display_name: self.display_name().to_string(),
                version,
            })
            .bundle_settings(BundleSettings {
                compiler: self.build.compiler.clone(),
                entry_script: self.app.entry_script.clone(),
                data_files: self.build.data_files.clone(),
                hidden_imports: self.build.hidden_imports.clone(),
                dist_files: self.build.dist_files.clone(),
                bundle_identifier: self.build.bundle_identifier.clone(),
            })
            .build_dir(&self.build.build_dir)
            .dist_dir(&self.build.dist_dir)
            .release_dir(&self.build.release_dir)
    }
}

/// Parses configuration text.
pub fn parse_config(text: &str) -> Result<ReleaseConfig> {
    let config: ReleaseConfig = toml::from_str(text)?;

    if config.app.name.trim().is_empty() {
        return Err(ReleaseError::Cli(CliError::InvalidArguments {
            reason: "app.name in release.toml must not be empty".to_string(),
        }));
    }

    Ok(config)
}

/// Reads and parses `release.toml`.
pub fn load_config(path: &Path) -> Result<ReleaseConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ReleaseError::Cli(CliError::ExecutionFailed {
            command: "read_release_toml".to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })
    })?;

    parse_config(&text)
}
