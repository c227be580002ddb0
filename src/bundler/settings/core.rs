//! Core Settings struct and implementations.

use super::{BundleSettings, PackageSettings};
use crate::version::Version;
use std::path::{Path, PathBuf};

/// Main settings for one pipeline run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). All directory
/// paths are absolute.
///
/// # Examples
///
/// ```no_run
/// use release_bundler::bundler::{PackageSettings, SettingsBuilder};
/// use release_bundler::version::Version;
///
/// # fn example() -> release_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root("/work/app")
///     .package_settings(PackageSettings {
///         product_name: "MyApp".into(),
///         display_name: "My App".into(),
///         version: Version::new(1, 0, 0),
///     })
///     .build()?;
/// assert!(settings.release_dir().ends_with("releases"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Product metadata.
    package: PackageSettings,

    /// Compiler inputs and archive contents.
    bundle_settings: BundleSettings,

    /// Directory the compiler runs in; relative inputs resolve against it.
    project_root: PathBuf,

    /// Compiler scratch directory, wiped on every run.
    build_dir: PathBuf,

    /// Compiler output directory, wiped on every run.
    dist_dir: PathBuf,

    /// Where archives and the checksum manifest live. Never wiped.
    release_dir: PathBuf,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the display name, falling back to the product name.
    pub fn display_name(&self) -> &str {
        if self.package.display_name.is_empty() {
            &self.package.product_name
        } else {
            &self.package.display_name
        }
    }

    /// Returns the version being released.
    pub fn version(&self) -> &Version {
        &self.package.version
    }

    /// Returns the project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Returns the compiler scratch directory.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Returns the compiler output directory.
    pub fn dist_dir(&self) -> &Path {
        &self.dist_dir
    }

    /// Returns the release output directory.
    pub fn release_dir(&self) -> &Path {
        &self.release_dir
    }

    /// Returns the bundle settings.
    pub fn bundle_settings(&self) -> &BundleSettings {
        &self.bundle_settings
    }

    /// Resolves a project-relative path.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.project_root.join(relative)
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        bundle_settings: BundleSettings,
        project_root: PathBuf,
        build_dir: PathBuf,
        dist_dir: PathBuf,
        release_dir: PathBuf,
    ) -> Self {
        Self {
            package,
            bundle_settings,
            project_root,
            build_dir,
            dist_dir,
            release_dir,
        }
    }
}
