//! Builder for constructing Settings.

use super::{BundleSettings, PackageSettings, Settings};
use crate::bundler::error::{Context, Result};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Relative directories resolve against the project root at build time.
///
/// # See Also
///
/// - [`Settings`] - The built settings struct
#[derive(Default)]
pub struct SettingsBuilder {
    project_root: Option<PathBuf>,
    package_settings: Option<PackageSettings>,
    bundle_settings: BundleSettings,
    build_dir: Option<PathBuf>,
    dist_dir: Option<PathBuf>,
    release_dir: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project root.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets product metadata.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets compiler inputs and archive contents.
    ///
    /// Default: [`BundleSettings::default`]
    pub fn bundle_settings(mut self, settings: BundleSettings) -> Self {
        self.bundle_settings = settings;
        self
    }

    /// Sets the compiler scratch directory. Default: `build`
    pub fn build_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the compiler output directory. Default: `dist`
    pub fn dist_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dist_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the release output directory. Default: `releases`
    pub fn release_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.release_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `project_root` or `package_settings` is missing, or
    /// if the product name is empty or contains a path separator.
    pub fn build(self) -> Result<Settings> {
        let project_root = self.project_root.context("project_root is required")?;
        let package = self
            .package_settings
            .context("package_settings is required")?;

        if package.product_name.is_empty()
            || package.product_name.contains(['/', '\\'])
            || package.product_name == ".."
        {
            crate::bail!(
                "invalid product name `{}`: must be non-empty and contain no path separators",
                package.product_name
            );
        }

        let resolve = |dir: Option<PathBuf>, default: &str| {
            project_root.join(dir.unwrap_or_else(|| PathBuf::from(default)))
        };
        let build_dir = resolve(self.build_dir, "build");
        let dist_dir = resolve(self.dist_dir, "dist");
        let release_dir = resolve(self.release_dir, "releases");

        Ok(Settings::new(
            package,
            self.bundle_settings,
            project_root,
            build_dir,
            dist_dir,
            release_dir,
        ))
    }
}
