//! Release archive assembly.

use crate::{
    bundler::{
        Error, Result, Settings,
        error::Context,
        platform::{BundleKind, PlatformProfile},
        utils::{archive, fs},
    },
    version::Version,
};
use std::path::{Path, PathBuf};

/// Info.plist keys that carry the release version.
const PLIST_VERSION_KEYS: [&str; 2] = ["CFBundleShortVersionString", "CFBundleVersion"];

/// Stages the compiled artifact with its distribution files and compresses
/// the result into the platform's archive format.
#[derive(Debug)]
pub struct ReleasePackager<'a> {
    settings: &'a Settings,
    profile: &'a PlatformProfile,
}

impl<'a> ReleasePackager<'a> {
    /// Creates a packager for one run.
    pub fn new(settings: &'a Settings, profile: &'a PlatformProfile) -> Self {
        Self { settings, profile }
    }

    /// Where the compiler is expected to leave its output.
    pub fn artifact_path(&self) -> PathBuf {
        self.settings
            .dist_dir()
            .join(self.profile.executable_name())
    }

    /// Staging directory for this release.
    pub fn staging_dir(&self) -> PathBuf {
        self.settings
            .release_dir()
            .join(self.profile.archive_name(self.settings.version()))
    }

    /// Final archive path.
    pub fn archive_path(&self) -> PathBuf {
        self.settings
            .release_dir()
            .join(self.profile.archive_file_name(self.settings.version()))
    }

    /// Builds the archive and returns its path.
    ///
    /// # Process
    ///
    /// 1. Verify the compiler output exists
    /// 2. Recreate the staging directory
    /// 3. Copy the artifact (recursively for directory bundles)
    /// 4. Stamp the release version into a directory bundle's Info.plist
    /// 5. Copy distribution files that exist
    /// 6. Compress the staging directory
    /// 7. Remove the staging directory
    ///
    /// On failure the staging directory is left in place for inspection.
    pub async fn package(&self) -> Result<PathBuf> {
        let artifact = self.artifact_path();
        if !artifact.exists() {
            return Err(Error::ArtifactNotFound(artifact));
        }

        let archive_name = self.profile.archive_name(self.settings.version());
        let staging = self.staging_dir();
        log::info!("Staging {} in {}", archive_name, staging.display());

        fs::create_dir_all(&staging, true)
            .await
            .map_err(|e| packaging("creating staging directory", e))?;

        let staged_artifact = staging.join(self.profile.executable_name());
        let staged = match self.profile.bundle_kind() {
            BundleKind::DirectoryBundle => fs::copy_dir(&artifact, &staged_artifact).await,
            BundleKind::PlainBinary => fs::copy_file(&artifact, &staged_artifact).await,
        };
        staged.map_err(|e| packaging("staging artifact", e))?;

        if self.profile.bundle_kind() == BundleKind::DirectoryBundle {
            let stamped = stamp_info_plist(&staged_artifact, self.settings.version())
                .await
                .map_err(|e| packaging("stamping Info.plist", e))?;
            if !stamped {
                log::warn!(
                    "No Contents/Info.plist in {}, version not stamped",
                    staged_artifact.display()
                );
            }
        }

        for file in &self.settings.bundle_settings().dist_files {
            let source = self.settings.resolve(file);
            if !source.is_file() {
                log::warn!("Distribution file {} not found, skipping", file.display());
                continue;
            }
            let Some(name) = file.file_name() else {
                continue;
            };
            fs::copy_file(&source, &staging.join(name))
                .await
                .map_err(|e| packaging("staging distribution file", e))?;
        }

        let archive_path = self.archive_path();
        log::info!("Creating archive: {}", archive_path.display());
        archive::create_archive(
            self.profile.archive_format(),
            &staging,
            &archive_name,
            &archive_path,
        )
        .await
        .map_err(|e| packaging("compressing release", e))?;

        fs::remove_dir_all(&staging)
            .await
            .map_err(|e| packaging("removing staging directory", e))?;

        log::info!("Release package created: {}", archive_path.display());
        Ok(archive_path)
    }
}

/// Sets the bundle version keys in `bundle/Contents/Info.plist`.
///
/// Returns `false` when the bundle has no Info.plist. Other keys are kept;
/// the file is rewritten in XML form.
pub async fn stamp_info_plist(bundle: &Path, version: &Version) -> Result<bool> {
    let path = bundle.join("Contents").join("Info.plist");
    if !path.is_file() {
        return Ok(false);
    }
    let version = version.to_string();

    tokio::task::spawn_blocking(move || -> Result<bool> {
        let mut info = plist::Value::from_file(&path)?;
        let dict = info
            .as_dictionary_mut()
            .context(format!("{} is not a dictionary", path.display()))?;
        for key in PLIST_VERSION_KEYS {
            dict.insert(key.to_string(), plist::Value::String(version.clone()));
        }
        info.to_file_xml(&path)?;
        log::debug!("Stamped version {version} into {}", path.display());
        Ok(true)
    })
    .await
    .map_err(|e| Error::GenericError(format!("Info.plist task panicked: {e}")))?
}

fn packaging(context: &str, error: Error) -> Error {
    Error::Packaging(format!("{context}: {error}"))
}
