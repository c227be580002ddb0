//! Platform packaging profiles.
//!
//! A [`PlatformProfile`] is resolved once per run from a [`PlatformId`] and
//! fixes everything platform-dependent about the release:
//!
//! | platform | executable     | archive | label   | arch      | bundle    |
//! |----------|----------------|---------|---------|-----------|-----------|
//! | windows  | `{app}.exe`    | zip     | Windows | x64       | plain     |
//! | macos    | `{app}.app`    | tar.gz  | macOS   | Universal | directory |
//! | linux    | `{app}`        | tar.gz  | Linux   | x64       | plain     |

use crate::{
    bundler::{Error, Result, settings::Arch},
    version::Version,
};
use std::{fmt, str::FromStr};

/// Operating system a release is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
    /// Microsoft Windows
    Windows,
    /// Apple macOS
    #[serde(rename = "macos")]
    MacOs,
    /// Linux distributions
    Linux,
}

impl PlatformId {
    /// Detects the host platform.
    ///
    /// Fails with [`Error::UnsupportedPlatform`] on any other OS.
    pub fn detect() -> Result<Self> {
        std::env::consts::OS.parse()
    }

    /// Canonical lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
        }
    }
}

impl FromStr for PlatformId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "windows" => Ok(Self::Windows),
            "macos" | "darwin" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            _ => Err(Error::UnsupportedPlatform(s.to_string())),
        }
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compression format of the release archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ArchiveFormat {
    /// `.zip`
    Zip,
    /// `.tar.gz`
    TarGz,
}

impl ArchiveFormat {
    /// All formats, for archive discovery.
    pub const ALL: [ArchiveFormat; 2] = [ArchiveFormat::Zip, ArchiveFormat::TarGz];

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarGz => "tar.gz",
        }
    }
}

/// Shape of the compiler's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum BundleKind {
    /// A single executable file
    PlainBinary,
    /// A directory tree (e.g. a macOS `.app`) that must be copied recursively
    DirectoryBundle,
}

/// Packaging parameters for one platform. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformProfile {
    platform: PlatformId,
    product_name: String,
    executable_name: String,
    archive_format: ArchiveFormat,
    platform_label: &'static str,
    arch: Arch,
    bundle_kind: BundleKind,
    icon_file: &'static str,
    version_file: Option<&'static str>,
}

impl PlatformProfile {
    /// Resolves the profile for `platform`. Pure; touches no files.
    pub fn resolve(platform: PlatformId, product_name: &str) -> Self {
        let (executable_name, archive_format, platform_label, arch, bundle_kind, icon_file, version_file) =
            match platform {
                PlatformId::Windows => (
                    format!("{product_name}.exe"),
                    ArchiveFormat::Zip,
                    "Windows",
                    Arch::X86_64,
                    BundleKind::PlainBinary,
                    "icon.ico",
                    Some("version_info.txt"),
                ),
                PlatformId::MacOs => (
                    format!("{product_name}.app"),
                    ArchiveFormat::TarGz,
                    "macOS",
                    Arch::Universal,
                    BundleKind::DirectoryBundle,
                    "icon.icns",
                    None,
                ),
                PlatformId::Linux => (
                    product_name.to_string(),
                    ArchiveFormat::TarGz,
                    "Linux",
                    Arch::X86_64,
                    BundleKind::PlainBinary,
                    "icon.png",
                    None,
                ),
            };

        Self {
            platform,
            product_name: product_name.to_string(),
            executable_name,
            archive_format,
            platform_label,
            arch,
            bundle_kind,
            icon_file,
            version_file,
        }
    }

    /// Parses `identifier` and resolves its profile.
    pub fn for_identifier(identifier: &str, product_name: &str) -> Result<Self> {
        let platform = identifier.parse()?;
        Ok(Self::resolve(platform, product_name))
    }

    /// Platform this profile targets.
    pub fn platform(&self) -> PlatformId {
        self.platform
    }

    /// File or directory name the compiler produces in the dist directory.
    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    /// Archive compression format.
    pub fn archive_format(&self) -> ArchiveFormat {
        self.archive_format
    }

    /// Platform label used in archive names.
    pub fn platform_label(&self) -> &'static str {
        self.platform_label
    }

    /// Target architecture.
    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// Whether the artifact is a file or a directory tree.
    pub fn bundle_kind(&self) -> BundleKind {
        self.bundle_kind
    }

    /// Icon file the compiler uses when it exists.
    pub fn icon_file(&self) -> &'static str {
        self.icon_file
    }

    /// Version resource file the compiler uses when it exists.
    pub fn version_file(&self) -> Option<&'static str> {
        self.version_file
    }

    /// Data-file separator in compiler arguments (`src{sep}dest`).
    pub fn path_separator(&self) -> char {
        match self.platform {
            PlatformId::Windows => ';',
            PlatformId::MacOs | PlatformId::Linux => ':',
        }
    }

    /// `{product}-v{version}-{label}-{arch}`; also the staging directory name.
    pub fn archive_name(&self, version: &Version) -> String {
        format!(
            "{}-v{}-{}-{}",
            self.product_name,
            version,
            self.platform_label,
            self.arch.archive_label()
        )
    }

    /// Archive name plus extension.
    pub fn archive_file_name(&self, version: &Version) -> String {
        format!(
            "{}.{}",
            self.archive_name(version),
            self.archive_format.extension()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_names_per_platform() {
        let version = Version::new(0, 0, 1);
        let expected = [
            (PlatformId::Windows, "RFTX_Tuning-v0.0.1-Windows-x64.zip"),
            (PlatformId::MacOs, "RFTX_Tuning-v0.0.1-macOS-Universal.tar.gz"),
            (PlatformId::Linux, "RFTX_Tuning-v0.0.1-Linux-x64.tar.gz"),
        ];
        for (platform, name) in expected {
            let profile = PlatformProfile::resolve(platform, "RFTX_Tuning");
            assert_eq!(profile.archive_file_name(&version), name);
        }
    }

    #[test]
    fn identifiers_are_case_insensitive_with_darwin_alias() {
        assert_eq!("Darwin".parse::<PlatformId>().ok(), Some(PlatformId::MacOs));
        assert_eq!("WINDOWS".parse::<PlatformId>().ok(), Some(PlatformId::Windows));
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let err = PlatformProfile::for_identifier("solaris", "App").unwrap_err();
        assert!(matches!(err, Error::UnsupportedPlatform(ref id) if id == "solaris"));
    }

    #[test]
    fn macos_is_a_directory_bundle() {
        let profile = PlatformProfile::resolve(PlatformId::MacOs, "App");
        assert_eq!(profile.bundle_kind(), BundleKind::DirectoryBundle);
        assert_eq!(profile.executable_name(), "App.app");
        assert_eq!(profile.arch().compiler_target(), Some("universal2"));
    }
}
