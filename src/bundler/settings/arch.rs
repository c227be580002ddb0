//! CPU architecture labels for release archives.

/// Architecture a release build targets.
///
/// Each platform profile builds for one fixed architecture; the label ends up
/// in the archive name and, for universal builds, in the compiler arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// x86_64 / AMD64
    X86_64,
    /// macOS universal binary (x86_64 + AArch64)
    Universal,
}

impl Arch {
    /// Suffix used in archive names (`x64`, `Universal`).
    pub fn archive_label(self) -> &'static str {
        match self {
            Arch::X86_64 => "x64",
            Arch::Universal => "Universal",
        }
    }

    /// Value for the compiler's `--target-arch` option, if one is needed.
    pub fn compiler_target(self) -> Option<&'static str> {
        match self {
            Arch::Universal => Some("universal2"),
            Arch::X86_64 => None,
        }
    }
}
