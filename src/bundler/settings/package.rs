//! Product metadata.

use crate::version::Version;

/// Product metadata for one release.
///
/// # Examples
///
/// ```no_run
/// use release_bundler::bundler::PackageSettings;
/// use release_bundler::version::Version;
///
/// let settings = PackageSettings {
///     product_name: "RFTX_Tuning".into(),
///     display_name: "RFTX TUNING".into(),
///     version: Version::new(1, 0, 0),
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// Product name used for executables and archive names.
    ///
    /// Must not contain path separators.
    pub product_name: String,

    /// Human-readable name for the checksum manifest header.
    pub display_name: String,

    /// Version being released.
    pub version: Version,
}
