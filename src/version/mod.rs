//! Semantic version model and version synchronization.
//!
//! [`Version`] is a strict `MAJOR.MINOR.PATCH` triple. [`VersionStore`] reads
//! it from the project's source-of-truth file and rewrites the version token
//! in every registered [`VersionedFile`].

mod store;
mod strategy;

pub use store::{FileUpdate, PropagationReport, VersionStore};
pub use strategy::{VersionStrategy, VersionedFile};

use std::{fmt, io, path::PathBuf, str::FromStr};
use thiserror::Error;

/// Result type alias for version operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading, bumping or writing versions.
#[derive(Debug, Error)]
pub enum Error {
    /// A required file does not exist
    #[error("{} not found", path.display())]
    NotFound {
        /// Missing file
        path: PathBuf,
    },

    /// A version token is missing or malformed
    #[error("invalid version format in {subject}: {reason}")]
    Format {
        /// Literal or file the token came from
        subject: String,
        /// What was wrong with it
        reason: String,
    },

    /// The bump directive is not one of major, minor, patch
    #[error("invalid bump kind `{0}`: use 'major', 'minor', or 'patch'")]
    InvalidBumpKind(String),

    /// The bumped component does not fit in a `u64`
    #[error("cannot bump {kind} of {version}: component overflows")]
    Overflow {
        /// Version being bumped
        version: Version,
        /// Requested bump
        kind: BumpKind,
    },

    /// Reading or writing a file failed
    #[error("{}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Some registry files were rewritten before a later write failed
    #[error(
        "failed writing {}: {source} (already updated: {}); re-run or reconcile manually",
        failed.display(),
        display_paths(written)
    )]
    PartialWrite {
        /// Files that already carry the new version
        written: Vec<PathBuf>,
        /// File whose write failed
        failed: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "none".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A `MAJOR.MINOR.PATCH` version.
///
/// Ordering is lexicographic over the three components. Pre-release and build
/// suffixes are not part of the grammar, and neither are leading zeros, so
/// `parse(v.to_string()) == v` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Version {
    /// Incremented for incompatible releases
    pub major: u64,
    /// Incremented for compatible feature releases
    pub minor: u64,
    /// Incremented for fixes
    pub patch: u64,
}

impl Version {
    /// Creates a version from its components.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses a literal such as `"1.2.3"`.
    pub fn parse(literal: &str) -> Result<Self> {
        let format_error = |reason: String| Error::Format {
            subject: format!("`{literal}`"),
            reason,
        };

        let parsed = semver::Version::parse(literal).map_err(|e| format_error(e.to_string()))?;
        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(format_error(
                "pre-release and build metadata are not supported".to_string(),
            ));
        }

        Ok(Self::new(parsed.major, parsed.minor, parsed.patch))
    }

    /// Returns the version with `kind` incremented and lower components reset.
    ///
    /// Fails with [`Error::Overflow`] when the component is already `u64::MAX`.
    pub fn bump(self, kind: BumpKind) -> Result<Self> {
        let next = |component: u64| {
            component.checked_add(1).ok_or(Error::Overflow {
                version: self,
                kind,
            })
        };
        Ok(match kind {
            BumpKind::Major => Self::new(next(self.major)?, 0, 0),
            BumpKind::Minor => Self::new(self.major, next(self.minor)?, 0),
            BumpKind::Patch => Self::new(self.major, self.minor, next(self.patch)?),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Which component a bump increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    /// `X.0.0`
    Major,
    /// `x.Y.0`
    Minor,
    /// `x.y.Z`
    Patch,
}

impl BumpKind {
    /// Lowercase directive name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        }
    }
}

impl FromStr for BumpKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            _ => Err(Error::InvalidBumpKind(s.to_string())),
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the operator asked for: a component bump or an explicit version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpRequest {
    /// Increment a component of the current version
    Bump(BumpKind),
    /// Jump straight to this version
    Explicit(Version),
}

impl BumpRequest {
    /// Label recorded for explicit versions.
    pub const MANUAL_LABEL: &'static str = "manual";

    /// Interprets a command-line directive.
    ///
    /// `major`, `minor` and `patch` (any case) are bumps; anything else must
    /// be a valid version literal.
    pub fn parse(directive: &str) -> Result<Self> {
        match directive.parse::<BumpKind>() {
            Ok(kind) => Ok(Self::Bump(kind)),
            Err(_) => VersionStore::explicit_version(directive).map(Self::Explicit),
        }
    }

    /// Computes the target version from the current one.
    pub fn resolve(&self, current: Version) -> Result<Version> {
        match self {
            Self::Bump(kind) => current.bump(*kind),
            Self::Explicit(version) => Ok(*version),
        }
    }

    /// `major`, `minor`, `patch` or `manual`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bump(kind) => kind.as_str(),
            Self::Explicit(_) => Self::MANUAL_LABEL,
        }
    }

    /// Explicit versions are set by hand and get no changelog entry.
    pub fn writes_changelog(&self) -> bool {
        matches!(self, Self::Bump(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_partial_and_padded_versions() {
        for bad in ["1.2", "1.2.3.4", "01.2.3", "1.2.3-beta", "v1.2.3", " 1.2.3", "-1.2.3", ""] {
            assert!(
                matches!(Version::parse(bad), Err(Error::Format { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn format_round_trips_parse() {
        for literal in [
            "0.0.0",
            "0.0.1",
            "1.2.3",
            "10.20.30",
            "1.0.100",
            "999.1000.65535",
            "18446744073709551615.0.0",
        ] {
            let version = Version::parse(literal).expect("valid literal");
            assert_eq!(version.to_string(), literal);
            assert_eq!(Version::parse(&version.to_string()).ok(), Some(version));
        }

        for version in [
            Version::new(0, 0, 0),
            Version::new(7, 0, 12),
            Version::new(u64::MAX, u64::MAX, u64::MAX),
        ] {
            assert_eq!(Version::parse(&version.to_string()).ok(), Some(version));
        }
    }

    #[test]
    fn bump_resets_lower_components() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.bump(BumpKind::Major).ok(), Some(Version::new(2, 0, 0)));
        assert_eq!(v.bump(BumpKind::Minor).ok(), Some(Version::new(1, 3, 0)));
        assert_eq!(v.bump(BumpKind::Patch).ok(), Some(Version::new(1, 2, 4)));
    }

    #[test]
    fn bump_at_component_limit_is_an_error() {
        let top = Version::parse("18446744073709551615.0.0").expect("max major");
        let major = BumpRequest::parse("major").expect("bump kind");
        assert!(matches!(
            major.resolve(top),
            Err(Error::Overflow { kind: BumpKind::Major, .. })
        ));

        let edge = Version::new(1, u64::MAX, u64::MAX);
        assert!(matches!(edge.bump(BumpKind::Minor), Err(Error::Overflow { .. })));
        assert!(matches!(edge.bump(BumpKind::Patch), Err(Error::Overflow { .. })));
        assert_eq!(edge.bump(BumpKind::Major).ok(), Some(Version::new(2, 0, 0)));
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(Version::new(1, 10, 0) > Version::new(1, 9, 99));
        assert!(Version::new(2, 0, 0) > Version::new(1, 99, 99));
        assert!(Version::new(1, 2, 3) < Version::new(1, 2, 4));
    }

    #[test]
    fn bump_kind_is_case_insensitive() {
        assert_eq!("MAJOR".parse::<BumpKind>().ok(), Some(BumpKind::Major));
        assert!(matches!(
            "huge".parse::<BumpKind>(),
            Err(Error::InvalidBumpKind(token)) if token == "huge"
        ));
    }

    #[test]
    fn request_labels() {
        let manual = BumpRequest::parse("2.0.0").expect("explicit version");
        assert_eq!(manual.label(), "manual");
        assert!(!manual.writes_changelog());
        assert_eq!(manual.resolve(Version::new(9, 9, 9)).ok(), Some(Version::new(2, 0, 0)));

        let minor = BumpRequest::parse("Minor").expect("bump kind");
        assert_eq!(minor.label(), "minor");
        assert!(minor.writes_changelog());
    }

    #[test]
    fn request_rejects_garbage() {
        assert!(matches!(
            BumpRequest::parse("soon"),
            Err(Error::Format { .. })
        ));
    }
}
