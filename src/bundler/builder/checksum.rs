//! Archive checksums and the release checksum manifest.
//!
//! The manifest is always regenerated from the archives present in the
//! release directory, so it never lists an archive that was deleted and never
//! misses one that was added by hand.

use crate::{
    bundler::{
        Error, Result,
        error::ErrorExt,
        platform::ArchiveFormat,
    },
    version::Version,
};
use sha2::{Digest, Sha256};
use std::{
    collections::BTreeMap,
    future::Future,
    path::{Path, PathBuf},
};
use tokio::io::AsyncReadExt;

/// File name of the manifest inside the release directory.
pub const MANIFEST_FILE_NAME: &str = "checksums.txt";

/// Computes the digest of a release archive.
pub trait ArtifactHasher {
    /// Algorithm name shown in the manifest header (e.g. `SHA256`).
    fn algorithm(&self) -> &'static str;

    /// Hex-encoded digest of the file at `path`.
    fn digest(&self, path: &Path) -> impl Future<Output = Result<String>> + Send;
}

/// SHA-256 hasher.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl ArtifactHasher for Sha256Hasher {
    fn algorithm(&self) -> &'static str {
        "SHA256"
    }

    async fn digest(&self, path: &Path) -> Result<String> {
        calculate_sha256(path).await
    }
}

/// Calculates the SHA-256 checksum of a file.
///
/// Reads in 8KB chunks. Any failure is reported as [`Error::Checksum`].
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let checksum_error = |reason: String| Error::Checksum {
        path: path.to_path_buf(),
        reason,
    };

    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(|e| checksum_error(e.to_string()))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .map_err(|e| checksum_error(e.to_string()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Every `.zip` and `.tar.gz` file directly inside `release_dir`, sorted by
/// file name. Hidden files (including in-progress archives) are ignored.
pub fn discover_archives(release_dir: &Path) -> Result<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&release_dir.to_string_lossy());
    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..glob::MatchOptions::new()
    };
    let mut archives = BTreeMap::new();

    for format in ArchiveFormat::ALL {
        let pattern = format!("{escaped}/*.{}", format.extension());
        for entry in glob::glob_with(&pattern, options)? {
            let path = entry.map_err(|e| unreadable_entry(e.path(), e.error()))?;
            if !path.is_file() {
                continue;
            }
            if let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) {
                archives.insert(name, path);
            }
        }
    }

    Ok(archives.into_values().collect())
}

/// A directory entry the archive scan could not read.
fn unreadable_entry(path: &Path, error: &std::io::Error) -> Error {
    Error::Checksum {
        path: path.to_path_buf(),
        reason: format!("cannot read release directory entry: {error}"),
    }
}

/// One manifest line.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ManifestEntry {
    /// Archive file name (no directory)
    pub file_name: String,
    /// Hex digest
    pub digest: String,
}

/// Checksums of every archive in a release directory.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ChecksumManifest {
    /// First line of the manifest
    pub header: String,
    /// Entries sorted by file name
    pub entries: Vec<ManifestEntry>,
}

impl ChecksumManifest {
    /// Digests every archive currently in `release_dir`.
    pub async fn generate<H: ArtifactHasher>(
        release_dir: &Path,
        display_name: &str,
        version: &Version,
        hasher: &H,
    ) -> Result<Self> {
        if !release_dir.is_dir() {
            return Err(Error::Checksum {
                path: release_dir.to_path_buf(),
                reason: "release directory does not exist".to_string(),
            });
        }

        let mut entries = Vec::new();
        for archive in discover_archives(release_dir)? {
            let digest = hasher.digest(&archive).await?;
            let file_name = archive
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            log::info!("{file_name}: {digest}");
            entries.push(ManifestEntry { file_name, digest });
        }

        Ok(Self {
            header: format!(
                "{display_name} v{version} - {} Checksums",
                hasher.algorithm()
            ),
            entries,
        })
    }

    /// Manifest text: header, separator, blank line, one line per archive.
    pub fn render(&self) -> String {
        let mut out = format!("{}\n{}\n\n", self.header, "=".repeat(60));
        for entry in &self.entries {
            out.push_str(&format!("{}  {}\n", entry.digest, entry.file_name));
        }
        out
    }

    /// Writes the manifest into `release_dir`, replacing any previous one.
    pub async fn write(&self, release_dir: &Path) -> Result<PathBuf> {
        let path = release_dir.join(MANIFEST_FILE_NAME);
        tokio::fs::write(&path, self.render())
            .await
            .fs_context("writing checksum manifest", &path)?;
        Ok(path)
    }
}
