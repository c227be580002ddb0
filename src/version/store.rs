//! Source-of-truth version lookup and multi-file propagation.

use super::{BumpKind, Error, Result, Version, VersionedFile};
use std::{
    io,
    path::{Path, PathBuf},
};

/// Outcome of rewriting one registry file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileUpdate {
    /// The token was rewritten
    Updated,
    /// The file exists but its content did not change
    Unchanged,
    /// The file does not exist and was skipped
    Missing,
}

/// Per-file outcomes of [`VersionStore::propagate`], in registry order.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct PropagationReport {
    /// (path, outcome) pairs
    pub files: Vec<(PathBuf, FileUpdate)>,
}

impl PropagationReport {
    /// Number of files that were rewritten.
    pub fn updated_count(&self) -> usize {
        self.files
            .iter()
            .filter(|(_, update)| *update == FileUpdate::Updated)
            .count()
    }
}

/// A rewrite computed in memory, not yet written.
struct PendingRewrite {
    path: PathBuf,
    content: String,
}

/// Owns the registry of files that carry the project version.
#[derive(Debug, Clone)]
pub struct VersionStore {
    root: PathBuf,
    source: VersionedFile,
    registry: Vec<VersionedFile>,
}

impl VersionStore {
    /// Creates a store rooted at `root`.
    ///
    /// `source` is read by [`current_version`](Self::current_version);
    /// `registry` is rewritten by [`propagate`](Self::propagate) in order.
    pub fn new(root: impl Into<PathBuf>, source: VersionedFile, registry: Vec<VersionedFile>) -> Self {
        Self {
            root: root.into(),
            source,
            registry,
        }
    }

    /// Project root the registry paths are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a registry entry.
    pub fn resolve(&self, file: &VersionedFile) -> PathBuf {
        self.root.join(&file.path)
    }

    /// Reads and parses the version from the source-of-truth file.
    pub async fn current_version(&self) -> Result<Version> {
        let path = self.resolve(&self.source);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound { path });
            }
            Err(source) => return Err(Error::Io { path, source }),
        };

        let token = self.source.kind.extract(&content).ok_or_else(|| Error::Format {
            subject: path.display().to_string(),
            reason: "no version token found".to_string(),
        })?;

        Version::parse(token).map_err(|e| match e {
            Error::Format { reason, .. } => Error::Format {
                subject: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Increments `current` according to a `major`/`minor`/`patch` directive.
    pub fn next_version(current: Version, bump_kind: &str) -> Result<Version> {
        let kind: BumpKind = bump_kind.parse()?;
        current.bump(kind)
    }

    /// Validates an explicitly requested version.
    pub fn explicit_version(literal: &str) -> Result<Version> {
        Version::parse(literal)
    }

    /// Rewrites the version token in every registered file.
    ///
    /// All files are read and rewritten in memory first, so a read failure
    /// leaves every file untouched. Writes then happen one file at a time in
    /// registry order; a write failure returns [`Error::PartialWrite`] naming
    /// the files already committed. Missing files are skipped with a warning.
    pub async fn propagate(&self, old: &Version, new: &Version) -> Result<PropagationReport> {
        let mut report = PropagationReport::default();
        let mut pending = Vec::new();

        for file in &self.registry {
            let path = self.resolve(file);
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::warn!("Skipping {} (not found)", path.display());
                    report.files.push((file.path.clone(), FileUpdate::Missing));
                    continue;
                }
                Err(source) => return Err(Error::Io { path, source }),
            };

            if let Some(token) = file.kind.extract(&content) {
                log::debug!(
                    "{}: found {token}, rewriting {old} -> {new}",
                    path.display()
                );
            }

            let rewritten = file.kind.rewrite(&content, new);
            if rewritten == content {
                log::warn!("No changes in {}", path.display());
                report.files.push((file.path.clone(), FileUpdate::Unchanged));
            } else {
                pending.push(PendingRewrite {
                    path,
                    content: rewritten,
                });
                report.files.push((file.path.clone(), FileUpdate::Updated));
            }
        }

        commit(pending).await?;
        Ok(report)
    }

    /// Paths that [`propagate`](Self::propagate) would rewrite, without writing.
    pub async fn preview(&self, new: &Version) -> Result<Vec<(PathBuf, FileUpdate)>> {
        let mut outcomes = Vec::with_capacity(self.registry.len());
        for file in &self.registry {
            let path = self.resolve(file);
            let outcome = match tokio::fs::read_to_string(&path).await {
                Ok(content) if file.kind.rewrite(&content, new) != content => FileUpdate::Updated,
                Ok(_) => FileUpdate::Unchanged,
                Err(e) if e.kind() == io::ErrorKind::NotFound => FileUpdate::Missing,
                Err(source) => return Err(Error::Io { path, source }),
            };
            outcomes.push((file.path.clone(), outcome));
        }
        Ok(outcomes)
    }
}

async fn commit(pending: Vec<PendingRewrite>) -> Result<()> {
    let mut written: Vec<PathBuf> = Vec::with_capacity(pending.len());
    for rewrite in pending {
        if let Err(source) = tokio::fs::write(&rewrite.path, rewrite.content.as_bytes()).await {
            return Err(Error::PartialWrite {
                written,
                failed: rewrite.path,
                source,
            });
        }
        log::info!("Updated {}", rewrite.path.display());
        written.push(rewrite.path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_commit_names_files_already_written() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = dir.path().join("pyproject.toml");
        let second = dir.path().join("build.py");
        // Parent directory does not exist, so the write fails for any user
        let unreachable = dir.path().join("missing").join("gui.py");
        let after = dir.path().join("after.py");

        let pending = [&first, &second, &unreachable, &after]
            .into_iter()
            .map(|path| PendingRewrite {
                path: path.clone(),
                content: "VERSION = \"2.0.0\"\n".to_string(),
            })
            .collect();

        let err = commit(pending).await.unwrap_err();
        match err {
            Error::PartialWrite { written, failed, .. } => {
                assert_eq!(written, vec![first.clone(), second.clone()]);
                assert_eq!(failed, unreachable);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(first.is_file());
        assert!(!after.exists());
    }

    #[test]
    fn next_version_at_limit_is_an_error() {
        let top = Version::new(1, 2, u64::MAX);
        assert!(matches!(
            VersionStore::next_version(top, "patch"),
            Err(Error::Overflow { .. })
        ));
    }
}
