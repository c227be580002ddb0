use super::ProjectContext;
use crate::{
    bundler::{ChecksumManifest, Sha256Hasher},
    cli::RuntimeConfig,
    error::Result,
};

/// Regenerates the checksum manifest from the archives already released.
pub async fn execute_checksums(project: &ProjectContext, runtime: &RuntimeConfig) -> Result<i32> {
    let config = project.config();
    let version = config.version_store(project.root()).current_version().await?;
    let release_dir = project.root().join(&config.build.release_dir);

    runtime.progress("Generating checksums...")?;
    let manifest =
        ChecksumManifest::generate(&release_dir, config.display_name(), &version, &Sha256Hasher).await?;
    let path = manifest.write(&release_dir).await?;

    if manifest.entries.is_empty() {
        runtime.warn(&format!("No archives found in {}", release_dir.display()))?;
    }
    for entry in &manifest.entries {
        runtime.indent(&format!("{}: {}", entry.file_name, entry.digest))?;
    }
    runtime.success(&format!("Checksums saved to: {}", path.display()))?;
    Ok(0)
}
