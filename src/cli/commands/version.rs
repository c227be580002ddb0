use super::ProjectContext;
use crate::{cli::RuntimeConfig, error::Result};
use std::io::Write;

/// Prints the current version on stdout.
pub async fn execute_version(project: &ProjectContext, runtime: &RuntimeConfig) -> Result<i32> {
    let store = project.config().version_store(project.root());
    let version = store.current_version().await?;

    runtime.verbose_println(&format!(
        "Read from {}",
        store.resolve(&project.config().version.source).display()
    ))?;
    writeln!(std::io::stdout(), "{version}")?;
    Ok(0)
}
