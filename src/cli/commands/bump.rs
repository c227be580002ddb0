//! `bump` command.

use super::ProjectContext;
use crate::{
    changelog::ChangelogWriter,
    cli::RuntimeConfig,
    error::Result,
    version::{BumpRequest, FileUpdate},
};
use chrono::NaiveDate;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Bumps the project version, propagates it and records a changelog entry.
///
/// Explicit versions are written without a changelog entry. A declined
/// prompt exits successfully without touching any file.
pub async fn execute_bump(
    project: &ProjectContext,
    runtime: &RuntimeConfig,
    target: &str,
    yes: bool,
    dry_run: bool,
    date: Option<NaiveDate>,
) -> Result<i32> {
    let config = project.config();
    let store = config.version_store(project.root());

    let current = store.current_version().await?;
    let request = BumpRequest::parse(target)?;
    let new = request.resolve(current)?;

    runtime.section("Version bump")?;
    runtime.indent(&format!("Current version: {current}"))?;
    runtime.indent(&format!("New version:     {new} ({})", request.label()))?;

    if new <= current {
        runtime.warn(&format!("{new} is not newer than {current}"))?;
    }

    let changelog = ChangelogWriter::new(config.changelog_path(project.root()), config.display_name());

    if dry_run {
        runtime.section("Dry run, nothing written")?;
        for (path, outcome) in store.preview(&new).await? {
            let action = match outcome {
                FileUpdate::Updated => "would update",
                FileUpdate::Unchanged => "unchanged",
                FileUpdate::Missing => "missing, skipped",
            };
            runtime.indent(&format!("{}: {action}", path.display()))?;
        }
        if request.writes_changelog() {
            runtime.indent(&format!("{}: would add entry", changelog.path().display()))?;
        }
        return Ok(0);
    }

    if !yes && !confirm("Proceed with version bump? [y/N]: ").await? {
        runtime.warn("Version bump cancelled")?;
        return Ok(0);
    }

    runtime.progress("Updating files...")?;
    let report = store.propagate(&current, &new).await?;
    // Missing and unchanged files are already reported through the log
    for (path, outcome) in &report.files {
        if *outcome == FileUpdate::Updated {
            runtime.success(&format!("Updated {}", path.display()))?;
        }
    }

    if request.writes_changelog() {
        let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
        changelog.add_entry(&new, request.label(), date).await?;
        runtime.success(&format!("Updated {}", changelog.path().display()))?;
    }

    runtime.section("Version bump completed!")?;
    runtime.indent(&format!("{current} → {new}"))?;
    runtime.indent(&format!("Updated {} file(s)", report.updated_count()))?;
    runtime.section("Next steps:")?;
    runtime.indent("1. Review the changes")?;
    runtime.indent(&format!(
        "2. Commit: git add -A && git commit -m 'Bump version to {new}'"
    ))?;
    runtime.indent("3. Push: git push origin main")?;

    Ok(0)
}

/// Asks a yes/no question on stdin. End of input counts as no.
async fn confirm(prompt: &str) -> std::io::Result<bool> {
    let mut stdout = std::io::stdout();
    write!(stdout, "\n{prompt}")?;
    stdout.flush()?;

    let mut line = String::new();
    let read = BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    if read == 0 {
        return Ok(false);
    }

    Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
