//! `build` command.

use super::ProjectContext;
use crate::{
    bundler::{BuildPipeline, BuildReport, PlatformId, PlatformProfile},
    cli::RuntimeConfig,
    error::Result,
};
use std::io::Write;

/// Runs the release pipeline for one platform.
///
/// The platform is resolved before anything on disk is touched, so an
/// unsupported platform leaves the project exactly as it was.
pub async fn execute_build(
    project: &ProjectContext,
    runtime: &RuntimeConfig,
    platform: Option<&str>,
    json: bool,
) -> Result<i32> {
    let config = project.config();

    let platform = match platform {
        Some(identifier) => identifier.parse::<PlatformId>()?,
        None => PlatformId::detect()?,
    };
    let profile = PlatformProfile::resolve(platform, &config.app.name);

    let version = config.version_store(project.root()).current_version().await?;
    let settings = config.settings_builder(project.root(), version).build()?;

    runtime.section(&format!(
        "Building {} v{} for {}",
        settings.display_name(),
        version,
        platform
    ))?;
    runtime.verbose_println(&format!("Project root: {}", project.root().display()))?;
    runtime.verbose_println(&format!("Archive: {}", profile.archive_file_name(&version)))?;

    let report = BuildPipeline::new(settings, profile)
        .run_with(|stage| {
            // Progress output is best effort
            let _ = runtime.progress(stage.description());
        })
        .await?;

    if json {
        let mut stdout = std::io::stdout();
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    } else {
        print_summary(runtime, &report)?;
    }

    Ok(0)
}

fn print_summary(runtime: &RuntimeConfig, report: &BuildReport) -> std::io::Result<()> {
    runtime.success("Build complete!")?;
    runtime.indent(&format!("Archive:   {}", report.archive.display()))?;
    runtime.indent(&format!("Checksums: {}", report.manifest.display()))?;
    for entry in &report.checksums {
        runtime.verbose_println(&format!("  {}  {}", entry.digest, entry.file_name))?;
    }
    Ok(())
}
