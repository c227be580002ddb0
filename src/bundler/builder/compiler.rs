//! Artifact compiler invocation.
//!
//! The compiler is an external tool that turns the application sources into a
//! platform executable or bundle. This module only builds its argument list
//! and interprets its exit status; the process itself runs through a
//! [`CommandRunner`] so the pipeline can be driven without a real toolchain.

use crate::bundler::{
    Error, Result, Settings,
    platform::{BundleKind, PlatformProfile},
};
use std::{future::Future, path::Path};

/// Captured result of an external command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Whether the process reported success
    pub success: bool,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Human-readable exit status.
    pub fn status_description(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        }
    }

    /// Compiler diagnostics: stderr, or stdout when stderr is empty.
    pub fn diagnostics(&self) -> &str {
        if self.stderr.trim().is_empty() {
            self.stdout.trim_end()
        } else {
            self.stderr.trim_end()
        }
    }
}

/// Runs an external program to completion and captures its output.
pub trait CommandRunner {
    /// Runs `program` with `args` in `cwd`, blocking the pipeline until exit.
    fn run(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
    ) -> impl Future<Output = Result<CommandOutput>> + Send;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<CommandOutput> {
        let resolved = which::which(program).map_err(|e| Error::Compile {
            program: program.to_string(),
            status: "not found".to_string(),
            diagnostics: format!(
                "`{program}` was not found in PATH ({e}). Install it or set build.compiler in release.toml."
            ),
        })?;
        log::debug!("Found {program} at: {}", resolved.display());

        let output = tokio::process::Command::new(&resolved)
            .args(args)
            .current_dir(cwd)
            .output()
            .await
            .map_err(|error| Error::CommandFailed {
                command: program.to_string(),
                error,
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Program and arguments for one compiler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerInvocation {
    /// Compiler program
    pub program: String,
    /// Full argument list
    pub args: Vec<String>,
}

impl CompilerInvocation {
    /// Builds the invocation for `profile`.
    ///
    /// Options backed by a file (data files, icon, version resource) are
    /// omitted with a warning when the file does not exist.
    pub fn new(settings: &Settings, profile: &PlatformProfile) -> Self {
        let bundle = settings.bundle_settings();

        let mode = match profile.bundle_kind() {
            BundleKind::PlainBinary => "--onefile",
            BundleKind::DirectoryBundle => "--onedir",
        };
        let mut args: Vec<String> = vec![
            "--name".into(),
            settings.product_name().into(),
            mode.into(),
            "--windowed".into(),
            "--clean".into(),
            "--noconfirm".into(),
        ];

        args.extend(["--workpath".into(), settings.build_dir().display().to_string()]);
        args.extend(["--distpath".into(), settings.dist_dir().display().to_string()]);

        for data in &bundle.data_files {
            if settings.resolve(&data.source).exists() {
                args.push("--add-data".into());
                args.push(format!(
                    "{}{}{}",
                    data.source.display(),
                    profile.path_separator(),
                    data.destination
                ));
            } else {
                log::warn!("Data file {} not found, skipping", data.source.display());
            }
        }

        if settings.resolve(profile.icon_file()).exists() {
            args.extend(["--icon".into(), profile.icon_file().into()]);
        } else {
            log::warn!("Icon {} not found, building without an icon", profile.icon_file());
        }

        if let Some(version_file) = profile.version_file() {
            if settings.resolve(version_file).exists() {
                args.extend(["--version-file".into(), version_file.into()]);
            } else {
                log::debug!("Version resource {version_file} not found, skipping");
            }
        }

        if profile.bundle_kind() == BundleKind::DirectoryBundle {
            if let Some(identifier) = &bundle.bundle_identifier {
                args.extend(["--osx-bundle-identifier".into(), identifier.clone()]);
            }
        }

        if let Some(target) = profile.arch().compiler_target() {
            args.extend(["--target-arch".into(), target.into()]);
        }

        for module in &bundle.hidden_imports {
            args.extend(["--hidden-import".into(), module.clone()]);
        }

        args.push(bundle.entry_script.display().to_string());

        Self {
            program: bundle.compiler.clone(),
            args,
        }
    }

    /// Runs the compiler and fails with [`Error::Compile`] on a non-zero exit.
    pub async fn execute<R: CommandRunner>(&self, runner: &R, cwd: &Path) -> Result<CommandOutput> {
        log::info!("Running: {} {}", self.program, self.args.join(" "));

        let output = runner.run(&self.program, &self.args, cwd).await?;
        if !output.success {
            return Err(Error::Compile {
                program: self.program.clone(),
                status: output.status_description(),
                diagnostics: output.diagnostics().to_string(),
            });
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bundler::{BundleSettings, DataFile, PackageSettings, SettingsBuilder, platform::PlatformId},
        version::Version,
    };

    fn settings(root: &Path) -> Settings {
        SettingsBuilder::new()
            .project_root(root)
            .package_settings(PackageSettings {
                product_name: "App".into(),
                display_name: "App".into(),
                version: Version::new(1, 0, 0),
            })
            .bundle_settings(BundleSettings {
                data_files: vec![
                    DataFile::new("README.md", "."),
                    DataFile::new("missing.toml", "."),
                ],
                hidden_imports: vec!["serial".into()],
                bundle_identifier: Some("com.example.app".into()),
                ..BundleSettings::default()
            })
            .build()
            .expect("settings")
    }

    #[test]
    fn absent_files_are_omitted() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("README.md"), "readme").expect("write");

        let linux = PlatformProfile::resolve(PlatformId::Linux, "App");
        let invocation = CompilerInvocation::new(&settings(dir.path()), &linux);

        assert_eq!(invocation.program, "pyinstaller");
        assert!(invocation.args.contains(&"README.md:.".to_string()));
        assert!(!invocation.args.iter().any(|a| a.starts_with("missing.toml")));
        assert!(!invocation.args.contains(&"--icon".to_string()));
        assert!(!invocation.args.contains(&"--osx-bundle-identifier".to_string()));
        assert_eq!(invocation.args.last().map(String::as_str), Some("main.py"));
    }

    #[test]
    fn macos_adds_bundle_options() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("icon.icns"), "icns").expect("write");

        let macos = PlatformProfile::resolve(PlatformId::MacOs, "App");
        let args = CompilerInvocation::new(&settings(dir.path()), &macos).args;

        let after = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|i| args.get(i + 1))
                .cloned()
        };
        assert!(args.contains(&"--onedir".to_string()));
        assert_eq!(after("--icon").as_deref(), Some("icon.icns"));
        assert_eq!(after("--osx-bundle-identifier").as_deref(), Some("com.example.app"));
        assert_eq!(after("--target-arch").as_deref(), Some("universal2"));
        assert_eq!(after("--hidden-import").as_deref(), Some("serial"));
    }

    #[test]
    fn windows_uses_semicolon_separator() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("README.md"), "readme").expect("write");

        let windows = PlatformProfile::resolve(PlatformId::Windows, "App");
        let args = CompilerInvocation::new(&settings(dir.path()), &windows).args;
        assert!(args.contains(&"README.md;.".to_string()));
        assert!(args.contains(&"--onefile".to_string()));
    }
}
