mod common;

use assert_cmd::Command;
use common::Project;
use predicates::prelude::*;

fn bundler(project: &Project) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_release_bundler"));
    cmd.arg("--project").arg(project.root()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_prints_current_version() {
    let project = Project::new("1.4.2");

    bundler(&project)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::eq("1.4.2\n"));
}

#[test]
fn missing_config_fails_with_hint() {
    let project = Project::new("1.0.0");
    std::fs::remove_file(project.path("release.toml")).expect("remove");

    bundler(&project)
        .arg("version")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("✗ Error:"))
        .stderr(predicate::str::contains("  hint: Create a release.toml"));
}

#[test]
fn errors_are_shown_under_quiet() {
    let project = Project::new("1.0.0");

    bundler(&project)
        .args(["--quiet", "bump", "sideways", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("✗ Error:"))
        .stderr(predicate::str::contains("invalid version format"))
        .stderr(predicate::str::contains("  hint: "));
}

#[test]
fn patch_bump_updates_files_and_changelog() {
    let project = Project::new("1.2.3");

    bundler(&project)
        .args(["bump", "patch", "--yes", "--date", "2024-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.2.3 → 1.2.4"));

    assert!(project.read("pyproject.toml").contains("version = \"1.2.4\""));
    assert!(project.read("build.py").contains("VERSION = \"1.2.4\""));
    assert!(project.read("gui.py").contains("RFTX TUNING v1.2.4"));

    let changelog = project.read("CHANGELOG.md");
    assert!(changelog.contains("All notable changes to RFTX TUNING"));
    assert!(changelog.contains("## [1.2.4] - 2024-06-01\n\n### Patch\n- Version bump to 1.2.4"));
}

#[test]
fn explicit_version_skips_changelog() {
    let project = Project::new("1.2.3");

    bundler(&project)
        .args(["bump", "2.0.0", "--yes"])
        .assert()
        .success();

    assert!(project.read("pyproject.toml").contains("version = \"2.0.0\""));
    assert!(!project.path("CHANGELOG.md").exists());
}

#[test]
fn invalid_bump_target_changes_nothing() {
    let project = Project::new("1.2.3");
    let before = project.read("pyproject.toml");

    bundler(&project)
        .args(["bump", "1.2", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid version format"));

    assert_eq!(project.read("pyproject.toml"), before);
}

#[test]
fn declined_prompt_changes_nothing() {
    let project = Project::new("1.2.3");
    let before = project.read("pyproject.toml");

    bundler(&project)
        .args(["bump", "minor"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("cancelled"));

    assert_eq!(project.read("pyproject.toml"), before);
    assert!(!project.path("CHANGELOG.md").exists());
}

#[test]
fn closed_stdin_counts_as_no() {
    let project = Project::new("1.2.3");

    bundler(&project)
        .args(["bump", "major"])
        .write_stdin("")
        .assert()
        .success();

    assert!(project.read("pyproject.toml").contains("version = \"1.2.3\""));
}

#[test]
fn dry_run_writes_nothing() {
    let project = Project::new("1.2.3");

    bundler(&project)
        .args(["bump", "minor", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would update"));

    assert!(project.read("pyproject.toml").contains("version = \"1.2.3\""));
    assert!(!project.path("CHANGELOG.md").exists());
}

#[test]
fn unsupported_platform_touches_nothing() {
    let project = Project::new("1.0.0");
    project.write("build/keep.txt", "keep");

    bundler(&project)
        .args(["build", "--platform", "solaris"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("solaris"));

    assert!(!project.path("releases").exists());
    assert!(project.path("build/keep.txt").exists());
}

#[test]
fn checksums_command_rewrites_manifest() {
    let project = Project::new("3.0.0");
    project.write("releases/RFTX_Tuning-v3.0.0-Windows-x64.zip", "abc");

    bundler(&project)
        .arg("checksums")
        .assert()
        .success()
        .stdout(predicate::str::contains("Checksums saved to"));

    let manifest = project.read("releases/checksums.txt");
    assert!(manifest.starts_with("RFTX TUNING v3.0.0 - SHA256 Checksums\n"));
    assert!(manifest.contains(
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad  RFTX_Tuning-v3.0.0-Windows-x64.zip"
    ));
}

#[cfg(unix)]
mod with_compiler {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    const FAKE_COMPILER: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
  case "$1" in
    --distpath) dist="$2"; shift ;;
    --name) name="$2"; shift ;;
  esac
  shift
done
mkdir -p "$dist" && printf 'binary' > "$dist/$name"
"#;

    fn project_with_compiler(script: &str) -> Project {
        let project = Project::new("1.5.0");
        let compiler = project.path("fake-compiler.sh");
        std::fs::write(&compiler, script).expect("write script");
        std::fs::set_permissions(&compiler, std::fs::Permissions::from_mode(0o755)).expect("chmod");

        project.write(
            "release.toml",
            &format!(
                "[app]\nname = \"RFTX_Tuning\"\ndisplay_name = \"RFTX TUNING\"\n\n[build]\ncompiler = \"{}\"\n",
                compiler.display()
            ),
        );
        project
    }

    #[test]
    fn build_produces_archive_and_json_report() {
        let project = project_with_compiler(FAKE_COMPILER);

        let output = bundler(&project)
            .args(["build", "--platform", "linux", "--json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let report: serde_json::Value = serde_json::from_slice(&output).expect("json report");
        assert_eq!(report["platform"], "linux");
        assert_eq!(report["version"], "1.5.0");
        assert!(project.path("releases/RFTX_Tuning-v1.5.0-Linux-x64.tar.gz").is_file());
        assert!(project.read("releases/checksums.txt").contains("RFTX_Tuning-v1.5.0-Linux-x64.tar.gz"));
    }

    #[test]
    fn failing_compiler_reports_stage() {
        let project = project_with_compiler("#!/bin/sh\necho 'boom' >&2\nexit 3\n");

        bundler(&project)
            .args(["build", "--platform", "linux"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("compiling stage failed"))
            .stderr(predicate::str::contains("boom"));

        assert!(!project.path("releases/RFTX_Tuning-v1.5.0-Linux-x64.tar.gz").exists());
        assert!(!project.path("releases/checksums.txt").exists());
    }

    #[test]
    fn missing_compiler_fails_compiling() {
        let project = Project::new("1.5.0");
        project.write(
            "release.toml",
            "[app]\nname = \"RFTX_Tuning\"\n\n[build]\ncompiler = \"definitely-not-a-real-compiler-xyz\"\n",
        );

        bundler(&project)
            .args(["build", "--platform", "linux"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not found in PATH"));
    }
}
