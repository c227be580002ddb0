//! Shared project fixtures for integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const RELEASE_TOML: &str = r#"
[app]
name = "RFTX_Tuning"
display_name = "RFTX TUNING"

[build]
data_files = [{ source = "config.toml", destination = "." }]

[version]
source = { path = "pyproject.toml", kind = "project-manifest" }
files = [
    { path = "pyproject.toml", kind = "project-manifest" },
    { path = "build.py", kind = "script-constant" },
    { path = "gui.py", kind = "display-tag" },
]
"#;

/// Temporary project with a version source, registry files and release.toml.
pub struct Project {
    pub dir: tempfile::TempDir,
}

impl Project {
    pub fn new(version: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let project = Self { dir };
        project.write("release.toml", RELEASE_TOML);
        project.write(
            "pyproject.toml",
            &format!("[project]\nname = \"rftx-tuning\"\nversion = \"{version}\"\n"),
        );
        project.write(
            "build.py",
            &format!("APP_NAME = \"RFTX_Tuning\"\nVERSION = \"{version}\"\n"),
        );
        let short = version.rsplit_once('.').map(|(head, _)| head).unwrap_or(version);
        project.write(
            "gui.py",
            &format!("self.setWindowTitle(\"RFTX TUNING v{short}\")\nlabel = \"Build v{version}\"\n"),
        );
        project.write("README.md", "# RFTX\n");
        project.write("LICENSE.txt", "MIT\n");
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, content).expect("write fixture");
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).expect("read fixture")
    }
}
