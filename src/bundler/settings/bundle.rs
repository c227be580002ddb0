//! Compiler inputs and distribution files.

use std::path::PathBuf;

/// A data file the compiler embeds into the artifact.
///
/// ```toml
/// [build]
/// data_files = [{ source = "README.md", destination = "." }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct DataFile {
    /// Path relative to the project root
    pub source: PathBuf,
    /// Destination inside the artifact
    #[serde(default = "default_destination")]
    pub destination: String,
}

fn default_destination() -> String {
    ".".to_string()
}

impl DataFile {
    /// Creates a data file entry.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Inputs for the artifact compiler and the archive contents.
#[derive(Debug, Clone)]
pub struct BundleSettings {
    /// Compiler executable (name on PATH or a path)
    pub compiler: String,

    /// Application entry point handed to the compiler
    pub entry_script: PathBuf,

    /// Files embedded by the compiler; absent ones are skipped
    pub data_files: Vec<DataFile>,

    /// Modules the compiler must include even if it cannot see them imported
    pub hidden_imports: Vec<String>,

    /// Files copied next to the artifact in the archive; absent ones are skipped
    pub dist_files: Vec<PathBuf>,

    /// Bundle identifier for directory-bundle platforms
    pub bundle_identifier: Option<String>,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            compiler: "pyinstaller".to_string(),
            entry_script: PathBuf::from("main.py"),
            data_files: Vec::new(),
            hidden_imports: Vec::new(),
            dist_files: vec![PathBuf::from("README.md"), PathBuf::from("LICENSE.txt")],
            bundle_identifier: None,
        }
    }
}
