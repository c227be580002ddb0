//! Changelog entry insertion.
//!
//! Entries are blocks headed by `## [X.Y.Z] - YYYY-MM-DD`, newest first. A new
//! entry goes right before the first existing entry header, which keeps it
//! below the document's title and description.

use crate::version::{Error, Result, Version};
use chrono::NaiveDate;
use std::{
    io,
    path::{Path, PathBuf},
};

/// Prefix that marks the start of an entry block.
pub const ENTRY_MARKER: &str = "## [";

/// Line index at which a new entry block should be inserted.
///
/// 1. The first line starting with [`ENTRY_MARKER`].
/// 2. Otherwise, if the document opens with a `# ` title, the end of the
///    preamble: the first `## ` heading after the title, or the end of the
///    document.
/// 3. Otherwise the top of the document.
///
/// Lines are split on `\n`, matching how [`insert_entry`] rebuilds the text.
pub fn insertion_index(document: &str) -> usize {
    let lines: Vec<&str> = document.split('\n').collect();

    if let Some(index) = lines.iter().position(|line| line.starts_with(ENTRY_MARKER)) {
        return index;
    }

    let Some(first) = lines.iter().position(|line| !line.trim().is_empty()) else {
        return 0;
    };
    if !lines[first].starts_with("# ") {
        return 0;
    }

    lines
        .iter()
        .skip(first + 1)
        .position(|line| line.starts_with("## "))
        .map(|offset| first + 1 + offset)
        .unwrap_or_else(|| match lines.last() {
            // keep the trailing newline at the very end
            Some(last) if last.is_empty() => lines.len() - 1,
            _ => lines.len(),
        })
}

/// Capitalizes a bump label for the entry's section heading.
fn heading(bump_label: &str) -> String {
    let mut chars = bump_label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Renders one entry block, without a trailing newline.
pub fn render_entry(version: &Version, bump_label: &str, date: NaiveDate) -> String {
    format!(
        "## [{version}] - {date}\n\n### {heading}\n- Version bump to {version}\n- See git log for detailed changes",
        date = date.format("%Y-%m-%d"),
        heading = heading(bump_label),
    )
}

/// Inserts `entry` into `document` at [`insertion_index`].
///
/// A blank line separates the entry from its neighbours; nothing else in the
/// document changes. A document using `\r\n` keeps `\r\n` throughout,
/// including in the inserted block.
pub fn insert_entry(document: &str, entry: &str) -> String {
    let newline = line_ending(document);
    let index = insertion_index(document);
    let mut lines: Vec<&str> = split_lines(document).collect();

    let mut block: Vec<&str> = Vec::new();
    if index > 0 && !lines[index - 1].trim().is_empty() {
        block.push("");
    }
    block.extend(split_lines(entry));
    if lines.get(index).is_some_and(|line| !line.trim().is_empty()) {
        block.push("");
    }

    lines.splice(index..index, block);
    lines.join(newline)
}

/// `\r\n` if the document uses it anywhere, else `\n`.
fn line_ending(document: &str) -> &'static str {
    if document.contains("\r\n") { "\r\n" } else { "\n" }
}

/// Splits on `\n`, dropping the `\r` of a `\r\n` pair.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// A fresh changelog containing the standard preamble and one entry.
pub fn new_document(product_name: &str, entry: &str) -> String {
    format!(
        "# Changelog\n\
         \n\
         All notable changes to {product_name} will be documented in this file.\n\
         \n\
         The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.0.0/),\n\
         and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).\n\
         \n\
         {entry}\n"
    )
}

/// Writes version entries into a changelog file.
#[derive(Debug, Clone)]
pub struct ChangelogWriter {
    path: PathBuf,
    product_name: String,
}

impl ChangelogWriter {
    /// Creates a writer for the changelog at `path`.
    ///
    /// `product_name` appears in the preamble of a newly created document.
    pub fn new(path: impl Into<PathBuf>, product_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            product_name: product_name.into(),
        }
    }

    /// Changelog location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Adds an entry for `version`, creating the document if needed.
    ///
    /// Calling this twice for the same version adds two entries.
    pub async fn add_entry(&self, version: &Version, bump_label: &str, date: NaiveDate) -> Result<()> {
        let entry = render_entry(version, bump_label, date);

        let document = match tokio::fs::read_to_string(&self.path).await {
            Ok(existing) => insert_entry(&existing, &entry),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Creating {}", self.path.display());
                new_document(&self.product_name, &entry)
            }
            Err(source) => {
                return Err(Error::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        tokio::fs::write(&self.path, document)
            .await
            .map_err(|source| Error::Io {
                path: self.path.clone(),
                source,
            })?;

        log::info!("Added {version} entry to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_points_at_first_marker() {
        let doc = "# Changelog\n\nIntro.\n\n## [1.0.0] - 2024-01-01\n\n## [0.9.0] - 2023-01-01\n";
        assert_eq!(insertion_index(doc), 4);
    }

    #[test]
    fn index_without_entries_is_end_of_preamble() {
        assert_eq!(insertion_index("# Changelog\n\nIntro.\n"), 3);
        assert_eq!(insertion_index("# Changelog\n\nIntro.\n\n## Unreleased\n"), 4);
    }

    #[test]
    fn index_without_preamble_is_top() {
        assert_eq!(insertion_index(""), 0);
        assert_eq!(insertion_index("random notes\nmore\n"), 0);
    }

    #[test]
    fn heading_capitalizes() {
        assert_eq!(heading("patch"), "Patch");
        assert_eq!(heading("manual"), "Manual");
        assert_eq!(heading(""), "");
    }

    #[test]
    fn entry_is_separated_by_blank_lines() {
        let doc = "# Changelog\nIntro.\n## [1.0.0] - 2024-01-01\n- old\n";
        let out = insert_entry(doc, "## [1.1.0] - 2024-02-01\n- new");
        assert_eq!(
            out,
            "# Changelog\nIntro.\n\n## [1.1.0] - 2024-02-01\n- new\n\n## [1.0.0] - 2024-01-01\n- old\n"
        );
    }

    #[test]
    fn crlf_document_keeps_crlf() {
        let doc = "# Changelog\r\n\r\nIntro.\r\n\r\n## [1.0.0] - 2024-01-01\r\n- old\r\n";
        let out = insert_entry(doc, "## [1.1.0] - 2024-02-01\n- new");
        assert_eq!(
            out,
            "# Changelog\r\n\r\nIntro.\r\n\r\n## [1.1.0] - 2024-02-01\r\n- new\r\n\r\n## [1.0.0] - 2024-01-01\r\n- old\r\n"
        );
        assert!(!out.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn crlf_preamble_only_appends_at_end() {
        let out = insert_entry("# Changelog\r\n\r\nIntro.\r\n", "## [0.1.0] - 2024-01-01");
        assert_eq!(out, "# Changelog\r\n\r\nIntro.\r\n\r\n## [0.1.0] - 2024-01-01\r\n");
    }
}
