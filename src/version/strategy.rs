//! Per-file version token rules.

use super::Version;
use regex::Regex;
use std::{ops::Range, path::PathBuf, sync::LazyLock};

static PROJECT_MANIFEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*version[ \t]*=[ \t]*"([^"\r\n]+)""#).expect("valid manifest pattern")
});

static SCRIPT_CONSTANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*VERSION[ \t]*=[ \t]*"([^"\r\n]+)""#).expect("valid constant pattern")
});

// Greedy over every dotted component; `display_tags` keeps only whole
// two- and three-component tags.
static DISPLAY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bv(\d+(?:\.\d+)*)").expect("valid display tag pattern"));

/// `vX.Y` / `vX.Y.Z` tags as (whole tag span, version text).
///
/// A tag with more components (`v1.2.3.4`) or glued to a word character
/// (`v1.2.3rc1`) is not a display tag and is skipped entirely.
fn display_tags(content: &str) -> impl Iterator<Item = (Range<usize>, &str)> {
    DISPLAY_TAG.captures_iter(content).filter_map(move |caps| {
        let tag = caps.get(0)?;
        let version = caps.get(1)?;
        let components = version.as_str().split('.').count();
        let glued = content[tag.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');
        ((2..=3).contains(&components) && !glued).then(|| (tag.range(), version.as_str()))
    })
}

/// How the version token is written inside one kind of file.
///
/// Each variant pairs an extraction rule with a rewrite rule. The set is
/// closed on purpose: a new file role gets a new variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionStrategy {
    /// `version = "X.Y.Z"` key in a project manifest. First occurrence only.
    ProjectManifest,
    /// `VERSION = "X.Y.Z"` constant in a build script. First occurrence only.
    ScriptConstant,
    /// `vX.Y` or `vX.Y.Z` tags in display text. Every occurrence.
    DisplayTag,
}

impl VersionStrategy {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::ProjectManifest => &PROJECT_MANIFEST,
            Self::ScriptConstant => &SCRIPT_CONSTANT,
            Self::DisplayTag => &DISPLAY_TAG,
        }
    }

    /// Byte ranges of the tokens this strategy rewrites, in file order.
    ///
    /// For quoted assignments the range covers the text between the quotes;
    /// for display tags it covers the whole tag including the `v`.
    pub fn token_spans(self, content: &str) -> Vec<Range<usize>> {
        match self {
            Self::ProjectManifest | Self::ScriptConstant => self
                .pattern()
                .captures(content)
                .and_then(|caps| caps.get(1))
                .map(|m| vec![m.range()])
                .unwrap_or_default(),
            Self::DisplayTag => display_tags(content).map(|(span, _)| span).collect(),
        }
    }

    /// The first version token, without any surrounding syntax.
    pub fn extract(self, content: &str) -> Option<&str> {
        match self {
            Self::ProjectManifest | Self::ScriptConstant => self
                .pattern()
                .captures(content)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str()),
            Self::DisplayTag => display_tags(content).next().map(|(_, version)| version),
        }
    }

    /// Text that replaces each token span.
    fn replacement(self, version: &Version) -> String {
        match self {
            Self::ProjectManifest | Self::ScriptConstant => version.to_string(),
            Self::DisplayTag => format!("v{version}"),
        }
    }

    /// Returns `content` with every token span replaced by `version`.
    ///
    /// Bytes outside the spans are copied unchanged.
    pub fn rewrite(self, content: &str, version: &Version) -> String {
        let replacement = self.replacement(version);
        let mut out = String::with_capacity(content.len() + replacement.len());
        let mut cursor = 0;
        for span in self.token_spans(content) {
            out.push_str(&content[cursor..span.start]);
            out.push_str(&replacement);
            cursor = span.end;
        }
        out.push_str(&content[cursor..]);
        out
    }
}

/// A file that carries the version, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct VersionedFile {
    /// Path relative to the project root
    pub path: PathBuf,
    /// Token rule for this file
    pub kind: VersionStrategy,
}

impl VersionedFile {
    /// Creates a registry entry.
    pub fn new(path: impl Into<PathBuf>, kind: VersionStrategy) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PYPROJECT: &str = "[project]\nname = \"app\"\nversion = \"0.4.1\"\n\n[tool.x]\nversion = \"9.9.9\"\n";

    #[test]
    fn manifest_rewrites_first_key_only() {
        let out = VersionStrategy::ProjectManifest.rewrite(PYPROJECT, &Version::new(0, 5, 0));
        assert_eq!(
            out,
            "[project]\nname = \"app\"\nversion = \"0.5.0\"\n\n[tool.x]\nversion = \"9.9.9\"\n"
        );
    }

    #[test]
    fn constant_ignores_lowercase_key() {
        let script = "version = \"1.0.0\"\nVERSION = \"0.0.1\"\n";
        assert_eq!(VersionStrategy::ScriptConstant.extract(script), Some("0.0.1"));
        assert_eq!(
            VersionStrategy::ScriptConstant.rewrite(script, &Version::new(0, 0, 2)),
            "version = \"1.0.0\"\nVERSION = \"0.0.2\"\n"
        );
    }

    #[test]
    fn display_tag_replaces_whole_tag() {
        let gui = "footer = QLabel(\"RFTX v0.0.1 | build v0.0\")\nrev2.1 stays";
        let out = VersionStrategy::DisplayTag.rewrite(gui, &Version::new(0, 1, 0));
        assert_eq!(out, "footer = QLabel(\"RFTX v0.1.0 | build v0.1.0\")\nrev2.1 stays");
    }

    #[test]
    fn display_tag_skips_longer_or_glued_tokens() {
        let new = Version::new(1, 3, 0);
        for text in [
            "label v1.2.3rc1 end",
            "label v1.2.3.4 end",
            "label v1.2beta end",
            "label v1.2_3 end",
        ] {
            assert_eq!(VersionStrategy::DisplayTag.rewrite(text, &new), text);
            assert!(VersionStrategy::DisplayTag.extract(text).is_none(), "{text}");
        }
    }

    #[test]
    fn display_tag_accepts_trailing_punctuation() {
        let text = "Released v1.2.3. See v1.2, or (v1.2.3)";
        assert_eq!(VersionStrategy::DisplayTag.extract(text), Some("1.2.3"));
        assert_eq!(
            VersionStrategy::DisplayTag.rewrite(text, &Version::new(1, 3, 0)),
            "Released v1.3.0. See v1.3.0, or (v1.3.0)"
        );
    }

    #[test]
    fn no_match_leaves_content_untouched() {
        let text = "nothing to see";
        for kind in [
            VersionStrategy::ProjectManifest,
            VersionStrategy::ScriptConstant,
            VersionStrategy::DisplayTag,
        ] {
            assert_eq!(kind.rewrite(text, &Version::new(1, 0, 0)), text);
            assert!(kind.extract(text).is_none());
        }
    }
}
