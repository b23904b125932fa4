//! Manifest line classification.
//!
//! Every non-blank, non-comment line of a requirements manifest becomes a
//! [`Declaration`]. Lines pip understands but that do not carry a plain
//! name and version specifier (editable installs, VCS and URL references,
//! installer options, nested file inclusion) are kept [`Declaration::Raw`]
//! and handed to the installer untouched.

use std::sync::LazyLock;

use pep508_rs::{Requirement, VersionOrUrl};
use regex::Regex;

/// Whitespace followed by `#` starts an inline comment. A bare `#` does not,
/// so URL fragments such as `#egg=pkg` survive.
static INLINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+#").unwrap());

/// Prefixes of editable installs.
const EDITABLE_PREFIXES: &[&str] = &["-e ", "--editable "];

/// Prefixes of VCS and direct URL references.
const URL_PREFIXES: &[&str] = &[
    "git+", "hg+", "svn+", "bzr+", "http://", "https://", "file:",
];

/// Prefixes of pip options that may appear in a requirements file.
const OPTION_PREFIXES: &[&str] = &[
    "-i ",
    "--index-url ",
    "--extra-index-url ",
    "-f ",
    "--find-links ",
    "--trusted-host ",
];

/// Prefixes of nested requirement or constraint files.
const INCLUDE_PREFIXES: &[&str] = &["-r ", "--requirement ", "-c ", "--constraint "];

/// A single classified manifest line.
#[derive(Debug, Clone)]
pub enum Declaration {
    /// Passed to the installer as written.
    Raw(String),

    /// A PEP 508 requirement with a package name.
    Parsed {
        /// Line text with any inline comment removed.
        text: String,
        /// The parsed requirement.
        requirement: Box<Requirement>,
    },

    /// Looked like a requirement but failed to parse; treated as raw.
    Unparsable {
        /// Line text with any inline comment removed.
        text: String,
        /// Parser error message.
        error: String,
    },
}

impl Declaration {
    /// The text that would be handed to the installer.
    pub fn text(&self) -> &str {
        match self {
            Declaration::Raw(text) => text,
            Declaration::Parsed { text, .. } => text,
            Declaration::Unparsable { text, .. } => text,
        }
    }

    /// Whether the declaration bypasses version checks.
    pub fn is_passthrough(&self) -> bool {
        !matches!(self, Declaration::Parsed { .. })
    }
}

/// Classify one manifest line.
///
/// Returns `None` for blank lines, comment lines, and lines that are empty
/// once their inline comment is removed.
pub fn classify(line: &str) -> Option<Declaration> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let text = strip_inline_comment(line);
    if text.is_empty() {
        return None;
    }

    if is_raw(text) {
        return Some(Declaration::Raw(text.to_string()));
    }

    match text.parse::<Requirement>() {
        // `name@url` without surrounding spaces still has no specifier to check.
        Ok(requirement) if matches!(requirement.version_or_url, Some(VersionOrUrl::Url(_))) => {
            Some(Declaration::Raw(text.to_string()))
        }
        Ok(requirement) => Some(Declaration::Parsed {
            text: text.to_string(),
            requirement: Box::new(requirement),
        }),
        Err(err) => Some(Declaration::Unparsable {
            text: text.to_string(),
            error: err.to_string(),
        }),
    }
}

/// Remove a trailing ` # comment` from a line.
pub fn strip_inline_comment(line: &str) -> &str {
    INLINE_COMMENT
        .splitn(line, 2)
        .next()
        .unwrap_or_default()
        .trim()
}

/// Whether a line must be passed to the installer without parsing.
pub fn is_raw(line: &str) -> bool {
    let line = line.trim();
    line.contains(" @ ")
        || EDITABLE_PREFIXES
            .iter()
            .chain(URL_PREFIXES)
            .chain(OPTION_PREFIXES)
            .chain(INCLUDE_PREFIXES)
            .any(|prefix| line.starts_with(prefix))
}
