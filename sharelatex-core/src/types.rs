//! Domain types and fixed names shared by the sync pipeline and the CLI.

use std::fmt;

// ---------------------------------------------------------------------------
// Fixed names
// ---------------------------------------------------------------------------

/// Name used in commit message prefixes.
pub const TOOL_NAME: &str = "sharelatex-git-integration";

/// Single-line dotfile persisting the last used project id.
pub const ID_STORE_FILE: &str = ".sharelatex-git";

/// Version-control exclusion file at the working-directory root.
pub const IGNORE_FILE: &str = ".gitignore";

/// Version-control metadata directory; its presence means "already initialized".
pub const GIT_DIR: &str = ".git";

/// Temporary download target, removed after extraction.
pub const ARCHIVE_FILE: &str = "sharelatex.zip";

/// Subfolder whose contents `--flatten` moves up one level.
pub const LATEX_SUBFOLDER: &str = "LaTeX";

/// Per-project zip download endpoint. `{id}` is replaced by the project id.
pub const DEFAULT_URL_TEMPLATE: &str = "https://www.sharelatex.com/project/{id}/download/zip";

/// Placeholder substituted with the project id in URL templates.
pub const ID_PLACEHOLDER: &str = "{id}";

pub const DEFAULT_COMMIT_MESSAGE: &str = "Adding files test";

/// Lines every run guarantees in the ignore file, in append order.
pub const REQUIRED_IGNORE_ENTRIES: [&str; 3] = ["sharelatex-git.py", "sharelatex-git", ID_STORE_FILE];

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Opaque identifier of a remote ShareLaTeX project.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(pub String);

impl ProjectId {
    /// Trim `raw` and wrap it; blank input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How to settle a supplied id that disagrees with the saved one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Ask on the console.
    #[default]
    Prompt,
    PreferSaved,
    PreferSupplied,
    /// Abort the run.
    Error,
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConflictPolicy::Prompt => "prompt",
            ConflictPolicy::PreferSaved => "saved",
            ConflictPolicy::PreferSupplied => "supplied",
            ConflictPolicy::Error => "error",
        };
        f.write_str(s)
    }
}
