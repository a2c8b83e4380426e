//! Git repository management through the git command line.

use std::path::{Path, PathBuf};

use sharelatex_core::{
    ignore,
    types::{GIT_DIR, REQUIRED_IGNORE_ENTRIES, TOOL_NAME},
};

use crate::error::SyncError;
use crate::logger::{timestamp, Logger};
use crate::runner::{shell_quote, CommandRunner};

/// `git status` phrases meaning the working tree is clean (current and
/// older git wording).
const CLEAN_TREE_PHRASES: [&str; 2] = [
    "nothing to commit, working tree clean",
    "nothing to commit, working directory clean",
];

/// True when `git status` output reports a clean tree (case-insensitive).
pub fn is_clean_status(output: &str) -> bool {
    let lowered = output.to_lowercase();
    CLEAN_TREE_PHRASES
        .iter()
        .any(|phrase| lowered.contains(phrase))
}

/// Commit message carrying the tool name and `timestamp`.
pub fn commit_message(message: &str, timestamp: &str) -> String {
    format!("[{TOOL_NAME} {timestamp}] {message}")
}

/// A git working tree rooted at `root`.
#[derive(Debug, Clone)]
pub struct Repository {
    root: PathBuf,
    runner: CommandRunner,
}

impl Repository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            runner: CommandRunner::new(root.clone()),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `<root>/.git` exists and is a directory.
    pub fn is_started(&self) -> bool {
        self.root.join(GIT_DIR).is_dir()
    }

    /// Run `git init` unless the repository already exists.
    ///
    /// Returns `true` when a repository was created.
    pub fn ensure_started(&self, logger: &Logger) -> Result<bool, SyncError> {
        if self.is_started() {
            tracing::debug!("{} is already a git repository", self.root.display());
            return Ok(false);
        }
        logger.info("Initializing empty git repository...");
        self.runner.run("git init")?;
        Ok(true)
    }

    /// Make sure `.gitignore` lists the tool's own files.
    ///
    /// Returns the number of lines appended.
    pub fn ensure_ignore_fine(&self) -> Result<usize, SyncError> {
        let path = ignore::ignore_path_at(&self.root);
        Ok(ignore::ensure_entries(&path, &REQUIRED_IGNORE_ENTRIES)?)
    }

    /// Whether `git status .` reports anything to commit.
    pub fn has_changes(&self) -> Result<bool, SyncError> {
        let out = self.runner.run_text("git status .")?;
        Ok(!is_clean_status(&out))
    }

    /// Stage everything and commit with a timestamped message.
    ///
    /// Returns the full commit message used.
    pub fn commit_all(&self, message: &str) -> Result<String, SyncError> {
        let full = commit_message(message, &timestamp());
        self.runner.run("git add -A")?;
        self.runner
            .run(&format!("git commit -m {}", shell_quote(&full)))?;
        tracing::info!("committed: {full}");
        Ok(full)
    }
}
