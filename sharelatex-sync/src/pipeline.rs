//! Sync pipeline entrypoint used by the CLI.
//!
//! Fixed order: resolve id → `git init` if needed → fix `.gitignore` →
//! fetch → commit if changed → persist id.

use std::path::PathBuf;

use sharelatex_core::{
    id_store,
    types::{DEFAULT_COMMIT_MESSAGE, DEFAULT_URL_TEMPLATE},
    ConflictPolicy, ProjectId,
};

use crate::error::SyncError;
use crate::fetch::{FetchReport, Fetcher};
use crate::logger::Logger;
use crate::repo::Repository;
use crate::resolve::{resolve, Prompter};

/// Inputs of a single sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Working directory holding the git repository.
    pub dir: PathBuf,
    /// Id given on the command line, if any.
    pub supplied: Option<ProjectId>,
    pub policy: ConflictPolicy,
    /// Move the contents of the `LaTeX/` folder up after extraction.
    pub flatten: bool,
    pub message: String,
    pub url_template: String,
}

impl SyncOptions {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            supplied: None,
            policy: ConflictPolicy::default(),
            flatten: false,
            message: DEFAULT_COMMIT_MESSAGE.to_string(),
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub project_id: ProjectId,
    /// A new git repository was created.
    pub initialized: bool,
    /// Lines appended to `.gitignore`.
    pub ignore_appended: usize,
    /// Full commit message, when a commit was made.
    pub committed: Option<String>,
    pub fetch: FetchReport,
}

/// Run the whole sync for `options`.
pub fn run(
    options: &SyncOptions,
    logger: &Logger,
    prompter: &mut dyn Prompter,
) -> Result<SyncOutcome, SyncError> {
    let saved = id_store::read_saved(&options.dir);
    let project_id = resolve(options.supplied.clone(), saved, options.policy, prompter)?;
    tracing::info!("syncing project '{project_id}' into {}", options.dir.display());

    let repo = Repository::new(&options.dir);
    let initialized = repo.ensure_started(logger)?;
    let ignore_appended = repo.ensure_ignore_fine()?;

    let fetcher = Fetcher::new(options.url_template.as_str(), &options.dir);
    let fetch = fetcher.fetch(&project_id, options.flatten, logger)?;

    let committed = if repo.has_changes()? {
        logger.info(&format!("Comitting changes. Message: {}", options.message));
        Some(repo.commit_all(&options.message)?)
    } else {
        logger.info("No changes to commit.");
        None
    };

    if let Err(e) = id_store::write_saved(&options.dir, &project_id) {
        tracing::warn!("{e}");
        logger.warn("Problem creating .sharelatex-git file");
    }

    logger.info("All done!");
    Ok(SyncOutcome {
        project_id,
        initialized,
        ignore_appended,
        committed,
        fetch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::LogStyle;
    use crate::resolve::Choice;
    use tempfile::TempDir;

    struct NoPrompt;

    impl Prompter for NoPrompt {
        fn choose(&mut self, _: &ProjectId, _: &ProjectId) -> Result<Choice, SyncError> {
            panic!("prompt must not be shown")
        }
    }

    fn quiet() -> Logger {
        Logger::new(LogStyle {
            color: false,
            timestamps: false,
        })
    }

    #[test]
    fn options_default_to_no_flatten_and_placeholder_message() {
        let options = SyncOptions::new("/tmp/x");
        assert!(!options.flatten);
        assert_eq!(options.message, "Adding files test");
        assert_eq!(options.policy, ConflictPolicy::Prompt);
        assert!(options.url_template.contains("{id}"));
    }

    #[test]
    fn no_identifier_fails_before_touching_the_directory() {
        let tmp = TempDir::new().unwrap();
        let options = SyncOptions::new(tmp.path());
        let err = run(&options, &quiet(), &mut NoPrompt).unwrap_err();
        assert!(matches!(err, SyncError::NoIdentifier));
        assert!(!tmp.path().join(".git").exists());
    }

    #[test]
    fn missing_ignore_file_stops_before_fetch_and_saves_no_id() {
        let tmp = TempDir::new().unwrap();
        let mut options = SyncOptions::new(tmp.path());
        options.supplied = Some(ProjectId::from("abc123"));
        options.url_template = "http://127.0.0.1:9/{id}".to_string();

        let err = run(&options, &quiet(), &mut NoPrompt).unwrap_err();
        assert!(matches!(err, SyncError::Core(_)), "got: {err}");
        assert!(tmp.path().join(".git").is_dir());
        assert!(id_store::read_saved(tmp.path()).is_none());
    }

    #[test]
    fn failed_fetch_does_not_persist_id() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(".gitignore"), "").unwrap();
        let mut options = SyncOptions::new(tmp.path());
        options.supplied = Some(ProjectId::from("abc123"));
        options.url_template = "http://127.0.0.1:9/project/{id}/download/zip".to_string();

        let err = run(&options, &quiet(), &mut NoPrompt).unwrap_err();
        assert!(matches!(err, SyncError::Fetch(_)), "got: {err}");
        assert!(err.to_string().starts_with("fetch failed"));
        assert!(id_store::read_saved(tmp.path()).is_none());
    }
}
