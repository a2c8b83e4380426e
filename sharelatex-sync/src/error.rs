//! Error types for sharelatex-sync.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use sharelatex_core::{CoreError, ProjectId};

/// Everything that can go wrong while downloading and unpacking a project.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure or a non-2xx response.
    #[error("download of {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The response body was not a readable zip archive.
    #[error("invalid project archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// An entry would be written outside the destination directory.
    #[error("archive entry '{name}' escapes the destination directory")]
    UnsafeEntry { name: String },

    /// An entry would write into the repository's git metadata.
    #[error("archive entry '{name}' would modify git metadata")]
    ProtectedEntry { name: String },

    #[error("expected folder {path} in the project archive")]
    MissingSubfolder { path: PathBuf },
}

/// All errors that can arise from a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Identifier store or ignore-file failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// A shell command exited unsuccessfully.
    #[error("Error executing \"{command}\": {status}")]
    Command { command: String, status: ExitStatus },

    /// The shell itself could not be started.
    #[error("could not run \"{command}\": {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No id supplied! See (-h) for usage.")]
    NoIdentifier,

    #[error("conflicting ids: given {supplied}, but previous records show {saved}")]
    IdentifierConflict { saved: ProjectId, supplied: ProjectId },

    /// The interactive prompt could not read an answer.
    #[error("id prompt failed: {0}")]
    Prompt(String),
}

/// Convenience constructor for [`FetchError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> FetchError {
    FetchError::Io {
        path: path.into(),
        source,
    }
}
