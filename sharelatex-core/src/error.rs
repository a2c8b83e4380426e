//! Error types for sharelatex-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from identifier-store and ignore-file operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Underlying I/O failure, annotated with the path being touched.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ignore file must exist before a run; it is never created here.
    #[error("ignore file not found at {path}; create it before syncing")]
    IgnoreFileMissing { path: PathBuf },
}

/// Convenience constructor for [`CoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
