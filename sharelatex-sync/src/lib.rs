//! # sharelatex-sync
//!
//! Download a ShareLaTeX project archive into a git working tree and commit
//! the result.
//!
//! Call [`pipeline::run`] with [`SyncOptions`] for a complete run; the
//! building blocks ([`Repository`], [`Fetcher`], [`resolve`]) are public for
//! callers that need a single step.

pub mod error;
pub mod fetch;
pub mod logger;
pub mod pipeline;
pub mod repo;
pub mod resolve;
pub mod runner;

pub use error::{FetchError, SyncError};
pub use fetch::{Extracted, FetchReport, Fetcher};
pub use logger::{LogLine, LogStyle, Logger};
pub use pipeline::{SyncOptions, SyncOutcome};
pub use repo::Repository;
pub use resolve::{resolve, Choice, ConsolePrompter, Prompter};
pub use runner::CommandRunner;
