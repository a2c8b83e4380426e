//! sharelatex-core — domain types, identifier store, ignore-file maintenance.
//!
//! - [`types`] — [`ProjectId`], [`ConflictPolicy`] and the fixed file names
//! - [`id_store`] — read / write the persisted project id
//! - [`ignore`] — keep the required entries in `.gitignore`
//! - [`error`] — [`CoreError`]

pub mod error;
pub mod id_store;
pub mod ignore;
pub mod types;

pub use error::CoreError;
pub use types::{ConflictPolicy, ProjectId};
