//! The default (and only) action: fetch, commit, remember the id.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use sharelatex_core::{
    types::{DEFAULT_COMMIT_MESSAGE, DEFAULT_URL_TEMPLATE, ID_PLACEHOLDER},
    ProjectId,
};
use sharelatex_sync::{
    pipeline::{self, SyncOptions},
    ConsolePrompter, LogStyle, Logger,
};

use super::super::ConflictPolicyArg;

/// Arguments for a sync run.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// ShareLaTeX project id. Defaults to the id saved by the previous run.
    pub id: Option<String>,

    /// Working directory to sync into (defaults to the current directory).
    #[arg(long, short = 'd', value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// What to do when ID differs from the saved id: prompt | saved | supplied | error.
    #[arg(long, value_name = "POLICY", default_value = "prompt")]
    pub on_conflict: ConflictPolicyArg,

    /// Move the contents of the archive's LaTeX/ folder to the top level.
    #[arg(long)]
    pub flatten: bool,

    /// Commit message (prefixed with the tool name and a timestamp).
    #[arg(long, short = 'm', default_value = DEFAULT_COMMIT_MESSAGE)]
    pub message: String,

    /// Download URL; `{id}` is replaced by the project id.
    #[arg(long, value_name = "URL", default_value = DEFAULT_URL_TEMPLATE)]
    pub url_template: String,

    /// Never emit ANSI colors.
    #[arg(long)]
    pub no_color: bool,

    /// Omit the `[YYYY/MM/DD HH:MM:SS]` prefix on status lines.
    #[arg(long)]
    pub no_timestamps: bool,
}

impl SyncArgs {
    pub fn log_style(&self) -> LogStyle {
        let detected = LogStyle::detect();
        LogStyle {
            color: detected.color && !self.no_color,
            timestamps: !self.no_timestamps,
        }
    }

    fn options(&self) -> Result<SyncOptions> {
        if !self.url_template.contains(ID_PLACEHOLDER) {
            bail!(
                "URL template '{}' must contain {ID_PLACEHOLDER}",
                self.url_template
            );
        }

        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("could not determine current directory")?,
        };
        let dir = dir
            .canonicalize()
            .with_context(|| format!("cannot resolve directory '{}'", dir.display()))?;

        let mut options = SyncOptions::new(dir);
        options.supplied = self.id.as_deref().and_then(ProjectId::parse);
        options.policy = self.on_conflict.into();
        options.flatten = self.flatten;
        options.message = self.message.clone();
        options.url_template = self.url_template.clone();
        Ok(options)
    }

    pub fn run(self, logger: &Logger) -> Result<()> {
        let options = self.options()?;
        let mut prompter = ConsolePrompter::stdio();
        let outcome = pipeline::run(&options, logger, &mut prompter)?;
        log::debug!("{outcome:?}");
        Ok(())
    }
}
