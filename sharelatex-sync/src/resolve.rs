//! Effective project id resolution.
//!
//! | supplied | saved           | result                      |
//! |----------|-----------------|-----------------------------|
//! | some     | some, equal     | that id                     |
//! | some     | some, different | decided by [`ConflictPolicy`] |
//! | some     | none            | supplied                    |
//! | none     | some            | saved                       |
//! | none     | none            | [`SyncError::NoIdentifier`] |

use std::io::{BufRead, Write};

use sharelatex_core::{ConflictPolicy, ProjectId};

use crate::error::SyncError;

/// Answer to an id conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Saved,
    Supplied,
}

/// Asks the user which id to keep when supplied and saved ids differ.
pub trait Prompter {
    fn choose(&mut self, saved: &ProjectId, supplied: &ProjectId) -> Result<Choice, SyncError>;
}

/// Console prompt: `1` keeps the saved id, `2` or a blank answer takes the
/// supplied one. Anything else asks again.
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl ConsolePrompter<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

fn prompt_err(e: std::io::Error) -> SyncError {
    SyncError::Prompt(e.to_string())
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn choose(&mut self, saved: &ProjectId, supplied: &ProjectId) -> Result<Choice, SyncError> {
        loop {
            writeln!(
                self.output,
                "Conflicting ids. Given {supplied}, but previous records show {saved}. Which to use?\n1. {saved} [old]\n2. {supplied} [new]"
            )
            .map_err(prompt_err)?;
            write!(self.output, "Id to use [blank = 2.] -> ").map_err(prompt_err)?;
            self.output.flush().map_err(prompt_err)?;

            let mut answer = String::new();
            if self.input.read_line(&mut answer).map_err(prompt_err)? == 0 {
                return Err(SyncError::Prompt("no answer on standard input".to_string()));
            }
            match answer.trim() {
                "1" => return Ok(Choice::Saved),
                "" | "2" => return Ok(Choice::Supplied),
                other => tracing::debug!("ignoring answer '{other}'"),
            }
        }
    }
}

/// Pick the id to sync from the supplied and saved values.
///
/// `prompter` is only consulted under [`ConflictPolicy::Prompt`].
pub fn resolve(
    supplied: Option<ProjectId>,
    saved: Option<ProjectId>,
    policy: ConflictPolicy,
    prompter: &mut dyn Prompter,
) -> Result<ProjectId, SyncError> {
    match (supplied, saved) {
        (None, None) => Err(SyncError::NoIdentifier),
        (Some(supplied), None) => Ok(supplied),
        (None, Some(saved)) => Ok(saved),
        (Some(supplied), Some(saved)) if supplied == saved => Ok(supplied),
        (Some(supplied), Some(saved)) => {
            let choice = match policy {
                ConflictPolicy::Prompt => prompter.choose(&saved, &supplied)?,
                ConflictPolicy::PreferSaved => Choice::Saved,
                ConflictPolicy::PreferSupplied => Choice::Supplied,
                ConflictPolicy::Error => {
                    return Err(SyncError::IdentifierConflict { saved, supplied })
                }
            };
            Ok(match choice {
                Choice::Saved => saved,
                Choice::Supplied => supplied,
            })
        }
    }
}
