//! Synchronous shell command execution.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::SyncError;

/// Runs shell commands inside a fixed working directory.
///
/// Stdout is captured; stderr is inherited so git diagnostics reach the user
/// directly.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    dir: PathBuf,
}

impl CommandRunner {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Run `command` through the platform shell and return its stdout.
    ///
    /// A non-zero exit status is an error carrying the command and status.
    pub fn run(&self, command: &str) -> Result<Vec<u8>, SyncError> {
        tracing::debug!("running `{command}` in {}", self.dir.display());
        let output = shell(command)
            .current_dir(&self.dir)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| SyncError::Spawn {
                command: command.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(SyncError::Command {
                command: command.to_string(),
                status: output.status,
            });
        }
        Ok(output.stdout)
    }

    /// Like [`run`](Self::run), decoding stdout lossily as UTF-8.
    pub fn run_text(&self, command: &str) -> Result<String, SyncError> {
        let stdout = self.run(command)?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

/// Quote `arg` as a single word for the platform shell.
#[cfg(not(windows))]
pub fn shell_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// Quote `arg` as a single word for the platform shell.
#[cfg(windows)]
pub fn shell_quote(arg: &str) -> String {
    format!("\"{}\"", arg.replace('"', "\"\""))
}
