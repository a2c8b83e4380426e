//! Ignore-file maintenance.
//!
//! Guarantees that a set of required lines is present in `.gitignore`
//! exactly once. Existing lines are never touched or reordered; missing
//! entries are appended in the order given.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{io_err, CoreError};
use crate::types::IGNORE_FILE;

/// Path to the ignore file inside `dir`.
pub fn ignore_path_at(dir: &Path) -> PathBuf {
    dir.join(IGNORE_FILE)
}

/// Entries of `required` that no line of `existing` matches (after trimming).
pub fn missing_entries<'a>(existing: &str, required: &[&'a str]) -> Vec<&'a str> {
    let present: Vec<&str> = existing.lines().map(str::trim).collect();
    let mut missing: Vec<&'a str> = Vec::new();
    for &entry in required {
        if !present.contains(&entry) && !missing.contains(&entry) {
            missing.push(entry);
        }
    }
    missing
}

/// Append every entry of `required` not already present in the file at `path`.
///
/// The file must exist. Returns the number of lines appended.
pub fn ensure_entries(path: &Path, required: &[&str]) -> Result<usize, CoreError> {
    let existing = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CoreError::IgnoreFileMissing {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(io_err(path, e)),
    };

    let missing = missing_entries(&existing, required);
    if missing.is_empty() {
        tracing::debug!("{} already complete", path.display());
        return Ok(0);
    }

    let mut addition = String::new();
    // Keep the last existing line intact when the file lacks a final newline.
    if !existing.is_empty() && !existing.ends_with('\n') {
        addition.push('\n');
    }
    for entry in &missing {
        addition.push_str(entry);
        addition.push('\n');
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| io_err(path, e))?;
    file.write_all(addition.as_bytes())
        .map_err(|e| io_err(path, e))?;

    tracing::info!("appended {} entries to {}", missing.len(), path.display());
    Ok(missing.len())
}
