//! Identifier store: the last used project id, persisted as a single line
//! in `<dir>/.sharelatex-git`.
//!
//! Writes use an atomic `.tmp` + rename so a crash never leaves a truncated
//! id behind.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{io_err, CoreError};
use crate::types::{ProjectId, ID_STORE_FILE};

/// Path to the identifier store inside `dir`.
pub fn store_path_at(dir: &Path) -> PathBuf {
    dir.join(ID_STORE_FILE)
}

/// Read the saved project id.
///
/// Any failure (missing file, permissions, invalid UTF-8) and a blank first
/// line are all reported as "nothing saved".
pub fn read_saved(dir: &Path) -> Option<ProjectId> {
    let path = store_path_at(dir);
    let file = match std::fs::File::open(&path) {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!("no saved id at {}: {e}", path.display());
            return None;
        }
    };
    let mut first = String::new();
    if let Err(e) = BufReader::new(file).read_line(&mut first) {
        tracing::debug!("unreadable id store {}: {e}", path.display());
        return None;
    }
    ProjectId::parse(&first)
}

/// Overwrite the saved project id with `id` followed by a newline.
pub fn write_saved(dir: &Path, id: &ProjectId) -> Result<(), CoreError> {
    let path = store_path_at(dir);
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, format!("{id}\n")).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, &path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(&path, e));
    }
    tracing::debug!("saved id '{id}' to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_saved(tmp.path()), None);
    }

    #[test]
    fn roundtrip_write_read() {
        let tmp = TempDir::new().unwrap();
        let id = ProjectId::from("5a1b2c3d4e");
        write_saved(tmp.path(), &id).unwrap();
        assert_eq!(read_saved(tmp.path()), Some(id));
        let raw = std::fs::read_to_string(store_path_at(tmp.path())).unwrap();
        assert_eq!(raw, "5a1b2c3d4e\n");
    }

    #[test]
    fn only_first_line_is_used() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(store_path_at(tmp.path()), "  first  \nsecond\n").unwrap();
        assert_eq!(read_saved(tmp.path()), Some(ProjectId::from("first")));
    }

    #[test]
    fn blank_file_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(store_path_at(tmp.path()), "\n").unwrap();
        assert_eq!(read_saved(tmp.path()), None);
    }

    #[test]
    fn write_overwrites_previous_value() {
        let tmp = TempDir::new().unwrap();
        write_saved(tmp.path(), &ProjectId::from("old1")).unwrap();
        write_saved(tmp.path(), &ProjectId::from("new2")).unwrap();
        assert_eq!(read_saved(tmp.path()), Some(ProjectId::from("new2")));
        assert!(!store_path_at(tmp.path()).with_extension("tmp").exists());
    }

    #[test]
    fn write_into_missing_dir_fails_with_path() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let err = write_saved(&missing, &ProjectId::from("x")).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }), "got: {err}");
        assert!(err.to_string().contains("nope"));
    }
}
