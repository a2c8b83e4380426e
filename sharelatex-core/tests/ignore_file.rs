//! Ignore-file maintenance against real files: idempotency, order
//! preservation and the no-auto-create precondition.

use assert_fs::prelude::*;
use predicates::prelude::predicate;
use sharelatex_core::{
    ignore::{ensure_entries, ignore_path_at},
    types::REQUIRED_IGNORE_ENTRIES,
    CoreError,
};
use std::fs;

fn lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read ignore file")
        .lines()
        .map(str::to_owned)
        .collect()
}

// ---------------------------------------------------------------------------
// 1. Appending
// ---------------------------------------------------------------------------

#[test]
fn appends_all_three_after_unrelated_entries() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child(".gitignore");
    file.write_str("*.aux\n*.log\n").expect("seed");

    let appended = ensure_entries(file.path(), &REQUIRED_IGNORE_ENTRIES).expect("ensure");
    assert_eq!(appended, 3);
    assert_eq!(
        lines(file.path()),
        vec!["*.aux", "*.log", "sharelatex-git.py", "sharelatex-git", ".sharelatex-git"]
    );
}

#[test]
fn appends_only_the_missing_entry() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child(".gitignore");
    file.write_str(".sharelatex-git\nbuild/\nsharelatex-git.py\n")
        .expect("seed");

    let appended = ensure_entries(file.path(), &REQUIRED_IGNORE_ENTRIES).expect("ensure");
    assert_eq!(appended, 1);
    assert_eq!(
        lines(file.path()),
        vec![".sharelatex-git", "build/", "sharelatex-git.py", "sharelatex-git"]
    );
}

#[test]
fn file_without_trailing_newline_keeps_last_line() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child(".gitignore");
    file.write_str("*.pdf").expect("seed");

    ensure_entries(file.path(), &REQUIRED_IGNORE_ENTRIES).expect("ensure");
    file.assert(predicate::str::starts_with("*.pdf\nsharelatex-git.py\n"));
}

#[test]
fn empty_file_gets_exactly_the_required_lines() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child(".gitignore");
    file.touch().expect("touch");

    ensure_entries(file.path(), &REQUIRED_IGNORE_ENTRIES).expect("ensure");
    file.assert("sharelatex-git.py\nsharelatex-git\n.sharelatex-git\n");
}

// ---------------------------------------------------------------------------
// 2. Idempotency
// ---------------------------------------------------------------------------

#[test]
fn second_run_appends_nothing() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child(".gitignore");
    file.write_str("*.aux\n").expect("seed");

    ensure_entries(file.path(), &REQUIRED_IGNORE_ENTRIES).expect("first");
    let before = fs::read_to_string(file.path()).expect("read");
    let appended = ensure_entries(file.path(), &REQUIRED_IGNORE_ENTRIES).expect("second");
    let after = fs::read_to_string(file.path()).expect("read");

    assert_eq!(appended, 0);
    assert_eq!(before, after);
    for entry in REQUIRED_IGNORE_ENTRIES {
        assert_eq!(
            lines(file.path()).iter().filter(|l| l.as_str() == entry).count(),
            1,
            "{entry} must appear exactly once"
        );
    }
}

#[test]
fn crlf_lines_count_as_present() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child(".gitignore");
    file.write_str("sharelatex-git.py\r\nsharelatex-git\r\n.sharelatex-git\r\n")
        .expect("seed");

    let appended = ensure_entries(file.path(), &REQUIRED_IGNORE_ENTRIES).expect("ensure");
    assert_eq!(appended, 0);
}

// ---------------------------------------------------------------------------
// 3. Precondition
// ---------------------------------------------------------------------------

#[test]
fn missing_ignore_file_is_an_error_and_not_created() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let path = ignore_path_at(dir.path());

    let err = ensure_entries(&path, &REQUIRED_IGNORE_ENTRIES).unwrap_err();
    assert!(matches!(err, CoreError::IgnoreFileMissing { .. }), "got: {err}");
    assert!(err.to_string().contains(".gitignore"));
    dir.child(".gitignore").assert(predicate::path::missing());
}
