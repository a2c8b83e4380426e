//! Project download and extraction.
//!
//! ## `Fetcher::fetch` steps
//!
//! 1. Substitute the project id into the URL template.
//! 2. Download the archive to `<dest>/sharelatex.zip`.
//! 3. Validate every entry: it must stay inside `<dest>` and must not touch
//!    git metadata.
//! 4. Extract all entries, overwriting existing files. Root-level files the
//!    tool owns (`.gitignore`, `.sharelatex-git`, `sharelatex.zip`) are skipped.
//! 5. Remove the downloaded archive.
//! 6. Optionally move the contents of `<dest>/LaTeX` up one level.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Component, Path, PathBuf};

use zip::ZipArchive;

use sharelatex_core::{
    types::{ARCHIVE_FILE, GIT_DIR, ID_PLACEHOLDER, ID_STORE_FILE, IGNORE_FILE, LATEX_SUBFOLDER},
    ProjectId,
};

use crate::error::{io_err, FetchError};
use crate::logger::Logger;

/// Root-level files maintained by the tool; archive copies never replace them.
const OWNED_FILES: [&str; 3] = [IGNORE_FILE, ID_STORE_FILE, ARCHIVE_FILE];

/// What a successful fetch retrieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub url: String,
    /// Number of archive entries extracted.
    pub entries: usize,
    /// Entries left out because they would replace a tool-owned file.
    pub skipped: Vec<PathBuf>,
}

/// Result of unpacking one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub entries: usize,
    pub skipped: Vec<PathBuf>,
}

/// Downloads project archives into a destination directory.
#[derive(Debug, Clone)]
pub struct Fetcher {
    url_template: String,
    dest: PathBuf,
}

impl Fetcher {
    pub fn new(url_template: impl Into<String>, dest: impl Into<PathBuf>) -> Self {
        Self {
            url_template: url_template.into(),
            dest: dest.into(),
        }
    }

    pub fn archive_url(&self, id: &ProjectId) -> String {
        self.url_template.replace(ID_PLACEHOLDER, id.as_str())
    }

    pub fn fetch(
        &self,
        id: &ProjectId,
        flatten: bool,
        logger: &Logger,
    ) -> Result<FetchReport, FetchError> {
        let url = self.archive_url(id);
        let archive = self.dest.join(ARCHIVE_FILE);

        logger.info(&format!("Downloading files from {url}..."));
        download(&url, &archive)?;

        logger.info("Decompressing files...");
        let extracted = extract_archive(&archive, &self.dest);
        if let Err(e) = std::fs::remove_file(&archive) {
            tracing::warn!("could not remove {}: {e}", archive.display());
        }
        let Extracted {
            entries,
            mut skipped,
        } = extracted?;

        if flatten {
            logger.info("Moving files out of LaTeX folder...");
            skipped.extend(flatten_subfolder(&self.dest, LATEX_SUBFOLDER)?);
        }

        for path in &skipped {
            logger.warn(&format!(
                "Skipping {} from the project archive; the local copy is kept.",
                path.display()
            ));
        }

        Ok(FetchReport {
            url,
            entries,
            skipped,
        })
    }
}

/// Stream the body of a GET to `url` into `target`.
fn download(url: &str, target: &Path) -> Result<(), FetchError> {
    tracing::debug!("GET {url}");
    let response = ureq::get(url).call().map_err(|e| FetchError::Http {
        url: url.to_string(),
        source: Box::new(e),
    })?;

    let file = File::create(target).map_err(|e| io_err(target, e))?;
    let mut writer = BufWriter::new(file);
    let mut body = response.into_reader();
    let bytes = io::copy(&mut body, &mut writer).map_err(|e| io_err(target, e))?;
    writer
        .into_inner()
        .map_err(|e| io_err(target, e.into_error()))?;
    tracing::debug!("downloaded {bytes} bytes to {}", target.display());
    Ok(())
}

/// Whether any component of `relative` names the git metadata directory.
fn touches_git_dir(relative: &Path) -> bool {
    relative.components().any(|c| match c {
        Component::Normal(part) => part
            .to_str()
            .is_some_and(|p| p.eq_ignore_ascii_case(GIT_DIR)),
        _ => false,
    })
}

fn is_owned_file(name: &OsStr) -> bool {
    OWNED_FILES.iter().any(|owned| name == OsStr::new(owned))
}

/// Validated location of an archive entry inside `dest`.
fn checked_path(name: &str, enclosed: Option<PathBuf>) -> Result<PathBuf, FetchError> {
    let Some(relative) = enclosed else {
        return Err(FetchError::UnsafeEntry {
            name: name.to_string(),
        });
    };
    if touches_git_dir(&relative) {
        return Err(FetchError::ProtectedEntry {
            name: name.to_string(),
        });
    }
    Ok(relative)
}

/// Extract every entry of the zip at `archive` into `dest`.
///
/// All entry names are checked before anything is written, so a rejected
/// archive leaves `dest` untouched.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<Extracted, FetchError> {
    let file = File::open(archive).map_err(|e| io_err(archive, e))?;
    let mut zip = ZipArchive::new(file)?;

    for i in 0..zip.len() {
        let entry = zip.by_index(i)?;
        checked_path(entry.name(), entry.enclosed_name())?;
    }

    let mut skipped = Vec::new();
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let relative = checked_path(entry.name(), entry.enclosed_name())?;
        if relative.components().count() == 1 && is_owned_file(relative.as_os_str()) {
            skipped.push(relative);
            continue;
        }
        let target = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| io_err(&target, e))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        let mut out = File::create(&target).map_err(|e| io_err(&target, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| io_err(&target, e))?;
    }

    let entries = zip.len() - skipped.len();
    tracing::debug!("extracted {entries} entries into {}", dest.display());
    Ok(Extracted { entries, skipped })
}

/// Move everything inside `<dest>/<subfolder>` to `dest`, then remove the
/// subfolder. Existing entries with the same name are replaced, except git
/// metadata (an error) and tool-owned files (left behind and returned).
pub fn flatten_subfolder(dest: &Path, subfolder: &str) -> Result<Vec<PathBuf>, FetchError> {
    let source = dest.join(subfolder);
    if !source.is_dir() {
        return Err(FetchError::MissingSubfolder { path: source });
    }

    let mut moves = Vec::new();
    let mut skipped = Vec::new();
    for entry in std::fs::read_dir(&source).map_err(|e| io_err(&source, e))? {
        let entry = entry.map_err(|e| io_err(&source, e))?;
        let name = entry.file_name();
        if touches_git_dir(Path::new(&name)) {
            return Err(FetchError::ProtectedEntry {
                name: Path::new(subfolder).join(&name).display().to_string(),
            });
        }
        if is_owned_file(&name) {
            skipped.push(Path::new(subfolder).join(&name));
        } else {
            moves.push((entry.path(), dest.join(&name)));
        }
    }

    for (from, to) in moves {
        remove_existing(&to)?;
        std::fs::rename(&from, &to).map_err(|e| io_err(&to, e))?;
    }

    std::fs::remove_dir_all(&source).map_err(|e| io_err(&source, e))?;
    Ok(skipped)
}

fn remove_existing(path: &Path) -> Result<(), FetchError> {
    let result = match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(path),
        Ok(_) => std::fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => Err(e),
    };
    result.map_err(|e| io_err(path, e))
}
