//! Recursive file discovery under a source directory

use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::error::{Result, SourceError};

/// Suffixes left behind by editors and patch tools
const BACKUP_SUFFIXES: &[&str] = &["~", ".orig", ".rej", ".bak"];

/// Returns true if the file name marks a backup or editor artifact
pub fn is_backup_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            let name = name.to_string_lossy();
            BACKUP_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
        })
        .unwrap_or(false)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Lists every file under `root`, recursively, sorted by name
///
/// Hidden entries and backup files are skipped. Symlinks pointing at files
/// are included; directory symlinks are not followed.
pub fn scan(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            SourceError::read(path, io::Error::from(e))
        })?;

        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        if is_backup_file(entry.path()) {
            tracing::debug!(path = %entry.path().display(), "skipping backup file");
            continue;
        }

        files.push(entry.into_path());
    }

    Ok(files)
}
