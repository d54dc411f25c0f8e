//! File system utilities for packaging.
//!
//! Small helpers over `tokio::fs` with automatic parent-directory creation
//! and path-annotated errors.

use crate::packager::error::{ErrorExt, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        crate::bail!("{from:?} does not exist");
    }
    if !from.is_file() {
        crate::bail!("{from:?} is not a file");
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating destination directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", to)?;
    Ok(())
}

/// Returns true when both files exist and have byte-identical content.
pub async fn content_equals(a: &Path, b: &Path) -> Result<bool> {
    if !a.is_file() || !b.is_file() {
        return Ok(false);
    }
    let left = fs::read(a).await.fs_context("reading file", a)?;
    let right = fs::read(b).await.fs_context("reading file", b)?;
    Ok(left == right)
}

/// Finds the most-recently-modified file in `dir` with the given extension.
///
/// Returns `None` when no matching file exists.
pub async fn newest_file_with_extension(dir: &Path, extension: &str) -> Result<Option<PathBuf>> {
    let mut newest: Option<(PathBuf, std::time::SystemTime)> = None;

    let mut entries = fs::read_dir(dir)
        .await
        .fs_context("listing directory", dir)?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("listing directory", dir)?
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        let metadata = entry
            .metadata()
            .await
            .fs_context("reading file metadata", &path)?;
        let modified = metadata.modified().fs_context("reading mtime", &path)?;
        match &newest {
            Some((_, best)) if *best >= modified => {}
            _ => newest = Some((path, modified)),
        }
    }

    Ok(newest.map(|(path, _)| path))
}
