//! Gemspec file discovery.

use crate::packager::error::{Error, ErrorExt, Result};
use std::path::{Path, PathBuf};

/// Outcome of scanning a directory for gemspec files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// Exactly one gemspec file was found.
    Found(PathBuf),
    /// No gemspec file is present.
    NotFound,
    /// Several gemspec files are present.
    Ambiguous(Vec<PathBuf>),
}

/// Scans a directory (non-recursively) for `*.gemspec` files.
pub async fn discover_gemspec(dir: &Path) -> Result<Discovery> {
    let mut candidates = Vec::new();

    let mut entries = tokio::fs::read_dir(dir)
        .await
        .fs_context("scanning for gemspec files", dir)?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("scanning for gemspec files", dir)?
    {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("gemspec") {
            candidates.push(path);
        }
    }

    candidates.sort();
    match candidates.len() {
        0 => Ok(Discovery::NotFound),
        1 => Ok(Discovery::Found(candidates.remove(0))),
        _ => Ok(Discovery::Ambiguous(candidates)),
    }
}

impl Discovery {
    /// Maps the discovery outcome onto the documented failure semantics:
    /// zero or more than one candidate is a fatal configuration error.
    pub fn into_single(self, dir: &Path) -> Result<PathBuf> {
        match self {
            Discovery::Found(path) => Ok(path),
            Discovery::NotFound => Err(Error::GemspecNotFound {
                dir: dir.to_path_buf(),
            }),
            Discovery::Ambiguous(candidates) => Err(Error::AmbiguousGemspec {
                dir: dir.to_path_buf(),
                count: candidates.len(),
                candidates,
            }),
        }
    }
}
