//! Renumbering a directory renames folders, which silently breaks any path
//! that was recorded before the shift ran. [`PathRemapper`] is the ledger a
//! shift leaves behind: old folder path → new folder path, so pending work
//! (and callers holding references into the tree) can rewrite paths that
//! traverse a renumbered ancestor.

use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct RemapEntry {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Table of folder paths renamed during one renumbering pass.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct PathRemapper {
    entries: Vec<RemapEntry>,
}

impl PathRemapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, from: PathBuf, to: PathBuf) {
        self.entries.push(RemapEntry { from, to });
    }

    pub fn merge(&mut self, other: PathRemapper) {
        self.entries.extend(other.entries);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[RemapEntry] {
        &self.entries
    }

    /// Rewrites `path` if it is, or descends from, a renamed folder.
    /// Unaffected paths come back unchanged.
    pub fn rewrite(&self, path: &Path) -> PathBuf {
        for entry in &self.entries {
            if let Ok(rest) = path.strip_prefix(&entry.from) {
                return if rest.as_os_str().is_empty() {
                    entry.to.clone()
                } else {
                    entry.to.join(rest)
                };
            }
        }
        path.to_path_buf()
    }
}
