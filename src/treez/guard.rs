//! # Access Guard
//!
//! Every operation is sandboxed to a single [`Root`] directory. The root is
//! canonicalized once at construction; every caller-supplied path is resolved
//! (symlinks included, as far as the path exists) and compared against it
//! before any filesystem call. A plain string-prefix comparison would miss
//! `..` traversal and symlink escapes, so containment works on resolved
//! paths only.

use crate::error::{Result, TreezError};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// The sandbox boundary for all tree operations: an absolute, existing
/// directory outside of which nothing is read, written, renamed or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root(PathBuf);

impl Root {
    /// Builds a root from an absolute path to an existing directory.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_absolute() {
            return Err(TreezError::BadRequest(format!(
                "root must be an absolute path: {}",
                path.display()
            )));
        }
        let canonical = path.canonicalize().map_err(|_| {
            TreezError::NotFound(format!("root does not exist: {}", path.display()))
        })?;
        if !canonical.is_dir() {
            return Err(TreezError::NotADirectory(canonical.display().to_string()));
        }
        Ok(Self(canonical))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Joins a caller-relative path onto the root and checks containment.
    pub fn join(&self, relative: impl AsRef<Path>) -> Result<PathBuf> {
        let joined = self.0.join(relative.as_ref());
        self.check_access(&joined)?;
        Ok(joined)
    }

    /// Fails with `AccessDenied` unless `path` resolves to the root itself or
    /// a descendant of it.
    pub fn check_access(&self, path: &Path) -> Result<()> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.0.join(path)
        };
        let resolved = resolve_for_containment(&absolute);
        if resolved.starts_with(&self.0) {
            Ok(())
        } else {
            Err(TreezError::AccessDenied(path.display().to_string()))
        }
    }
}

/// Folds `.` and `..` out of `path` lexically. Popping past the filesystem
/// root is a no-op, so `/../etc` resolves to `/etc`.
fn normalize_lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Canonicalizes the deepest existing ancestor of `path` (resolving
/// symlinks), then re-appends the not-yet-existing tail. The input must
/// already be free of `.`/`..` components for the tail append to be sound,
/// which [`normalize_lexical`] guarantees.
fn resolve_for_containment(path: &Path) -> PathBuf {
    let normalized = normalize_lexical(path);

    let mut existing = normalized.clone();
    let mut tail: Vec<OsString> = Vec::new();
    while !existing.as_os_str().is_empty() && existing.symlink_metadata().is_err() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = parent.to_path_buf();
            }
            _ => break,
        }
    }

    let mut resolved = existing.canonicalize().unwrap_or(existing);
    for name in tail.iter().rev() {
        resolved.push(name);
    }
    resolved
}
