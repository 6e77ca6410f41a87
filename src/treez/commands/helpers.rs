use crate::error::{Result, TreezError};
use crate::guard::Root;
use crate::ordinal;
use crate::remap::PathRemapper;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Prefix used for every intermediate rename. Entries carrying it are never
/// part of an ordered sequence; `doctor` reports any that get stranded.
pub const TEMP_PREFIX: &str = ".tmp-";

/// An ordinal-named entry of one directory.
#[derive(Debug, Clone)]
pub struct Sibling {
    pub name: String,
    pub ordinal: u64,
    pub base: String,
}

/// Resolves a root-relative folder and requires it to be an existing
/// directory.
pub fn resolve_dir(root: &Root, folder: &str) -> Result<PathBuf> {
    let dir = root.join(folder)?;
    if !dir.exists() {
        return Err(TreezError::NotFound(format!(
            "folder not found: {}",
            display_folder(folder)
        )));
    }
    if !dir.is_dir() {
        return Err(TreezError::NotADirectory(display_folder(folder).to_string()));
    }
    Ok(dir)
}

pub fn display_folder(folder: &str) -> &str {
    if folder.is_empty() {
        "<root>"
    } else {
        folder
    }
}

/// The ordinal-named entries of `dir` in sequence order (full-name
/// lexicographic, which equals numeric order at fixed width).
pub fn ordinal_siblings(dir: &Path) -> Result<Vec<Sibling>> {
    let mut siblings = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name_os = entry.file_name();
        let name = match name_os.to_str() {
            Some(n) => n,
            None => continue,
        };
        if !ordinal::is_ordinal_name(name) {
            continue;
        }
        let parsed = ordinal::parse(name);
        if let Some(ord) = parsed.ordinal {
            siblings.push(Sibling {
                name: name.to_string(),
                ordinal: ord,
                base: parsed.base.to_string(),
            });
        }
    }
    siblings.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(siblings)
}

/// A collision-free temporary name inside `dir`.
pub fn unique_temp_name(dir: &Path) -> PathBuf {
    loop {
        let candidate = dir.join(format!("{}{}", TEMP_PREFIX, Uuid::new_v4()));
        if !candidate.exists() {
            return candidate;
        }
    }
}

/// Opens a gap for insertion: every ordinal sibling of `dir` with ordinal
/// >= `from_ordinal` (and not named in `ignore`) is renamed to
/// `ordinal + n`. Entries are processed in descending ordinal order so a
/// rename never lands on a still-occupied name. Returns the old→new path
/// table for every renamed directory.
pub fn shift_ordinals_down(
    n: u64,
    dir: &Path,
    from_ordinal: u64,
    root: &Root,
    ignore: Option<&[&str]>,
) -> Result<PathRemapper> {
    let mut remap = PathRemapper::new();
    if n == 0 {
        return Ok(remap);
    }

    let mut targets: Vec<Sibling> = ordinal_siblings(dir)?
        .into_iter()
        .filter(|s| s.ordinal >= from_ordinal)
        .filter(|s| match ignore {
            Some(names) => !names.contains(&s.name.as_str()),
            None => true,
        })
        .collect();
    targets.sort_by(|a, b| b.ordinal.cmp(&a.ordinal));

    for sibling in targets {
        let old_path = dir.join(&sibling.name);
        let new_name = format!("{}{}", ordinal::format(sibling.ordinal + n), sibling.base);
        let new_path = dir.join(&new_name);
        root.check_access(&old_path)?;
        root.check_access(&new_path)?;
        let is_dir = old_path.is_dir();
        fs::rename(&old_path, &new_path)?;
        if is_dir {
            remap.record(old_path, new_path);
        }
    }
    Ok(remap)
}
