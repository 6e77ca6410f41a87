//! Consistency check for ordered directories.
//!
//! The engine's multi-step renames are not atomic: a crash mid-swap or
//! mid-paste can strand a `.tmp-` entry or leave two siblings sharing an
//! ordinal. Nothing repairs that automatically; doctor is the explicit
//! tool. By default it only reports; with `fix` it renumbers collided
//! sequences (preserving their current name order) and returns the same
//! old→new folder table the renumbering helpers produce. Temp leftovers are
//! only ever reported: they may hold unsaved content, so deleting them is
//! the operator's call.

use super::helpers::{ordinal_siblings, resolve_dir, Sibling, TEMP_PREFIX};
use crate::error::Result;
use crate::guard::Root;
use crate::ordinal;
use crate::remap::PathRemapper;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct DuplicateOrdinal {
    /// Folder the collision lives in, relative to the scanned one.
    pub folder: PathBuf,
    pub ordinal: u64,
    pub names: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DoctorOutcome {
    pub success: bool,
    pub message: String,
    /// Stranded intermediate entries from interrupted swaps or pastes.
    pub temp_leftovers: Vec<PathBuf>,
    pub duplicate_ordinals: Vec<DuplicateOrdinal>,
    /// Entries renamed by a `fix` run.
    pub renumbered: usize,
    pub remap: PathRemapper,
}

pub fn run(root: &Root, folder: &str, fix: bool) -> Result<DoctorOutcome> {
    let dir = resolve_dir(root, folder)?;

    let mut temp_leftovers = Vec::new();
    let mut duplicates = Vec::new();
    let mut renumbered = 0;
    let mut remap = PathRemapper::new();

    let mut pending = vec![dir.clone()];
    while let Some(current) = pending.pop() {
        scan_dir(&current, &dir, &mut temp_leftovers, &mut duplicates)?;

        if fix && duplicates.iter().any(|d| dir.join(&d.folder) == current) {
            let (count, table) = renumber(&current)?;
            renumbered += count;
            remap.merge(table);
        }

        for entry in fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            }
        }
    }

    let clean = temp_leftovers.is_empty() && duplicates.is_empty();
    let message = if clean {
        "No problems found".to_string()
    } else if fix {
        format!(
            "Found {} temp leftovers, {} ordinal collisions; renumbered {} entries",
            temp_leftovers.len(),
            duplicates.len(),
            renumbered
        )
    } else {
        format!(
            "Found {} temp leftovers, {} ordinal collisions",
            temp_leftovers.len(),
            duplicates.len()
        )
    };

    Ok(DoctorOutcome {
        success: clean || fix,
        message,
        temp_leftovers,
        duplicate_ordinals: duplicates,
        renumbered,
        remap,
    })
}

fn scan_dir(
    current: &Path,
    scanned_root: &Path,
    temp_leftovers: &mut Vec<PathBuf>,
    duplicates: &mut Vec<DuplicateOrdinal>,
) -> Result<()> {
    let relative = current
        .strip_prefix(scanned_root)
        .unwrap_or(current)
        .to_path_buf();

    for entry in fs::read_dir(current)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            if name.starts_with(TEMP_PREFIX) {
                temp_leftovers.push(relative.join(name));
            }
        }
    }

    let siblings = ordinal_siblings(current)?;
    let mut i = 0;
    while i < siblings.len() {
        let mut j = i + 1;
        while j < siblings.len() && siblings[j].ordinal == siblings[i].ordinal {
            j += 1;
        }
        if j - i > 1 {
            duplicates.push(DuplicateOrdinal {
                folder: relative.clone(),
                ordinal: siblings[i].ordinal,
                names: siblings[i..j].iter().map(|s| s.name.clone()).collect(),
            });
        }
        i = j;
    }
    Ok(())
}

/// Reassigns ordinals in one directory so the sequence is collision-free
/// while keeping its current name order. Unchanged entries stay unchanged;
/// bumped entries move forward only. Renames are applied last-first so they
/// never land on a still-occupied name.
fn renumber(dir: &Path) -> Result<(usize, PathRemapper)> {
    let siblings = ordinal_siblings(dir)?;

    let mut assignments: Vec<(Sibling, u64)> = Vec::with_capacity(siblings.len());
    let mut next_free = 0u64;
    for sibling in siblings {
        let assigned = sibling.ordinal.max(next_free);
        next_free = assigned + 1;
        assignments.push((sibling, assigned));
    }

    let mut count = 0;
    let mut remap = PathRemapper::new();
    for (sibling, assigned) in assignments.into_iter().rev() {
        if assigned == sibling.ordinal {
            continue;
        }
        let old_path = dir.join(&sibling.name);
        let new_path = dir.join(format!("{}{}", ordinal::format(assigned), sibling.base));
        let is_dir = old_path.is_dir();
        fs::rename(&old_path, &new_path)?;
        if is_dir {
            remap.record(old_path, new_path);
        }
        count += 1;
    }
    Ok((count, remap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Root) {
        let dir = TempDir::new().unwrap();
        let root = Root::new(dir.path().to_path_buf()).unwrap();
        (dir, root)
    }

    #[test]
    fn clean_trees_report_nothing() {
        let (dir, root) = setup();
        fs::write(dir.path().join("0001_a.md"), "").unwrap();

        let outcome = run(&root, "", false).unwrap();
        assert!(outcome.success);
        assert!(outcome.temp_leftovers.is_empty());
        assert!(outcome.duplicate_ordinals.is_empty());
    }

    #[test]
    fn reports_temp_leftovers_without_deleting_them() {
        let (dir, root) = setup();
        fs::write(dir.path().join(".tmp-stranded"), "precious").unwrap();

        let outcome = run(&root, "", false).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.temp_leftovers.len(), 1);
        assert!(dir.path().join(".tmp-stranded").exists());
    }

    #[test]
    fn reports_duplicate_ordinals() {
        let (dir, root) = setup();
        fs::write(dir.path().join("0002_a.md"), "").unwrap();
        fs::write(dir.path().join("0002_b.md"), "").unwrap();

        let outcome = run(&root, "", false).unwrap();
        assert_eq!(outcome.duplicate_ordinals.len(), 1);
        assert_eq!(outcome.duplicate_ordinals[0].ordinal, 2);
        assert_eq!(
            outcome.duplicate_ordinals[0].names,
            vec!["0002_a.md", "0002_b.md"]
        );
        // Report-only: nothing was renamed.
        assert!(dir.path().join("0002_a.md").exists());
        assert!(dir.path().join("0002_b.md").exists());
    }

    #[test]
    fn fix_renumbers_preserving_order() {
        let (dir, root) = setup();
        fs::write(dir.path().join("0002_a.md"), "").unwrap();
        fs::write(dir.path().join("0002_b.md"), "").unwrap();
        fs::write(dir.path().join("0003_c.md"), "").unwrap();

        let outcome = run(&root, "", true).unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.renumbered, 2);
        assert!(dir.path().join("0002_a.md").exists());
        assert!(dir.path().join("0003_b.md").exists());
        assert!(dir.path().join("0004_c.md").exists());
    }

    #[test]
    fn scans_nested_folders() {
        let (dir, root) = setup();
        fs::create_dir(dir.path().join("0001_docs")).unwrap();
        fs::write(dir.path().join("0001_docs/0004_x.md"), "").unwrap();
        fs::write(dir.path().join("0001_docs/0004_y.md"), "").unwrap();

        let outcome = run(&root, "", false).unwrap();
        assert_eq!(outcome.duplicate_ordinals.len(), 1);
        assert_eq!(
            outcome.duplicate_ordinals[0].folder,
            PathBuf::from("0001_docs")
        );
    }
}
