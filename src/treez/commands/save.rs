//! Writes a document, optionally renaming it first, optionally splitting it
//! into several ordered siblings.
//!
//! Splitting partitions the content on the literal delimiter line `~`. The
//! first partition overwrites the target in place (its ordinal never moves);
//! every later partition becomes a new sibling right below it, after the
//! existing lower siblings have been shifted out of the way.

use super::helpers::{resolve_dir, shift_ordinals_down};
use super::{validate_name, ItemError};
use crate::error::{Result, TreezError};
use crate::guard::Root;
use crate::ordinal;
use crate::remap::PathRemapper;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// The literal delimiter between partitions: a line holding a single `~`.
pub const SPLIT_DELIMITER: &str = "\n~\n";

#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Rename the target to this name before writing.
    pub new_file_name: Option<String>,
    /// Partition the content on [`SPLIT_DELIMITER`] into ordered siblings.
    pub split: bool,
}

#[derive(Debug, Serialize)]
pub struct SaveOutcome {
    pub success: bool,
    pub message: String,
    /// Name of the target after any rename.
    pub filename: String,
    /// Every sibling written by this call, in order.
    pub written: Vec<String>,
    /// Partition writes that failed; earlier writes are not rolled back.
    pub errors: Vec<ItemError>,
    /// Folders renumbered to open the split gap.
    pub remap: PathRemapper,
}

pub fn run(
    root: &Root,
    folder: &str,
    filename: &str,
    content: &str,
    opts: &SaveOptions,
) -> Result<SaveOutcome> {
    validate_name(filename)?;
    let dir = resolve_dir(root, folder)?;
    let mut filename = filename.to_string();
    let mut target = dir.join(&filename);
    root.check_access(&target)?;

    if let Some(new_name) = opts.new_file_name.as_deref() {
        if new_name != filename {
            validate_name(new_name)?;
            let renamed = dir.join(new_name);
            root.check_access(&renamed)?;
            if !target.exists() {
                return Err(TreezError::NotFound(format!("file not found: {}", filename)));
            }
            if renamed.exists() {
                return Err(TreezError::Conflict(format!(
                    "name already taken: {}",
                    new_name
                )));
            }
            fs::rename(&target, &renamed)?;
            filename = new_name.to_string();
            target = renamed;
        }
    }

    if opts.split && content.contains(SPLIT_DELIMITER) {
        return split_into_siblings(root, &dir, &filename, content);
    }

    fs::write(&target, content)?;
    Ok(SaveOutcome {
        success: true,
        message: format!("Saved {}", filename),
        filename: filename.clone(),
        written: vec![filename],
        errors: Vec::new(),
        remap: PathRemapper::new(),
    })
}

fn split_into_siblings(
    root: &Root,
    dir: &Path,
    filename: &str,
    content: &str,
) -> Result<SaveOutcome> {
    let parsed = ordinal::parse(filename);
    let original = match parsed.ordinal {
        Some(ord) => ord,
        None => {
            return Err(TreezError::BadRequest(format!(
                "cannot split {}: name has no ordinal prefix",
                filename
            )))
        }
    };
    let base = parsed.base.to_string();

    let parts: Vec<&str> = content.split(SPLIT_DELIMITER).collect();
    let extra = (parts.len() - 1) as u64;

    // Open the gap below the target before any new sibling lands. The target
    // keeps its slot, so it sits on the ignore list.
    let remap = shift_ordinals_down(extra, dir, original + 1, root, Some(&[filename]))?;

    let mut written = Vec::new();
    let mut errors = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        let name = if i == 0 {
            filename.to_string()
        } else {
            format!("{}{}", ordinal::format(original + i as u64), base)
        };
        match fs::write(dir.join(&name), part) {
            Ok(()) => written.push(name),
            Err(e) => errors.push(ItemError::new(name, e.to_string())),
        }
    }

    let success = errors.is_empty();
    let message = if success {
        format!("Split {} into {} parts", filename, parts.len())
    } else {
        format!(
            "Split {} wrote {} of {} parts",
            filename,
            written.len(),
            parts.len()
        )
    };
    Ok(SaveOutcome {
        success,
        message,
        filename: filename.to_string(),
        written,
        errors,
        remap,
    })
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
    fn plain_save_overwrites_in_place() {
        let (dir, root) = setup();
        fs::write(dir.path().join("0001_a.md"), "old").unwrap();

        let outcome = run(&root, "", "0001_a.md", "new", &SaveOptions::default()).unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.written, vec!["0001_a.md"]);
        assert_eq!(
            fs::read_to_string(dir.path().join("0001_a.md")).unwrap(),
            "new"
        );
    }

    #[test]
    fn save_creates_a_missing_target() {
        let (dir, root) = setup();
        run(&root, "", "0001_a.md", "hello", &SaveOptions::default()).unwrap();
        assert!(dir.path().join("0001_a.md").exists());
    }

    #[test]
    fn rename_then_save() {
        let (dir, root) = setup();
        fs::write(dir.path().join("0001_a.md"), "x").unwrap();

        let opts = SaveOptions {
            new_file_name: Some("0001_b.md".to_string()),
            split: false,
        };
        let outcome = run(&root, "", "0001_a.md", "y", &opts).unwrap();

        assert_eq!(outcome.filename, "0001_b.md");
        assert!(!dir.path().join("0001_a.md").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("0001_b.md")).unwrap(),
            "y"
        );
    }

    #[test]
    fn rename_to_an_existing_name_conflicts() {
        let (dir, root) = setup();
        fs::write(dir.path().join("0001_a.md"), "").unwrap();
        fs::write(dir.path().join("0002_b.md"), "").unwrap();

        let opts = SaveOptions {
            new_file_name: Some("0002_b.md".to_string()),
            split: false,
        };
        assert!(matches!(
            run(&root, "", "0001_a.md", "y", &opts),
            Err(TreezError::Conflict(_))
        ));
    }

    #[test]
    fn split_fans_out_and_shifts_lower_siblings() {
        let (dir, root) = setup();
        fs::write(dir.path().join("0005_note.md"), "").unwrap();
        fs::write(dir.path().join("0006_other.md"), "other").unwrap();

        let opts = SaveOptions {
            new_file_name: None,
            split: true,
        };
        let outcome = run(&root, "", "0005_note.md", "X\n~\nY\n~\nZ", &opts).unwrap();

        assert!(outcome.success);
        assert_eq!(
            outcome.written,
            vec!["0005_note.md", "0006_note.md", "0007_note.md"]
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("0005_note.md")).unwrap(),
            "X"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("0006_note.md")).unwrap(),
            "Y"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("0007_note.md")).unwrap(),
            "Z"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("0008_other.md")).unwrap(),
            "other"
        );
        assert!(!dir.path().join("0006_other.md").exists());
    }

    #[test]
    fn split_without_delimiter_is_a_plain_overwrite() {
        let (dir, root) = setup();
        fs::write(dir.path().join("0005_note.md"), "").unwrap();

        let opts = SaveOptions {
            new_file_name: None,
            split: true,
        };
        let outcome = run(&root, "", "0005_note.md", "no delimiter here", &opts).unwrap();

        assert_eq!(outcome.written, vec!["0005_note.md"]);
        assert!(!dir.path().join("0006_note.md").exists());
    }

    #[test]
    fn split_needs_an_ordinal_prefix() {
        let (dir, root) = setup();
        fs::write(dir.path().join("plain.md"), "").unwrap();

        let opts = SaveOptions {
            new_file_name: None,
            split: true,
        };
        assert!(matches!(
            run(&root, "", "plain.md", "a\n~\nb", &opts),
            Err(TreezError::BadRequest(_))
        ));
    }

    #[test]
    fn missing_folder_fails_fast() {
        let (_dir, root) = setup();
        assert!(matches!(
            run(&root, "0001_gone", "0001_a.md", "x", &SaveOptions::default()),
            Err(TreezError::NotFound(_))
        ));
    }
}
