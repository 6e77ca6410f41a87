//! Moves a batch of entries into a target folder at a chosen position,
//! renumbering the target's sequence to make room.
//!
//! Items already sitting in the target folder are being *reordered*: each is
//! parked under a unique temporary name first so the renumbering pass cannot
//! collide with it. Items coming from elsewhere are moved straight into
//! their vacated slot. Either way the whole batch shares one renumbering
//! pass, and a source path that traverses a folder renamed by that pass is
//! rewritten through the returned remap table before the move.

use super::helpers::{resolve_dir, shift_ordinals_down, unique_temp_name};
use super::ItemError;
use crate::error::{Result, TreezError};
use crate::guard::Root;
use crate::ordinal;
use crate::remap::PathRemapper;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct PasteRequest {
    /// Root-relative source paths, pre-sorted by the caller: the first item
    /// lands highest.
    pub items: Vec<String>,
    /// Insert below the sibling carrying this ordinal. `None` inserts at the
    /// top of the sequence.
    pub target_ordinal: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MovedItem {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct PasteOutcome {
    /// True when at least one item landed.
    pub success: bool,
    pub message: String,
    pub moved: Vec<MovedItem>,
    pub errors: Vec<ItemError>,
    /// Folders renumbered while opening the insertion gap.
    pub remap: PathRemapper,
}

enum Slot {
    /// Already a sibling of the target, parked under a temp name.
    Reorder { temp: PathBuf, base: String },
    /// Coming in from another folder.
    Incoming { source: PathBuf, base: String },
    /// Failed before the shift ran; reported, never retried.
    Failed(String),
}

pub fn run(root: &Root, target_folder: &str, req: &PasteRequest) -> Result<PasteOutcome> {
    if req.items.is_empty() {
        return Err(TreezError::BadRequest(
            "nothing to paste: items list is empty".to_string(),
        ));
    }
    let dir = resolve_dir(root, target_folder)?;
    let insert_ordinal = match req.target_ordinal {
        Some(ord) => ord + 1,
        None => 0,
    };

    // Stage every item before touching the sequence. Same-folder items are
    // parked under temp names so the shift below cannot renumber them.
    let mut slots: Vec<Slot> = Vec::with_capacity(req.items.len());
    for item in &req.items {
        slots.push(stage_item(root, &dir, item));
    }

    // One renumbering pass opens slots for the whole batch.
    let remap = shift_ordinals_down(req.items.len() as u64, &dir, insert_ordinal, root, None)?;

    let mut moved = Vec::new();
    let mut errors = Vec::new();
    for (position, (item, slot)) in req.items.iter().zip(slots).enumerate() {
        let (source, base) = match slot {
            Slot::Reorder { temp, base } => (temp, base),
            Slot::Incoming { source, base } => {
                // The shift may have renamed a folder this path runs through.
                (remap.rewrite(&source), base)
            }
            Slot::Failed(error) => {
                errors.push(ItemError::new(item.clone(), error));
                continue;
            }
        };

        let final_name = format!(
            "{}{}",
            ordinal::format(insert_ordinal + position as u64),
            base
        );
        let dest = dir.join(&final_name);
        if !source.exists() {
            errors.push(ItemError::new(item.clone(), "not found"));
            continue;
        }
        if dest.exists() {
            errors.push(ItemError::new(
                item.clone(),
                format!("slot taken: {}", final_name),
            ));
            continue;
        }
        match fs::rename(&source, &dest) {
            Ok(()) => moved.push(MovedItem {
                from: item.clone(),
                to: final_name,
            }),
            Err(e) => errors.push(ItemError::new(item.clone(), e.to_string())),
        }
    }

    let success = !moved.is_empty();
    let message = if errors.is_empty() {
        format!("Pasted {} items", moved.len())
    } else {
        format!("Pasted {} of {} items", moved.len(), req.items.len())
    };
    Ok(PasteOutcome {
        success,
        message,
        moved,
        errors,
        remap,
    })
}

fn stage_item(root: &Root, dir: &std::path::Path, item: &str) -> Slot {
    let source = match root.join(item) {
        Ok(path) => path,
        Err(e) => return Slot::Failed(e.to_string()),
    };
    let name = match source.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_string(),
        None => return Slot::Failed("invalid source path".to_string()),
    };
    let base = ordinal::parse(&name).base.to_string();

    if source.parent() == Some(dir) {
        if !source.exists() {
            return Slot::Failed("not found".to_string());
        }
        let temp = unique_temp_name(dir);
        match fs::rename(&source, &temp) {
            Ok(()) => Slot::Reorder { temp, base },
            Err(e) => Slot::Failed(e.to_string()),
        }
    } else {
        Slot::Incoming { source, base }
    }
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

    fn paste(root: &Root, folder: &str, items: &[&str], after: Option<u64>) -> PasteOutcome {
        run(
            root,
            folder,
            &PasteRequest {
                items: items.iter().map(|s| s.to_string()).collect(),
                target_ordinal: after,
            },
        )
        .unwrap()
    }

    #[test]
    fn pasting_into_an_empty_folder_numbers_from_zero() {
        let (dir, root) = setup();
        fs::create_dir(dir.path().join("0001_inbox")).unwrap();
        fs::create_dir(dir.path().join("0002_done")).unwrap();
        for name in ["0004_a.md", "0002_b.md", "0009_c.md"] {
            fs::write(dir.path().join("0001_inbox").join(name), name).unwrap();
        }

        let outcome = paste(
            &root,
            "0002_done",
            &[
                "0001_inbox/0004_a.md",
                "0001_inbox/0002_b.md",
                "0001_inbox/0009_c.md",
            ],
            None,
        );

        assert!(outcome.success);
        assert!(outcome.errors.is_empty());
        let landed: Vec<&str> = outcome.moved.iter().map(|m| m.to.as_str()).collect();
        assert_eq!(landed, vec!["0000_a.md", "0001_b.md", "0002_c.md"]);
        assert!(dir.path().join("0002_done/0000_a.md").exists());
    }

    #[test]
    fn cross_folder_paste_shifts_the_target_sequence() {
        let (dir, root) = setup();
        fs::create_dir(dir.path().join("0001_src")).unwrap();
        fs::write(dir.path().join("0001_src/0001_new.md"), "new").unwrap();
        fs::write(dir.path().join("0003_a.md"), "").unwrap();
        fs::write(dir.path().join("0004_b.md"), "").unwrap();

        // Insert below ordinal 3, i.e. into slot 4.
        let outcome = paste(&root, "", &["0001_src/0001_new.md"], Some(3));

        assert!(outcome.success);
        assert!(dir.path().join("0004_new.md").exists());
        assert!(dir.path().join("0005_b.md").exists());
        assert!(dir.path().join("0003_a.md").exists());
    }

    #[test]
    fn same_folder_reorder_goes_through_temp_names() {
        let (dir, root) = setup();
        for name in ["0001_a.md", "0002_b.md", "0003_c.md"] {
            fs::write(dir.path().join(name), name).unwrap();
        }

        // Move c to the top.
        let outcome = paste(&root, "", &["0003_c.md"], None);

        assert!(outcome.success);
        assert_eq!(outcome.moved[0].to, "0000_c.md");
        assert_eq!(
            fs::read_to_string(dir.path().join("0000_c.md")).unwrap(),
            "0003_c.md"
        );
        // The others were shifted to open the gap.
        assert!(dir.path().join("0002_a.md").exists());
        assert!(dir.path().join("0003_b.md").exists());
    }

    #[test]
    fn source_paths_through_a_renumbered_folder_are_rewritten() {
        let (dir, root) = setup();
        // The source folder itself sits in the target sequence at 0001, so
        // inserting at the top renames it before the item moves.
        fs::create_dir(dir.path().join("0001_src")).unwrap();
        fs::write(dir.path().join("0001_src/0001_item.md"), "payload").unwrap();

        let outcome = paste(&root, "", &["0001_src/0001_item.md"], None);

        assert!(outcome.success, "errors: {:?}", outcome.errors);
        assert!(!outcome.remap.is_empty());
        assert!(dir.path().join("0000_item.md").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("0000_item.md")).unwrap(),
            "payload"
        );
        // The source folder was shifted down by the batch size.
        assert!(dir.path().join("0002_src").exists());
    }

    #[test]
    fn missing_sources_do_not_abort_the_batch() {
        let (dir, root) = setup();
        fs::create_dir(dir.path().join("0001_src")).unwrap();
        fs::write(dir.path().join("0001_src/0001_real.md"), "").unwrap();
        fs::create_dir(dir.path().join("0002_dst")).unwrap();

        let outcome = paste(
            &root,
            "0002_dst",
            &["0001_src/0001_real.md", "0001_src/0009_ghost.md"],
            None,
        );

        assert!(outcome.success);
        assert_eq!(outcome.moved.len(), 1);
        assert_eq!(outcome.errors.len(), 1);
        assert!(dir.path().join("0002_dst/0000_real.md").exists());
    }

    #[test]
    fn escaping_items_are_denied_per_item() {
        let (dir, root) = setup();
        fs::create_dir(dir.path().join("0001_dst")).unwrap();

        let outcome = paste(&root, "0001_dst", &["../outside.md"], None);

        assert!(!outcome.success);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].error.contains("Access denied"));
    }

    #[test]
    fn empty_item_list_is_a_bad_request() {
        let (_dir, root) = setup();
        assert!(matches!(
            run(&root, "", &PasteRequest::default()),
            Err(TreezError::BadRequest(_))
        ));
    }
}
