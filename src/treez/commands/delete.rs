use super::helpers::resolve_dir;
use super::{validate_name, ItemError};
use crate::error::{Result, TreezError};
use crate::guard::Root;
use serde::Serialize;
use std::fs;

#[derive(Debug, Serialize)]
pub struct DeleteOutcome {
    pub success: bool,
    pub message: String,
    pub deleted_count: usize,
    pub errors: Vec<ItemError>,
}

/// Deletes files and folders. Folders are removed recursively, whatever
/// their depth. Per-item failures never abort the batch, and neighbors are
/// never renumbered: delete leaves gaps, which the ordering model permits.
pub fn run(root: &Root, folder: &str, names: &[String]) -> Result<DeleteOutcome> {
    if names.is_empty() {
        return Err(TreezError::BadRequest(
            "nothing to delete: names list is empty".to_string(),
        ));
    }
    let dir = resolve_dir(root, folder)?;

    let mut deleted_count = 0;
    let mut errors = Vec::new();
    for name in names {
        if let Err(e) = validate_name(name) {
            errors.push(ItemError::new(name.clone(), e.to_string()));
            continue;
        }
        let path = dir.join(name);
        if let Err(e) = root.check_access(&path) {
            errors.push(ItemError::new(name.clone(), e.to_string()));
            continue;
        }
        if !path.exists() {
            errors.push(ItemError::new(name.clone(), "not found"));
            continue;
        }
        let result = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        match result {
            Ok(()) => deleted_count += 1,
            Err(e) => errors.push(ItemError::new(name.clone(), e.to_string())),
        }
    }

    let message = if names.len() == 1 {
        // Single-name calls keep the simple one-line shape.
        match errors.first() {
            None => format!("Deleted {}", names[0]),
            Some(e) => format!("Could not delete {}: {}", e.name, e.error),
        }
    } else {
        format!("Deleted {} of {} items", deleted_count, names.len())
    };

    Ok(DeleteOutcome {
        success: errors.is_empty(),
        message,
        deleted_count,
        errors,
    })
}
