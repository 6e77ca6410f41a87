//! Moves an entry one position up or down by swapping ordinal prefixes with
//! its neighbor. Base names stay put; only the numeric prefixes trade
//! places.
//!
//! There is no native two-way rename, so the swap goes through a unique
//! temporary name: A → temp, B → B-with-A's-ordinal, temp →
//! A-with-B's-ordinal. A crash between steps strands the temp entry;
//! `doctor` reports such leftovers but nothing repairs them automatically.

use super::helpers::{ordinal_siblings, resolve_dir, unique_temp_name};
use super::validate_name;
use crate::error::{Result, TreezError};
use crate::guard::Root;
use crate::model::Direction;
use crate::ordinal;
use serde::Serialize;
use std::fs;

#[derive(Debug, Clone, Serialize)]
pub struct RenamedEntry {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct SwapOutcome {
    pub success: bool,
    pub message: String,
    /// The entry the caller asked to move.
    pub moved: RenamedEntry,
    /// The neighbor that gave up its slot.
    pub displaced: RenamedEntry,
}

pub fn run(root: &Root, folder: &str, filename: &str, direction: Direction) -> Result<SwapOutcome> {
    validate_name(filename)?;
    let dir = resolve_dir(root, folder)?;

    let siblings = ordinal_siblings(&dir)?;
    let index = siblings
        .iter()
        .position(|s| s.name == filename)
        .ok_or_else(|| TreezError::NotFound(format!("file not found: {}", filename)))?;

    let neighbor_index = match direction {
        Direction::Up => {
            if index == 0 {
                return Err(TreezError::Boundary("top"));
            }
            index - 1
        }
        Direction::Down => {
            if index + 1 >= siblings.len() {
                return Err(TreezError::Boundary("bottom"));
            }
            index + 1
        }
    };

    let moved = &siblings[index];
    let displaced = &siblings[neighbor_index];

    let moved_path = dir.join(&moved.name);
    let displaced_path = dir.join(&displaced.name);
    root.check_access(&moved_path)?;
    root.check_access(&displaced_path)?;

    let new_moved_name = format!("{}{}", ordinal::format(displaced.ordinal), moved.base);
    let new_displaced_name = format!("{}{}", ordinal::format(moved.ordinal), displaced.base);

    // Three renames standing in for an atomic two-way swap.
    let temp = unique_temp_name(&dir);
    fs::rename(&moved_path, &temp)?;
    fs::rename(&displaced_path, dir.join(&new_displaced_name))?;
    fs::rename(&temp, dir.join(&new_moved_name))?;

    Ok(SwapOutcome {
        success: true,
        message: format!("Moved {} {}", filename, direction.label()),
        moved: RenamedEntry {
            from: moved.name.clone(),
            to: new_moved_name,
        },
        displaced: RenamedEntry {
            from: displaced.name.clone(),
            to: new_displaced_name,
        },
    })
}
