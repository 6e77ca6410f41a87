use super::helpers::resolve_dir;
use super::validate_name;
use crate::error::{Result, TreezError};
use crate::guard::Root;
use crate::ordinal;
use serde::Serialize;
use std::fs;

/// Where leftover content of a converted file lands inside the new folder.
pub const FOLDER_INDEX_NAME: &str = "0001_index.md";

/// Longest accepted folder name, in characters.
pub const MAX_FOLDER_NAME_LEN: usize = 140;

#[derive(Debug, Serialize)]
pub struct MakeFolderOutcome {
    pub success: bool,
    pub message: String,
    /// Full name of the created folder, ordinal prefix included.
    pub folder_name: String,
    /// True when leftover content was written into the folder.
    pub seeded: bool,
}

/// Converts a file into a folder at the same position: the folder takes over
/// the file's ordinal prefix. Leftover content, if any, becomes the folder's
/// first child.
pub fn run(
    root: &Root,
    folder: &str,
    filename: &str,
    folder_name: &str,
    remaining_content: Option<&str>,
) -> Result<MakeFolderOutcome> {
    validate_name(filename)?;
    validate_name(folder_name)?;
    if folder_name.chars().count() > MAX_FOLDER_NAME_LEN {
        return Err(TreezError::BadRequest(format!(
            "folder name longer than {} characters",
            MAX_FOLDER_NAME_LEN
        )));
    }
    let dir = resolve_dir(root, folder)?;

    let source = dir.join(filename);
    root.check_access(&source)?;
    if !source.exists() {
        return Err(TreezError::NotFound(format!("file not found: {}", filename)));
    }
    if !source.is_file() {
        return Err(TreezError::NotAFile(filename.to_string()));
    }

    // The literal prefix carries the position; reuse it byte for byte.
    let underscore = match filename.find('_') {
        Some(pos) if ordinal::parse(filename).ordinal.is_some() => pos,
        _ => {
            return Err(TreezError::BadRequest(format!(
                "cannot convert {}: name has no ordinal prefix",
                filename
            )))
        }
    };
    let new_folder_name = format!("{}{}", &filename[..=underscore], folder_name);

    let target = dir.join(&new_folder_name);
    root.check_access(&target)?;
    // Checked before the source is touched, so a conflict is non-destructive.
    if target.exists() {
        return Err(TreezError::Conflict(format!(
            "name already taken: {}",
            new_folder_name
        )));
    }

    fs::remove_file(&source)?;
    fs::create_dir(&target)?;

    let mut seeded = false;
    if let Some(content) = remaining_content {
        if !content.is_empty() {
            fs::write(target.join(FOLDER_INDEX_NAME), content)?;
            seeded = true;
        }
    }

    Ok(MakeFolderOutcome {
        success: true,
        message: format!("Converted {} into folder {}", filename, new_folder_name),
        folder_name: new_folder_name,
        seeded,
    })
}
