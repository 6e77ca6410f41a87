use super::helpers::{display_folder, resolve_dir};
use super::validate_name;
use crate::error::{Result, TreezError};
use crate::guard::Root;
use serde::Serialize;
use std::fs;

#[derive(Debug, Serialize)]
pub struct RenameOutcome {
    pub success: bool,
    pub message: String,
    pub old_name: String,
    pub new_name: String,
}

/// Renames a folder in place. The ordinal prefix travels with the name, so
/// callers that want to keep the position must carry it over themselves.
pub fn run(root: &Root, folder: &str, old_name: &str, new_name: &str) -> Result<RenameOutcome> {
    validate_name(old_name)?;
    validate_name(new_name)?;
    let dir = resolve_dir(root, folder)?;

    let old_path = dir.join(old_name);
    root.check_access(&old_path)?;
    if !old_path.exists() {
        return Err(TreezError::NotFound(format!(
            "folder not found: {} in {}",
            old_name,
            display_folder(folder)
        )));
    }
    if !old_path.is_dir() {
        return Err(TreezError::NotADirectory(old_name.to_string()));
    }

    if old_name == new_name {
        return Ok(RenameOutcome {
            success: true,
            message: format!("{} already has that name", old_name),
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
        });
    }

    let new_path = dir.join(new_name);
    root.check_access(&new_path)?;
    if new_path.exists() {
        return Err(TreezError::Conflict(format!(
            "name already taken: {}",
            new_name
        )));
    }

    fs::rename(&old_path, &new_path)?;
    Ok(RenameOutcome {
        success: true,
        message: format!("Renamed {} to {}", old_name, new_name),
        old_name: old_name.to_string(),
        new_name: new_name.to_string(),
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
    fn renames_a_folder() {
        let (dir, root) = setup();
        fs::create_dir(dir.path().join("0001_old")).unwrap();

        let outcome = run(&root, "", "0001_old", "0001_new").unwrap();

        assert!(outcome.success);
        assert!(dir.path().join("0001_new").is_dir());
        assert!(!dir.path().join("0001_old").exists());
    }

    #[test]
    fn missing_folder_is_not_found() {
        let (_dir, root) = setup();
        assert!(matches!(
            run(&root, "", "0001_gone", "0001_new"),
            Err(TreezError::NotFound(_))
        ));
    }

    #[test]
    fn files_cannot_be_renamed_as_folders() {
        let (dir, root) = setup();
        fs::write(dir.path().join("0001_file.md"), "").unwrap();
        assert!(matches!(
            run(&root, "", "0001_file.md", "0001_new"),
            Err(TreezError::NotADirectory(_))
        ));
    }

    #[test]
    fn same_name_is_a_noop_success() {
        let (dir, root) = setup();
        fs::create_dir(dir.path().join("0001_same")).unwrap();

        let outcome = run(&root, "", "0001_same", "0001_same").unwrap();

        assert!(outcome.success);
        assert!(dir.path().join("0001_same").is_dir());
    }

    #[test]
    fn taken_name_conflicts() {
        let (dir, root) = setup();
        fs::create_dir(dir.path().join("0001_a")).unwrap();
        fs::create_dir(dir.path().join("0002_b")).unwrap();
        assert!(matches!(
            run(&root, "", "0001_a", "0002_b"),
            Err(TreezError::Conflict(_))
        ));
    }
}
