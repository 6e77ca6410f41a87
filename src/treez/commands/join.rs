use super::helpers::resolve_dir;
use super::{validate_name, ItemError};
use crate::error::{Result, TreezError};
use crate::guard::Root;
use crate::ordinal;
use serde::Serialize;
use std::fs;

/// Separator placed between joined documents.
pub const JOIN_SEPARATOR: &str = "\n\n";

#[derive(Debug, Serialize)]
pub struct JoinOutcome {
    pub success: bool,
    pub message: String,
    /// The surviving, lowest-ordinal file.
    pub target: String,
    /// Members removed after their content was folded in.
    pub removed: Vec<String>,
    pub errors: Vec<ItemError>,
}

/// Concatenates the named files, in ordinal order, into the lowest-ordinal
/// member and deletes the rest. A member that cannot be read contributes
/// empty content instead of aborting the join.
pub fn run(root: &Root, folder: &str, filenames: &[String]) -> Result<JoinOutcome> {
    if filenames.len() < 2 {
        return Err(TreezError::BadRequest(
            "join needs at least two files".to_string(),
        ));
    }
    for name in filenames {
        validate_name(name)?;
    }
    let dir = resolve_dir(root, folder)?;

    let mut members: Vec<(u64, &String)> = filenames
        .iter()
        .map(|name| (ordinal::parse(name).ordinal.unwrap_or(u64::MAX), name))
        .collect();
    members.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    let mut contents = Vec::with_capacity(members.len());
    for (_, name) in &members {
        let path = dir.join(name.as_str());
        root.check_access(&path)?;
        // Unreadable members degrade to empty rather than killing the join.
        contents.push(fs::read_to_string(&path).unwrap_or_default());
    }

    let target = members[0].1.clone();
    fs::write(dir.join(&target), contents.join(JOIN_SEPARATOR))?;

    let mut removed = Vec::new();
    let mut errors = Vec::new();
    for (_, name) in &members[1..] {
        match fs::remove_file(dir.join(name.as_str())) {
            Ok(()) => removed.push((*name).clone()),
            Err(e) => errors.push(ItemError::new(name.as_str(), e.to_string())),
        }
    }

    let success = errors.is_empty();
    let message = format!("Joined {} files into {}", members.len(), target);
    Ok(JoinOutcome {
        success,
        message,
        target,
        removed,
        errors,
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
    fn joins_in_ordinal_order_regardless_of_argument_order() {
        let (dir, root) = setup();
        fs::write(dir.path().join("0001_a.md"), "A").unwrap();
        fs::write(dir.path().join("0002_b.md"), "B").unwrap();

        let outcome = run(
            &root,
            "",
            &["0002_b.md".to_string(), "0001_a.md".to_string()],
        )
        .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.target, "0001_a.md");
        assert_eq!(
            fs::read_to_string(dir.path().join("0001_a.md")).unwrap(),
            "A\n\nB"
        );
        assert!(!dir.path().join("0002_b.md").exists());
    }

    #[test]
    fn unreadable_members_contribute_empty_content() {
        let (dir, root) = setup();
        fs::write(dir.path().join("0001_a.md"), "A").unwrap();
        // 0002_gone.md does not exist.

        let outcome = run(
            &root,
            "",
            &["0001_a.md".to_string(), "0002_gone.md".to_string()],
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("0001_a.md")).unwrap(),
            "A\n\n"
        );
        // Deleting the missing member fails per-item, not fatally.
        assert!(!outcome.success);
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn three_way_join_keeps_order() {
        let (dir, root) = setup();
        fs::write(dir.path().join("0003_c.md"), "C").unwrap();
        fs::write(dir.path().join("0001_a.md"), "A").unwrap();
        fs::write(dir.path().join("0002_b.md"), "B").unwrap();

        run(
            &root,
            "",
            &[
                "0003_c.md".to_string(),
                "0001_a.md".to_string(),
                "0002_b.md".to_string(),
            ],
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("0001_a.md")).unwrap(),
            "A\n\nB\n\nC"
        );
    }

    #[test]
    fn fewer_than_two_files_is_a_bad_request() {
        let (_dir, root) = setup();
        assert!(matches!(
            run(&root, "", &["0001_a.md".to_string()]),
            Err(TreezError::BadRequest(_))
        ));
    }
}
