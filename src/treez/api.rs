//! # API Facade
//!
//! `TreezApi` is the single entry point for every tree operation, whatever
//! the client (the bundled CLI, a server, tests). It is a thin dispatcher:
//! each method validates nothing itself and simply hands the sandboxed
//! [`Root`] plus typed parameters to the matching command.
//!
//! Everything from here inward takes plain Rust arguments, returns
//! structured `Result` values, and never touches stdout, stderr, or process
//! exit codes.

use crate::commands;
use crate::error::Result;
use crate::guard::Root;
use crate::model::Direction;

pub use crate::commands::delete::DeleteOutcome;
pub use crate::commands::doctor::DoctorOutcome;
pub use crate::commands::join::JoinOutcome;
pub use crate::commands::list::ListOutcome;
pub use crate::commands::make_folder::MakeFolderOutcome;
pub use crate::commands::paste::{PasteOutcome, PasteRequest};
pub use crate::commands::rename::RenameOutcome;
pub use crate::commands::save::{SaveOptions, SaveOutcome};
pub use crate::commands::swap::SwapOutcome;
pub use crate::commands::ItemError;

/// The main API facade. Holds the sandbox root; every call is scoped to it.
pub struct TreezApi {
    root: Root,
}

impl TreezApi {
    pub fn new(root: Root) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    /// Write a file, optionally renaming it first, optionally splitting it
    /// into ordered siblings on the `~` delimiter line.
    pub fn save_file(
        &self,
        folder: &str,
        filename: &str,
        content: &str,
        opts: &SaveOptions,
    ) -> Result<SaveOutcome> {
        commands::save::run(&self.root, folder, filename, content, opts)
    }

    pub fn rename_folder(
        &self,
        folder: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<RenameOutcome> {
        commands::rename::run(&self.root, folder, old_name, new_name)
    }

    /// Delete files and folders; folders go recursively.
    pub fn delete(&self, folder: &str, names: &[String]) -> Result<DeleteOutcome> {
        commands::delete::run(&self.root, folder, names)
    }

    /// Move an entry one position up or down within its sequence.
    pub fn move_up_or_down(
        &self,
        folder: &str,
        filename: &str,
        direction: Direction,
    ) -> Result<SwapOutcome> {
        commands::swap::run(&self.root, folder, filename, direction)
    }

    /// Move a batch of entries into `folder`, renumbering to make room.
    pub fn paste(&self, folder: &str, request: &PasteRequest) -> Result<PasteOutcome> {
        commands::paste::run(&self.root, folder, request)
    }

    /// Concatenate files into the lowest-ordinal member and drop the rest.
    pub fn join_files(&self, folder: &str, filenames: &[String]) -> Result<JoinOutcome> {
        commands::join::run(&self.root, folder, filenames)
    }

    /// Convert a file into a folder at the same position.
    pub fn make_folder(
        &self,
        folder: &str,
        filename: &str,
        folder_name: &str,
        remaining_content: Option<&str>,
    ) -> Result<MakeFolderOutcome> {
        commands::make_folder::run(&self.root, folder, filename, folder_name, remaining_content)
    }

    /// Read the ordered tree without mutating it.
    pub fn list(&self, folder: &str, recursive: bool) -> Result<ListOutcome> {
        commands::list::run(&self.root, folder, recursive)
    }

    /// Report (and with `fix`, repair) ordinal collisions and stranded temp
    /// entries.
    pub fn doctor(&self, folder: &str, fix: bool) -> Result<DoctorOutcome> {
        commands::doctor::run(&self.root, folder, fix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn dispatches_against_the_held_root() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("0001_a.md"), "hello").unwrap();
        let api = TreezApi::new(Root::new(dir.path().to_path_buf()).unwrap());

        let listed = api.list("", false).unwrap();
        assert_eq!(listed.entries.len(), 1);

        api.save_file("", "0002_b.md", "world", &SaveOptions::default())
            .unwrap();
        assert!(dir.path().join("0002_b.md").exists());
    }
}
