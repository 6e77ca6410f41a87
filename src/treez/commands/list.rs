use super::helpers::{display_folder, ordinal_siblings, resolve_dir};
use crate::error::Result;
use crate::guard::Root;
use crate::model::{Node, NodeKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// A sequence entry plus its depth below the listed folder.
#[derive(Debug, Serialize)]
pub struct ListedNode {
    #[serde(flatten)]
    pub node: Node,
    pub depth: usize,
}

#[derive(Debug, Serialize)]
pub struct ListOutcome {
    pub success: bool,
    pub message: String,
    /// Sequence entries in order; children follow their parent when
    /// listing recursively.
    pub entries: Vec<ListedNode>,
    /// Names present in the folder but outside the ordered sequence.
    pub unordered: Vec<String>,
}

/// Reads the ordered tree. Never mutates anything; the order comes from the
/// names alone, never from timestamps.
pub fn run(root: &Root, folder: &str, recursive: bool) -> Result<ListOutcome> {
    let dir = resolve_dir(root, folder)?;

    let mut entries = Vec::new();
    let mut unordered = Vec::new();
    collect(&dir, 0, recursive, &mut entries, &mut unordered)?;

    let message = format!(
        "{} entries in {}",
        entries.len(),
        display_folder(folder)
    );
    Ok(ListOutcome {
        success: true,
        message,
        entries,
        unordered,
    })
}

fn collect(
    dir: &Path,
    depth: usize,
    recursive: bool,
    entries: &mut Vec<ListedNode>,
    unordered: &mut Vec<String>,
) -> Result<()> {
    for sibling in ordinal_siblings(dir)? {
        let path = dir.join(&sibling.name);
        let kind = if path.is_dir() {
            NodeKind::Folder
        } else {
            NodeKind::File
        };
        let modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from);
        entries.push(ListedNode {
            node: Node {
                name: sibling.name,
                ordinal: sibling.ordinal,
                base: sibling.base,
                kind,
                path: path.clone(),
                modified,
            },
            depth,
        });
        if recursive && kind == NodeKind::Folder {
            collect(&path, depth + 1, recursive, entries, unordered)?;
        }
    }

    if depth == 0 {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if !crate::ordinal::is_ordinal_name(name) {
                    unordered.push(name.to_string());
                }
            }
        }
        unordered.sort();
    }
    Ok(())
}
