use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// One entry of an ordered sequence, as read from disk.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    /// Full on-disk name, e.g. `0007_notes.md`.
    pub name: String,
    pub ordinal: u64,
    pub base: String,
    pub kind: NodeKind,
    pub path: PathBuf,
    pub modified: Option<DateTime<Utc>>,
}

/// Which neighbor a move targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}
