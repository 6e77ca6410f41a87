use clap::{Parser, Subcommand, ValueEnum};
use once_cell::sync::Lazy;
use std::path::PathBuf;

/// Version string: bare for releases, `0.4.1@abc1234 2026-08-07 10:30` for
/// dev builds.
static VERSION: Lazy<String> = Lazy::new(|| {
    const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    if IS_RELEASE == "true" || GIT_HASH.is_empty() {
        PKG_VERSION.to_string()
    } else {
        format!("{}@{} {}", PKG_VERSION, GIT_HASH, GIT_COMMIT_DATE)
    }
});

fn version() -> &'static str {
    &VERSION
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Parser, Debug)]
#[command(name = "tz")]
#[command(version = version())]
#[command(about = "Ordered document trees on plain files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Root directory to operate on (overrides --store and the default)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Named root from the config (see `tz config`)
    #[arg(short, long, global = true)]
    pub store: Option<String>,

    /// Print the structured outcome as JSON instead of human output
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a file, optionally renaming it or splitting on "~" lines
    Save {
        /// Folder inside the root ("" for the root itself)
        folder: String,

        /// Target file name (e.g. 0005_note.md)
        filename: String,

        /// Content to write; read from stdin when omitted
        #[arg(long)]
        content: Option<String>,

        /// Rename the target to this name before writing
        #[arg(long)]
        rename_to: Option<String>,

        /// Split the content into ordered siblings on lines holding "~"
        #[arg(long)]
        split: bool,
    },

    /// Rename a folder in place
    Rename {
        folder: String,
        old_name: String,
        new_name: String,
    },

    /// Delete files or folders (folders are removed recursively, however deep)
    #[command(alias = "rm")]
    Delete {
        folder: String,

        /// Names to delete (e.g. 0001_a.md 0002_b)
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },

    /// Move an entry one position up or down
    #[command(name = "move")]
    Move {
        folder: String,
        filename: String,

        #[arg(value_enum)]
        direction: MoveDirection,
    },

    /// Move entries into a folder at a position, renumbering to make room
    Paste {
        folder: String,

        /// Root-relative source paths, in the order they should land
        #[arg(required = true, num_args = 1..)]
        items: Vec<String>,

        /// Insert below the sibling with this ordinal (omit for the top)
        #[arg(long)]
        after: Option<u64>,
    },

    /// Join files into the lowest-ordinal one
    Join {
        folder: String,

        /// Files to join (at least two)
        #[arg(required = true, num_args = 2..)]
        filenames: Vec<String>,
    },

    /// Convert a file into a folder at the same position
    MakeFolder {
        folder: String,
        filename: String,

        /// Name of the new folder (the ordinal prefix is carried over)
        folder_name: String,

        /// Content to keep as the folder's 0001_index.md
        #[arg(long)]
        keep_content: Option<String>,
    },

    /// List the ordered tree
    #[command(alias = "ls")]
    List {
        #[arg(default_value = "")]
        folder: String,

        /// Descend into folders
        #[arg(short = 'R', long)]
        recursive: bool,
    },

    /// Report (and optionally repair) ordinal collisions and temp leftovers
    Doctor {
        #[arg(default_value = "")]
        folder: String,

        /// Renumber collided sequences instead of only reporting them
        #[arg(long)]
        fix: bool,
    },

    /// Show or edit the named-root registry
    Config {
        /// Root key (omit to list everything)
        key: Option<String>,

        /// Path for the key (omit to print the current value)
        path: Option<PathBuf>,

        /// Make this key the default root
        #[arg(long)]
        default: bool,

        /// Remove the key instead
        #[arg(long)]
        unset: bool,
    },
}
