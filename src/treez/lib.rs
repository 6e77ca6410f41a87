//! # Treez Architecture
//!
//! Treez is a **UI-agnostic document-tree library**: it keeps a hierarchy of
//! files and folders in strict sibling order, persisted directly as
//! filesystem entries. There is no database and no index file: order lives
//! in the names themselves (`0007_notes.md`), and every mutation is built
//! from plain rename/write/delete primitives.
//!
//! The bundled `tz` binary is just one client; the same core could back a
//! server or any other UI.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, resolves the root, renders outcomes    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, scoped to one Root            │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, pure business logic            │
//! │  - Batch operations report per-item outcomes                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Filesystem (guarded by guard::Root)                        │
//! │  - Every caller-supplied path is containment-checked        │
//! │  - Order is encoded in names via ordinal::format/parse      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Ordering Model
//!
//! A sibling participates in ordering iff its name matches `^\d{4,}_`:
//! a zero-padded 4-digit ordinal, an underscore, then the base name.
//! Lexicographic order of full names equals numeric order, so consumers can
//! sort a plain directory listing and get the tree right. Gaps between
//! ordinals are fine and common: deletes never renumber, and inserts shift
//! only what is in the way.
//!
//! ## What the Engine Does NOT Do
//!
//! - **No cross-process locking.** One writer per directory subtree at a
//!   time is the caller's contract.
//! - **No rollback.** Multi-step renames (swap, split, paste) go through
//!   unique temp names; a crash mid-sequence strands a temp entry. The
//!   [`commands::doctor`] operation reports such damage and can renumber
//!   collided sequences, but never destroys data on its own.
//! - **No hidden root.** Every call is scoped to an explicit
//!   [`guard::Root`]; symbolic root names are a client concern
//!   ([`config::TreezConfig`]).
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`ordinal`]: The name ↔ sort-position codec
//! - [`guard`]: Root sandbox and path containment
//! - [`remap`]: old→new path table produced by renumbering
//! - [`model`]: Core data types (`Node`, `NodeKind`, `Direction`)
//! - [`config`]: Named-root registry for clients
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod guard;
pub mod model;
pub mod ordinal;
pub mod remap;
