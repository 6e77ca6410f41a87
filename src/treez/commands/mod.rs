//! Business logic, one module per operation.
//!
//! Every operation follows the same shape: a `run` function taking the
//! [`Root`](crate::guard::Root), root-relative location fields, and typed
//! parameters, returning a serializable outcome struct with a `success` flag
//! and a human message. Full failures (bad input, missing parent, denied
//! path) surface as [`TreezError`](crate::error::TreezError); batch
//! operations instead record per-item failures in the outcome and keep
//! going, so partial success stays a normal, reportable result.
//!
//! Nothing in here writes to stdout or assumes a terminal. Clients render
//! outcomes however they like.

use crate::error::{Result, TreezError};
use serde::Serialize;

pub mod delete;
pub mod doctor;
pub mod helpers;
pub mod join;
pub mod list;
pub mod make_folder;
pub mod paste;
pub mod rename;
pub mod save;
pub mod swap;

/// A failure scoped to one item of a batch.
#[derive(Debug, Clone, Serialize)]
pub struct ItemError {
    pub name: String,
    pub error: String,
}

impl ItemError {
    pub fn new(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            error: error.into(),
        }
    }
}

/// Rejects entry names that are empty or would address outside the parent
/// directory. Folder locations may contain separators; entry names may not.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TreezError::BadRequest("name must not be empty".to_string()));
    }
    if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
        return Err(TreezError::BadRequest(format!(
            "invalid entry name: {}",
            name
        )));
    }
    Ok(())
}
