//! # Ordinal Codec
//!
//! Sibling order is persisted directly in entry names: every ordered entry is
//! named `<ordinal>_<base>`, where the ordinal is a zero-padded, fixed-width
//! decimal number (`0007_notes.md`). Sorting the full names lexicographically
//! is therefore the same as sorting numerically, and no external index or
//! timestamp is ever consulted.
//!
//! Names that do not match the pattern are simply not part of the ordered
//! sequence; ordering operations skip them.
//!
//! Gaps between ordinals are fine. Only relative order matters, so operations
//! are free to leave holes behind (and do).

/// Number of digits a generated ordinal prefix carries.
pub const ORDINAL_WIDTH: usize = 4;

/// A name split into its ordinal prefix and base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName<'a> {
    /// `None` when the name has no `_` or the prefix is not numeric.
    pub ordinal: Option<u64>,
    /// Everything after the first `_` (the whole name when there is none).
    pub base: &'a str,
}

/// Splits `name` on the first `_` and parses the prefix as an ordinal.
pub fn parse(name: &str) -> ParsedName<'_> {
    match name.split_once('_') {
        Some((prefix, base)) => {
            let ordinal = if !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) {
                prefix.parse::<u64>().ok()
            } else {
                None
            };
            ParsedName { ordinal, base }
        }
        None => ParsedName {
            ordinal: None,
            base: name,
        },
    }
}

/// Formats `n` as a sort prefix: zero-padded to [`ORDINAL_WIDTH`] digits,
/// followed by `_`.
pub fn format(n: u64) -> String {
    format!("{:0width$}_", n, width = ORDINAL_WIDTH)
}

/// Whether `name` belongs to an ordered sequence (`^\d{4,}_`).
pub fn is_ordinal_name(name: &str) -> bool {
    let digits = name.bytes().take_while(|b| b.is_ascii_digit()).count();
    digits >= ORDINAL_WIDTH && name.as_bytes().get(digits) == Some(&b'_')
}
