//! Cursor-based markup scanning
//!
//! No tree is ever built. Every function here is a pure function over an
//! immutable document string plus a byte offset, so a cursor can be passed
//! around by value and a malformed page can only degrade the output, never
//! stall the scan.
//!
//! # Components
//!
//! - `tag`: locates the boundaries of the next instance of a tag
//! - `extract`: pulls the visible paragraph text out of an article
//! - `links`: finds the next same-site article link on a seed page

mod extract;
mod links;
mod tag;

pub use extract::{extract_runs, extract_text};
pub use links::{first_paragraph_cursor, next_link, LinkCandidate, LinkVerdict};
pub use tag::{locate, TagSpan};

/// Returns the offset of the first occurrence of `needle` at or after `from`
///
/// Any byte offset is a valid starting point. A match of a well-formed needle
/// can only begin on a char boundary, so an offset inside a multi-byte char is
/// moved forward to the next boundary before searching.
pub(crate) fn find_from(doc: &str, from: usize, needle: &str) -> Option<usize> {
    if from > doc.len() {
        return None;
    }
    let mut start = from;
    while !doc.is_char_boundary(start) {
        start += 1;
    }
    doc[start..].find(needle).map(|pos| start + pos)
}
