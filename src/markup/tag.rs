//! Tag scanner
//!
//! Locates the next instance of a named tag in raw markup and reports where
//! its content starts and ends, plus where the following instance of the same
//! tag opens.

use super::find_from;

/// The located boundaries of one tag instance
///
/// All offsets are byte offsets into the scanned document. The scanner
/// returns `None` instead of a span once no further instance exists, so a
/// `TagSpan` always describes a real tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpan {
    /// Offset of the `<` that opens the tag
    pub open_start: usize,

    /// Offset just past the `>` that closes the open tag
    pub content_start: usize,

    /// Offset of the matching close tag, or of the next `<` when there is none
    pub content_end: usize,

    /// Offset of the next open tag with the same name, searched from `content_end`
    pub next_open_start: Option<usize>,
}

impl TagSpan {
    /// Length of the content between the open tag and its end
    pub fn len(&self) -> usize {
        self.content_end - self.content_start
    }

    /// Returns true if the tag has no content
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the raw content of the tag within `doc`
    pub fn content<'a>(&self, doc: &'a str) -> &'a str {
        doc.get(self.content_start..self.content_end).unwrap_or("")
    }
}

/// Locates the next `<name` tag at or after `from`
///
/// An empty `name` matches any tag, closing tags and comments included, which
/// lets callers step through markup one tag at a time. A non-empty name only
/// matches on a name boundary, so `p` finds `<p>` and `<p class=..>` but not
/// `<pre>`.
///
/// When no `</name>` follows the open tag, the content ends at the next `<`
/// (or at the end of the document). Missing closing tags are tolerated, never
/// reported.
///
/// # Examples
///
/// ```
/// use wiki_relay::markup::locate;
///
/// let doc = "<p>one</p><p>two</p>";
/// let first = locate(doc, 0, "p").unwrap();
/// assert_eq!(first.content(doc), "one");
/// let second = locate(doc, first.next_open_start.unwrap(), "p").unwrap();
/// assert_eq!(second.content(doc), "two");
/// assert_eq!(second.next_open_start, None);
/// ```
pub fn locate(doc: &str, from: usize, name: &str) -> Option<TagSpan> {
    let open_start = find_open(doc, from, name)?;
    let (content_start, content_end) = content_bounds(doc, open_start, name);
    let next_open_start = find_open(doc, content_end, name);

    Some(TagSpan {
        open_start,
        content_start,
        content_end,
        next_open_start,
    })
}

/// Returns the content start and end of the tag opening at `open_start`
///
/// An empty name has no closing tag, so its content always ends at the next `<`.
pub(crate) fn content_bounds(doc: &str, open_start: usize, name: &str) -> (usize, usize) {
    let content_start = find_from(doc, open_start, ">").map_or(doc.len(), |gt| gt + 1);

    let close = if name.is_empty() {
        None
    } else {
        find_from(doc, content_start, &format!("</{}>", name))
    };
    let content_end = close
        .or_else(|| find_from(doc, content_start, "<"))
        .unwrap_or(doc.len());

    (content_start, content_end)
}

/// Finds the next `<name` that is followed by a tag-name boundary
fn find_open(doc: &str, from: usize, name: &str) -> Option<usize> {
    find_open_before(doc, from, doc.len(), name)
}

/// Finds the next `<name` that opens at or after `from` and ends by `limit`
pub(crate) fn find_open_before(doc: &str, from: usize, limit: usize, name: &str) -> Option<usize> {
    let window = doc.get(..limit)?;
    let open_tag = format!("<{}", name);
    let mut search_from = from;

    loop {
        let candidate = find_from(window, search_from, &open_tag)?;
        if name.is_empty() {
            return Some(candidate);
        }
        match doc.as_bytes().get(candidate + open_tag.len()) {
            None => return Some(candidate),
            Some(&b) if b == b'>' || b == b'/' || b.is_ascii_whitespace() => {
                return Some(candidate)
            }
            Some(_) => search_from = candidate + 1,
        }
    }
}

/// Returns the name of the tag opening at `open_start`
///
/// Closing tags, comments and doctype declarations have an empty name.
pub(crate) fn tag_name(doc: &str, open_start: usize) -> &str {
    let start = open_start + 1;
    let bytes = doc.as_bytes();
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_alphanumeric() {
        end += 1;
    }
    doc.get(start..end).unwrap_or("")
}
