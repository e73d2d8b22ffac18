//! Article link discovery
//!
//! Scans a seed page from a cursor for the next `href` that names a same-site
//! article. Links inside tables (navigation boxes) and links to files are
//! rejected, and a rejection simply tells the caller where to resume.

use super::find_from;
use super::tag::locate;

/// Path prefix every accepted article link starts with
const ARTICLE_PREFIX: &str = "/wiki";

/// Marker of a link to a media file page
const FILE_MARKER: &str = "File:";

/// Outcome of one discovery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkVerdict {
    /// A same-site article; holds the page name without its leading `/`
    Article(String),

    /// A link to a file page, rejected
    FileLink,

    /// Any other target (external, fragment, non-article path), rejected
    NotArticle,
}

/// The result of one discovery attempt plus the cursor to resume from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    pub verdict: LinkVerdict,

    /// Offset of the closing quote of the examined `href` value
    pub cursor_after: usize,
}

impl LinkCandidate {
    /// Returns the article name if this candidate was accepted
    pub fn article(&self) -> Option<&str> {
        match &self.verdict {
            LinkVerdict::Article(name) => Some(name),
            _ => None,
        }
    }
}

/// Finds the next article link candidate at or after `cursor`
///
/// Returns `None` once no further `href` with a quoted value exists, which
/// means the document is exhausted for discovery purposes.
///
/// The accepted name drops the leading `/` of the path, so
/// `href="/wiki/Rust"` yields `wiki/Rust`.
///
/// # Example
///
/// ```
/// use wiki_relay::markup::{next_link, LinkVerdict};
///
/// let doc = r#"<a href="/wiki/Rust">Rust</a>"#;
/// let candidate = next_link(doc, 0).unwrap();
/// assert_eq!(candidate.verdict, LinkVerdict::Article("wiki/Rust".to_string()));
/// ```
pub fn next_link(doc: &str, cursor: usize) -> Option<LinkCandidate> {
    let mut href = find_from(doc, cursor, "href")?;

    if find_from(&doc[..href], cursor, "<table").is_some() {
        let table_end = find_from(doc, cursor, "</table>");
        if table_end.map_or(true, |end| href < end) {
            // An unterminated table swallows the rest of the document.
            href = find_from(doc, table_end?, "href")?;
        }
    }

    let value_start = find_from(doc, href, "\"")? + 1;
    let value_end = find_from(doc, value_start, "\"")?;

    let verdict = classify(&doc[value_start..value_end]);
    Some(LinkCandidate {
        verdict,
        cursor_after: value_end,
    })
}

fn classify(value: &str) -> LinkVerdict {
    if value.contains(FILE_MARKER) {
        return LinkVerdict::FileLink;
    }
    if !value.starts_with(ARTICLE_PREFIX) {
        return LinkVerdict::NotArticle;
    }
    LinkVerdict::Article(value[1..].to_string())
}

/// Returns the offset discovery should start from on a seed page
///
/// Links before the first paragraph belong to page chrome, so scanning starts
/// at the content of the first `<p>`, or at the top when there is none.
pub fn first_paragraph_cursor(doc: &str) -> usize {
    locate(doc, 0, "p").map_or(0, |paragraph| paragraph.content_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs discovery to exhaustion and collects the accepted names
    fn all_articles(doc: &str) -> Vec<String> {
        let mut cursor = 0;
        let mut found = Vec::new();
        while let Some(candidate) = next_link(doc, cursor) {
            assert!(candidate.cursor_after > cursor);
            if let Some(name) = candidate.article() {
                found.push(name.to_string());
            }
            cursor = candidate.cursor_after;
        }
        found
    }

    #[test]
    fn test_accepts_article_link() {
        let doc = r#"<a href="/wiki/Rust_(programming_language)">Rust</a>"#;
        let candidate = next_link(doc, 0).unwrap();
        assert_eq!(candidate.article(), Some("wiki/Rust_(programming_language)"));
        assert_eq!(&doc[candidate.cursor_after..candidate.cursor_after + 1], "\"");
    }

    #[test]
    fn test_table_links_skipped() {
        let doc = r#"<table><a href="/wiki/X">x</a></table><a href="/wiki/Y">y</a>"#;
        let candidate = next_link(doc, 0).unwrap();
        assert_eq!(candidate.article(), Some("wiki/Y"));
        assert_eq!(all_articles(doc), vec!["wiki/Y"]);
    }

    #[test]
    fn test_unterminated_table_exhausts() {
        let doc = r#"<table><a href="/wiki/X">x</a>"#;
        assert_eq!(next_link(doc, 0), None);
    }

    #[test]
    fn test_link_before_table_accepted() {
        let doc = r#"<a href="/wiki/A">a</a><table><a href="/wiki/X">x</a></table>"#;
        assert_eq!(all_articles(doc), vec!["wiki/A"]);
    }

    #[test]
    fn test_file_link_rejected_and_cursor_advances() {
        let doc = r#"<a href="/wiki/File:Z.png">img</a><a href="/wiki/Z">z</a>"#;
        let candidate = next_link(doc, 0).unwrap();
        assert_eq!(candidate.verdict, LinkVerdict::FileLink);
        assert_eq!(candidate.cursor_after, doc.find(".png\"").unwrap() + 4);

        let next = next_link(doc, candidate.cursor_after).unwrap();
        assert_eq!(next.article(), Some("wiki/Z"));
    }

    #[test]
    fn test_non_article_links_rejected() {
        for value in [
            "https://example.org/",
            "#cite_note-1",
            "/w/index.php?title=Rust",
            "//en.wikipedia.org/wiki/Rust",
        ] {
            let doc = format!(r#"<a href="{}">x</a>"#, value);
            let candidate = next_link(&doc, 0).unwrap();
            assert_eq!(candidate.verdict, LinkVerdict::NotArticle, "{value}");
        }
    }

    #[test]
    fn test_exhausted_without_href() {
        assert_eq!(next_link("<p>No links here</p>", 0), None);
        assert_eq!(next_link(r#"<a href="/wiki/A>"#, 0), None);
        assert_eq!(next_link("", 0), None);
    }

    #[test]
    fn test_walks_all_links_in_order() {
        let doc = r#"
            <a href="/wiki/One">1</a>
            <link rel="stylesheet" href="/static/site.css">
            <a href="/wiki/File:Pic.jpg">pic</a>
            <a href="/wiki/Two">2</a>
        "#;
        assert_eq!(all_articles(doc), vec!["wiki/One", "wiki/Two"]);
    }

    #[test]
    fn test_first_paragraph_cursor() {
        let doc = r#"<a href="/wiki/Nav">nav</a><p>Body <a href="/wiki/Body">b</a></p>"#;
        let cursor = first_paragraph_cursor(doc);
        assert_eq!(&doc[cursor..cursor + 5], "Body ");
        assert_eq!(next_link(doc, cursor).unwrap().article(), Some("wiki/Body"));
        assert_eq!(first_paragraph_cursor("<div></div>"), 0);
    }
}
