//! Paragraph text extraction
//!
//! Walks every `<p>` region of an article and emits the visible text of each
//! child tag in document order. Decorative wrappers (`<span>`, `<sup>`) are
//! dropped unless they carry emphasis text, which is kept on its own.

use super::tag::{content_bounds, find_open_before, locate, tag_name, TagSpan};

/// Tags whose own text is discarded (citation markers, pronunciation spans)
const DECORATIVE_TAGS: &[&str] = &["span", "sup"];

/// Tag whose text is rescued from inside a decorative wrapper
const EMPHASIS_TAG: &str = "i";

/// Extracts the paragraph text runs of a document, in document order
///
/// Each run is the decoded content of one child tag. Runs that are empty
/// after entity elision are skipped.
///
/// # Example
///
/// ```
/// use wiki_relay::markup::extract_runs;
///
/// let doc = "<p>Rust<sup>[1]</sup> is <b>fast</b>.</p>";
/// assert_eq!(extract_runs(doc), vec!["Rust", " is ", "fast", "."]);
/// ```
pub fn extract_runs(doc: &str) -> Vec<String> {
    let mut runs = Vec::new();
    let mut cursor = 0;

    while let Some(paragraph) = locate(doc, cursor, "p") {
        extract_paragraph(doc, &paragraph, &mut runs);
        match paragraph.next_open_start {
            Some(next) => cursor = next,
            None => break,
        }
    }

    runs
}

/// Extracts the paragraph text of a document as one string
///
/// Runs are concatenated with no delimiter added between them.
pub fn extract_text(doc: &str) -> String {
    extract_runs(doc).concat()
}

fn extract_paragraph(doc: &str, paragraph: &TagSpan, runs: &mut Vec<String>) {
    // The first child is the <p> itself: its content runs up to the first nested tag.
    let mut cursor = paragraph.open_start;

    while let Some(child) = locate(doc, cursor, "") {
        if child.content_start >= paragraph.content_end {
            break;
        }

        let name = tag_name(doc, child.open_start);
        if !DECORATIVE_TAGS.contains(&name) {
            push_run(child.content(doc), runs);
            cursor = child.content_end;
            continue;
        }

        let (_, decorative_end) = content_bounds(doc, child.open_start, name);

        let emphasis = find_open_before(doc, child.content_start, decorative_end, EMPHASIS_TAG);
        if let Some(open_start) = emphasis {
            let (start, end) = content_bounds(doc, open_start, EMPHASIS_TAG);
            push_run(&doc[start..end], runs);
        }

        cursor = decorative_end;
    }
}

fn push_run(raw: &str, runs: &mut Vec<String>) {
    let text = elide_entities(raw);
    if !text.is_empty() {
        runs.push(text);
    }
}

/// Removes every `&...;` sequence from `raw`
///
/// Entities are stripped rather than decoded: `A&amp;B` becomes `AB`. An `&`
/// with no `;` after it is copied through unchanged.
fn elide_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        let Some(semi) = rest[amp..].find(';') else {
            break;
        };
        out.push_str(&rest[..amp]);
        rest = &rest[amp + semi + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paragraph() {
        assert_eq!(extract_text("<p>Hello world</p>"), "Hello world");
    }

    #[test]
    fn test_text_outside_paragraphs_ignored() {
        let doc = "<div>menu</div><p>Body</p><footer>legal</footer>";
        assert_eq!(extract_text(doc), "Body");
    }

    #[test]
    fn test_inline_children_kept_in_order() {
        let doc = r#"<p>The <a href="/wiki/Cat">cat</a> sat.</p>"#;
        assert_eq!(extract_runs(doc), vec!["The ", "cat", " sat."]);
    }

    #[test]
    fn test_multiple_paragraphs_concatenated() {
        let doc = "<p>One.</p>\n<p>Two.</p>";
        assert_eq!(extract_text(doc), "One.Two.");
    }

    #[test]
    fn test_entity_elision() {
        assert_eq!(extract_text("<p>A&amp;B</p>"), "AB");
        assert_eq!(extract_text("<p>x&#160;y&nbsp;z</p>"), "xyz");
    }

    #[test]
    fn test_entity_only_run_skipped() {
        let doc = "<p>&nbsp;<b>bold</b></p>";
        assert_eq!(extract_runs(doc), vec!["bold"]);
    }

    #[test]
    fn test_lone_ampersand_kept() {
        assert_eq!(extract_text("<p>Tom & Jerry</p>"), "Tom & Jerry");
    }

    #[test]
    fn test_decorative_unwrap_keeps_emphasis() {
        let doc = "<p><span><i>Kept</i></span></p>";
        assert_eq!(extract_text(doc), "Kept");
    }

    #[test]
    fn test_decorative_without_emphasis_dropped() {
        let doc = "<p><span>Dropped</span></p>";
        assert_eq!(extract_text(doc), "");
    }

    #[test]
    fn test_citation_markers_dropped() {
        let doc = r##"<p>Fact<sup class="reference"><a href="#cite-1">[1]</a></sup> stated.</p>"##;
        assert_eq!(extract_text(doc), "Fact stated.");
    }

    #[test]
    fn test_emphasis_after_decorative_not_rescued_twice() {
        let doc = "<p><span>x</span> and <i>later</i></p>";
        assert_eq!(extract_runs(doc), vec![" and ", "later"]);
    }

    #[test]
    fn test_empty_paragraph() {
        assert!(extract_runs("<p></p>").is_empty());
        assert!(extract_runs("").is_empty());
        assert!(extract_runs("<html><body>no paragraphs</body></html>").is_empty());
    }

    #[test]
    fn test_unclosed_paragraph_terminates() {
        let doc = "<p>open <b>bold</b> <p>second";
        let text = extract_text(doc);
        assert!(text.starts_with("open "));
        assert!(text.ends_with("second"));
    }

    #[test]
    fn test_malformed_tags_terminate() {
        for doc in ["<p><span", "<p><sup>", "<p><", "<p>a<span><i", "<p><<<<"] {
            let _ = extract_runs(doc);
        }
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let doc = "<p>A<span><i>b</i></span>&amp;c</p><p>d<sup>1</sup></p>";
        assert_eq!(extract_text(doc), extract_text(doc));
    }

    #[test]
    fn test_article_sized_page_is_linear() {
        let mut doc = String::from("<html><body>");
        for n in 0..1500 {
            doc.push_str(&format!(
                r##"<p>Entry {n} links <a href="/wiki/T{n}">topic</a>, is <b>bold</b><sup class="reference"><a href="#c{n}">[{n}]</a></sup> and <span><i>it{n}</i></span>.</p>"##
            ));
            doc.push_str(r#"<div class="navbox"><ul>"#);
            for m in 0..12 {
                doc.push_str(&format!(r#"<li><a href="/wiki/Nav_{m}">Nav {m}</a></li>"#));
            }
            doc.push_str("</ul></div>\n");
        }
        doc.push_str("</body></html>");
        assert!(doc.len() > 500_000);

        let started = std::time::Instant::now();
        let runs = extract_runs(&doc);
        let elapsed = started.elapsed();

        assert_eq!(runs.len(), 1500 * 7);
        assert_eq!(&runs[..7], ["Entry 0 links ", "topic", ", is ", "bold", " and ", "it0", "."]);
        assert!(elapsed < std::time::Duration::from_secs(2), "took {elapsed:?}");
    }

    #[test]
    fn test_elide_entities() {
        assert_eq!(elide_entities("a&lt;b&gt;c"), "abc");
        assert_eq!(elide_entities("no entities"), "no entities");
        assert_eq!(elide_entities("trailing &amp"), "trailing &amp");
        assert_eq!(elide_entities("&amp;"), "");
    }
}
