//! Document link discovery over parsed HTML.

use scraper::{ElementRef, Html};
use tracing::{debug, instrument};

/// Case-insensitive marker a `href` must contain to be a candidate.
pub const DOCUMENT_MARKER: &str = ".pdf";

/// Extracts candidate document links from raw HTML.
///
/// The HTML parser is error-recovering, so malformed markup still yields
/// whatever anchors it could recover; parse errors are logged at debug level.
///
/// # Examples
///
/// ```
/// use pdf_harvest::parser::extract_document_links;
///
/// let html = r#"<a href="a.pdf">A</a><a href="B.PDF">B</a><a href="c.txt">C</a>"#;
/// assert_eq!(extract_document_links(html), vec!["a.pdf", "B.PDF"]);
/// ```
#[instrument(skip(html), fields(html_len = html.len()))]
#[must_use]
pub fn extract_document_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    if !document.errors.is_empty() {
        debug!(errors = document.errors.len(), "HTML parsed with recoverable errors");
    }
    let links = collect_document_links(&document);
    debug!(links = links.len(), "document links extracted");
    links
}

/// Walks `document` in pre-order and returns the trimmed `href` of every
/// `<a>` whose value contains [`DOCUMENT_MARKER`], ignoring case.
///
/// Output keeps the original casing and includes duplicates.
#[must_use]
pub fn collect_document_links(document: &Html) -> Vec<String> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "a")
        .flat_map(|element| {
            element
                .value()
                .attrs()
                .filter(|(name, _)| *name == "href")
                .map(|(_, value)| value.trim())
                .filter(|href| href.to_lowercase().contains(DOCUMENT_MARKER))
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_case_insensitive_match_preserves_case() {
        let html = r#"
            <html><body>
                <a href="a.pdf">A</a>
                <a href="B.PDF">B</a>
                <a href="c.txt">C</a>
            </body></html>
        "#;
        assert_eq!(extract_document_links(html), vec!["a.pdf", "B.PDF"]);
    }

    #[test]
    fn test_extract_keeps_duplicates_in_document_order() {
        let html = r#"
            <ul>
                <li><a href="/x.pdf">x</a></li>
                <li><div><a href="/y.pdf">y</a></div></li>
                <li><a href="/x.pdf">x again</a></li>
            </ul>
        "#;
        assert_eq!(
            extract_document_links(html),
            vec!["/x.pdf", "/y.pdf", "/x.pdf"]
        );
    }

    #[test]
    fn test_extract_preorder_parent_before_nested_child() {
        // Nested anchors are split by the parser; order still follows the source.
        let html = r#"<div><a href="outer.pdf"><span><a href="inner.pdf">i</a></span></a></div><a href="last.pdf">l</a>"#;
        let links = extract_document_links(html);
        assert_eq!(links.first().map(String::as_str), Some("outer.pdf"));
        assert_eq!(links.last().map(String::as_str), Some("last.pdf"));
        assert!(links.contains(&"inner.pdf".to_string()));
    }

    #[test]
    fn test_extract_trims_whitespace() {
        let html = "<a href=\"  \n https://x.com/doc.pdf \t\">doc</a>";
        assert_eq!(extract_document_links(html), vec!["https://x.com/doc.pdf"]);
    }

    #[test]
    fn test_extract_ignores_other_elements_and_attributes() {
        let html = r#"
            <link href="style.pdf">
            <img src="picture.pdf">
            <a data-href="nope.pdf" title="file.pdf">no href</a>
            <a>no attributes</a>
            <a href="https://x.com/report.pdf?download=1">yes</a>
        "#;
        assert_eq!(
            extract_document_links(html),
            vec!["https://x.com/report.pdf?download=1"]
        );
    }

    #[test]
    fn test_extract_marker_anywhere_in_href() {
        let html = r#"<a href="/files.PDF/view">v</a><a href="/pdf/readme">r</a>"#;
        assert_eq!(extract_document_links(html), vec!["/files.PDF/view"]);
    }

    #[test]
    fn test_extract_malformed_html_is_best_effort() {
        let html = r#"<html><body><a href="ok.pdf">ok<div><a href="also.pdf"</body>"#;
        let links = extract_document_links(html);
        assert_eq!(links.first().map(String::as_str), Some("ok.pdf"));
    }

    #[test]
    fn test_extract_empty_and_garbage_input() {
        assert!(extract_document_links("").is_empty());
        assert!(extract_document_links("<<<>>> not html at all").is_empty());
    }

    #[test]
    fn test_extract_concatenated_pages() {
        let page_one = r#"<html><body><a href="one.pdf">1</a></body></html>"#;
        let page_two = r#"<html><body><a href="two.pdf">2</a></body></html>"#;
        let combined = format!("{page_one}{page_two}");
        assert_eq!(extract_document_links(&combined), vec!["one.pdf", "two.pdf"]);
    }
}
