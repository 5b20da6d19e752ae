//! Link harvesting from the extracted article region.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;
use websift_core::Link;

static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").expect("invalid selector"));

static BASE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("base[href]").expect("invalid selector"));

/// Resolution base for relative references: the document's `<base href>`
/// joined onto `base_url`, or `base_url` itself.
pub fn document_base(document: &Html, base_url: &Url) -> Url {
    document
        .select(&BASE)
        .next()
        .and_then(|b| b.value().attr("href"))
        .and_then(|href| base_url.join(href.trim()).ok())
        .unwrap_or_else(|| base_url.clone())
}

/// Extract http(s) links under `roots`, resolving relative URLs against `base`.
///
/// Links are returned in document order and deduplicated by resolved href.
pub fn extract_links(roots: &[ElementRef<'_>], base: &Url) -> Vec<Link> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in roots.iter().flat_map(|root| root.select(&LINK)) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let resolved = match base.join(href.trim()) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => u.to_string(),
            _ => continue,
        };

        if !seen.insert(resolved.clone()) {
            continue;
        }

        let text = element.text().collect::<Vec<_>>().join(" ");
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let text = if text.is_empty() { "[link]".to_string() } else { text };

        links.push(Link { text, href: resolved });
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links_in_body(html: &str, base: &str) -> Vec<Link> {
        let document = Html::parse_document(html);
        let base = document_base(&document, &Url::parse(base).unwrap());
        let body = document.select(&Selector::parse("body").unwrap()).next().unwrap();
        extract_links(&[body], &base)
    }

    #[test]
    fn test_extract_links_basic() {
        let links = links_in_body(r#"<body><a href="https://example.com">Example</a></body>"#, "https://example.com");

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "Example");
        assert_eq!(links[0].href, "https://example.com/");
    }

    #[test]
    fn test_extract_links_relative() {
        let links = links_in_body(
            r#"<body><a href="/about">About</a><a href="contact">Contact</a></body>"#,
            "https://example.com/path/",
        );

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].href, "https://example.com/about");
        assert_eq!(links[1].href, "https://example.com/path/contact");
    }

    #[test]
    fn test_extract_links_honours_base_element() {
        let links = links_in_body(
            r#"<html><head><base href="https://cdn.example.net/docs/"></head>
               <body><a href="guide.html">Guide</a></body></html>"#,
            "https://example.com/page",
        );

        assert_eq!(links[0].href, "https://cdn.example.net/docs/guide.html");
    }

    #[test]
    fn test_extract_links_duplicate() {
        let links = links_in_body(
            r#"<body><a href="https://example.com">First</a><a href="https://example.com">Second</a></body>"#,
            "https://example.com",
        );

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "First");
    }

    #[test]
    fn test_extract_links_empty_text() {
        let links = links_in_body(r#"<body><a href="https://example.com">   </a></body>"#, "https://example.com");
        assert_eq!(links[0].text, "[link]");
    }

    #[test]
    fn test_extract_links_skips_non_http() {
        let links = links_in_body(
            r#"<body><a href="mailto:a@example.com">Mail</a><a href="javascript:void(0)">JS</a></body>"#,
            "https://example.com",
        );
        assert!(links.is_empty());
    }

    #[test]
    fn test_extract_links_multiline_text() {
        let links = links_in_body(
            "<body><a href=\"https://example.com\">\n  Line 1\n  Line 2\n</a></body>",
            "https://example.com",
        );
        assert_eq!(links[0].text, "Line 1 Line 2");
    }
}
