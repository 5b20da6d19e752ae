//! Plain-text rendering and metadata lookup on a `scraper` DOM.
//!
//! All walks use an explicit stack, so nesting depth never grows the call stack.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose content is never visible.
const HIDDEN_TAGS: &[&str] = &["head", "title", "script", "style", "noscript", "template"];

/// Elements rendered on their own line.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure", "footer", "form",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table",
    "tbody", "td", "th", "thead", "tr", "ul",
];

static OG_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:title"]"#).expect("invalid selector"));

static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").expect("invalid selector"));

static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("invalid selector"));

static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").expect("invalid selector"));

enum Step<N> {
    Visit(N),
    CloseBlock,
}

/// Page title from `og:title`, `<title>` or the first `<h1>`.
pub fn document_title(document: &Html) -> Option<String> {
    let from_meta = document
        .select(&OG_TITLE)
        .find_map(|m| m.value().attr("content"))
        .map(collapse_whitespace);
    let from_title = || document.select(&TITLE).next().map(|t| collapse_whitespace(&t.text().collect::<String>()));
    let from_h1 = || document.select(&H1).next().map(|h| collapse_whitespace(&h.text().collect::<String>()));

    [from_meta, from_title(), from_h1()].into_iter().flatten().find(|t| !t.is_empty())
}

/// Trimmed visible text of the document body, or an empty string.
pub fn body_text(document: &Html) -> String {
    document.select(&BODY).next().map(visible_text).unwrap_or_default()
}

/// Visible text of `el` with block elements on separate lines.
///
/// Only non-rendered content (`head`, `script`, `style`, `noscript`,
/// `template`) is skipped. Whitespace inside a line is collapsed.
pub fn visible_text(el: ElementRef<'_>) -> String {
    let mut raw = String::new();
    let mut stack: Vec<Step<_>> = el.children().collect::<Vec<_>>().into_iter().rev().map(Step::Visit).collect();

    while let Some(step) = stack.pop() {
        let node = match step {
            Step::Visit(node) => node,
            Step::CloseBlock => {
                raw.push('\n');
                continue;
            }
        };

        match node.value() {
            Node::Text(text) => raw.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c })),
            Node::Element(element) => {
                let name = element.name();
                if name == "br" {
                    raw.push('\n');
                    continue;
                }
                if HIDDEN_TAGS.contains(&name) {
                    continue;
                }
                if BLOCK_TAGS.contains(&name) {
                    raw.push('\n');
                    stack.push(Step::CloseBlock);
                }
                let children: Vec<_> = node.children().collect();
                stack.extend(children.into_iter().rev().map(Step::Visit));
            }
            _ => {}
        }
    }

    raw.split('\n').map(collapse_whitespace).filter(|line| !line.is_empty()).collect::<Vec<_>>().join("\n\n")
}

/// Deepest element nesting level in the document.
pub fn max_depth(document: &Html) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(document.root_element(), 1usize)];

    while let Some((el, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        stack.extend(el.children().filter_map(ElementRef::wrap).map(|child| (child, depth + 1)));
    }

    deepest
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
