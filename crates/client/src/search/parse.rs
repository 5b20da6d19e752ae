//! Result-page parsing for the DuckDuckGo HTML surface.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;
use websift_core::SearchResult;

use super::normalize::normalize_link;

/// Upper bound on results per call.
pub const MAX_RESULTS: usize = 10;

static RESULT_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#links .result__a").expect("invalid selector"));

static SNIPPET: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".result__snippet").expect("invalid selector"));

/// Clamp a caller-supplied limit into `1..=MAX_RESULTS`.
pub fn clamp_limit(limit: i64) -> usize {
    limit.clamp(1, MAX_RESULTS as i64) as usize
}

/// Parse result anchors out of a results page, in document order.
///
/// Relative hrefs are resolved against `base_url`. Anchors with an empty or
/// unresolvable href are skipped. Unrecognised markup yields an empty list.
pub fn parse_results(html: &str, base_url: &Url, limit: i64) -> Vec<SearchResult> {
    let limit = clamp_limit(limit);
    let document = Html::parse_document(html);

    let results: Vec<SearchResult> = document
        .select(&RESULT_LINK)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?.trim();
            if href.is_empty() {
                return None;
            }
            let url = resolve(&normalize_link(href), base_url)?;
            Some(SearchResult { url, title: visible_text(anchor), snippet: snippet_for(anchor) })
        })
        .take(limit)
        .collect();

    tracing::debug!(count = results.len(), limit, "parsed search results");

    results
}

/// Absolute URLs pass through; anything else is joined onto the page URL.
fn resolve(href: &str, base_url: &Url) -> Option<String> {
    if Url::parse(href).is_ok() {
        return Some(href.to_string());
    }
    base_url.join(href).ok().map(String::from)
}

fn visible_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let trimmed = text.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

/// Snippet from the enclosing `.result` block, if any.
fn snippet_for(anchor: ElementRef<'_>) -> Option<String> {
    let container = anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().classes().any(|c| c == "result"))?;

    container.select(&SNIPPET).find_map(|snippet| {
        let text = snippet.text().collect::<Vec<_>>().join(" ");
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() { None } else { Some(collapsed) }
    })
}
