//! Readable content extraction.
//!
//! Provides a stable extraction abstraction that can be swapped later.
//!
//! ### Primary Algorithm
//! - Mozilla-style readability scoring via the `readability` crate.
//! - The chosen article HTML is re-rendered to plain text with block-level
//!   line breaks, and its links are harvested against the document base.
//!
//! ### Fallback
//! - Documents nested deeper than `ExtractConfig::max_depth` skip the
//!   readability pass, which walks the tree recursively.
//! - When no article is found the trimmed body text is returned without a title.
//! - An empty body yields empty content. Extraction never fails.

pub mod links;
pub mod text;

pub use links::{document_base, extract_links};

use std::io::Cursor;

use scraper::Html;
use url::Url;
use websift_core::{FetchOutcome, Link};

/// Configuration for content extraction.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Deepest element nesting handed to the readability pass (default: 512)
    pub max_depth: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

/// Main article found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Page title
    pub title: Option<String>,
    /// Plain text of the article region
    pub text_content: String,
    /// Links inside the article region
    pub links: Vec<Link>,
}

/// Stable extractor trait for content extraction.
///
/// This allows swapping the extraction engine later without changing tool code.
pub trait Extractor: Send + Sync {
    /// Find the main article in `html`, or `None` when there isn't one.
    fn extract(&self, html: &str, base_url: &Url) -> Option<Article>;
}

/// Readability extractor implementation.
#[derive(Debug, Clone, Default)]
pub struct ReadabilityExtractor {
    config: ExtractConfig,
}

impl ReadabilityExtractor {
    /// Create a new extractor with the given configuration.
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }
}

impl Extractor for ReadabilityExtractor {
    fn extract(&self, html: &str, base_url: &Url) -> Option<Article> {
        let document = Html::parse_document(html);

        let depth = text::max_depth(&document);
        if depth > self.config.max_depth {
            tracing::debug!(depth, max_depth = self.config.max_depth, "document too deeply nested for readability");
            return None;
        }

        let base = document_base(&document, base_url);
        let product = match readability::extractor::extract(&mut Cursor::new(html.as_bytes()), &base) {
            Ok(product) => product,
            Err(e) => {
                tracing::debug!("readability extraction failed for {}: {}", base, e);
                return None;
            }
        };

        let fragment = Html::parse_fragment(&product.content);
        let root = fragment.root_element();

        let mut text_content = text::visible_text(root);
        if text_content.is_empty() {
            text_content = text::collapse_whitespace(&product.text);
        }
        if text_content.is_empty() {
            return None;
        }

        let links = extract_links(&[root], &base);
        let title = text::document_title(&document).or_else(|| {
            let title = text::collapse_whitespace(&product.title);
            (!title.is_empty()).then_some(title)
        });

        Some(Article { title, text_content, links })
    }
}

/// Extract with `extractor`, falling back to body text.
pub fn extract_with(extractor: &dyn Extractor, html: &str, base_url: &Url) -> FetchOutcome {
    if let Some(article) = extractor.extract(html, base_url) {
        tracing::debug!(chars = article.text_content.len(), "article extracted");
        return FetchOutcome { content: article.text_content, title: article.title, links: article.links };
    }

    tracing::debug!("no article found, using body text");
    let document = Html::parse_document(html);
    FetchOutcome { content: text::body_text(&document), title: None, links: Vec::new() }
}

/// Extract readable content from HTML using the default extractor.
pub fn extract_readable(html: &str, base_url: &Url) -> FetchOutcome {
    extract_with(&ReadabilityExtractor::default(), html, base_url)
}
