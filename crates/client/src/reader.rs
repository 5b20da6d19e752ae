//! Fetch a page under a byte budget and pull out its readable content.

use std::sync::Arc;

use websift_core::{Error, FetchOptions, FetchOutcome};

use crate::extract::{Extractor, ReadabilityExtractor, extract_with};
use crate::fetch::BoundedFetcher;

/// Bounded fetcher plus extractor.
#[derive(Clone)]
pub struct PageReader {
    fetcher: BoundedFetcher,
    extractor: Arc<dyn Extractor>,
}

impl PageReader {
    /// Create a reader using the readability extractor.
    pub fn new(fetcher: BoundedFetcher) -> Self {
        Self::with_extractor(fetcher, Arc::new(ReadabilityExtractor::default()))
    }

    /// Create a reader with a custom extractor.
    pub fn with_extractor(fetcher: BoundedFetcher, extractor: Arc<dyn Extractor>) -> Self {
        Self { fetcher, extractor }
    }

    /// Fetch `url` and extract its article.
    ///
    /// The fetched text is already bounded; extraction adds no further
    /// truncation. Relative references resolve against the post-redirect URL.
    pub async fn read(&self, url: &str, options: FetchOptions) -> Result<FetchOutcome, Error> {
        let page = self.fetcher.fetch(url, options).await?;

        let extractor = self.extractor.clone();
        let base = page.final_url.clone();
        let html = page.text;

        let outcome = tokio::task::spawn_blocking(move || extract_with(extractor.as_ref(), &html, &base))
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("extraction task failed for {}: {}", page.final_url, e);
                FetchOutcome::default()
            });

        Ok(outcome)
    }
}
