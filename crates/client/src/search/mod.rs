//! Web search over the DuckDuckGo HTML results page.
//!
//! ### Pipeline
//! - Build `<search_url>?q=<query>` and run it through the bounded fetcher.
//! - Parse `#links .result__a` anchors in document order.
//! - Unwrap `duckduckgo.com/l/?uddg=` redirect links into their targets.
//!
//! No API key is involved. A page whose markup doesn't match yields no
//! results rather than an error.

pub mod normalize;
pub mod parse;

pub use normalize::normalize_link;
pub use parse::{MAX_RESULTS, clamp_limit, parse_results};

use url::Url;
use websift_core::{Error, FetchOptions, SearchResult};

use crate::fetch::BoundedFetcher;

/// Search client bound to one results endpoint.
#[derive(Clone)]
pub struct SearchClient {
    fetcher: BoundedFetcher,
    endpoint: Url,
}

impl SearchClient {
    /// Create a search client for `endpoint` (e.g. `https://duckduckgo.com/html`).
    pub fn new(fetcher: BoundedFetcher, endpoint: &str) -> Result<Self, Error> {
        let endpoint = Url::parse(endpoint).map_err(|e| Error::InvalidUrl(format!("search endpoint: {e}")))?;
        Ok(Self { fetcher, endpoint })
    }

    /// The results URL for `query`.
    pub fn query_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("q", query);
        url
    }

    /// Run `query` and return at most `limit` results (clamped to 1-10).
    ///
    /// Only fetch failures surface as errors.
    pub async fn search(&self, query: &str, limit: i64, options: FetchOptions) -> Result<Vec<SearchResult>, Error> {
        let url = self.query_url(query);

        tracing::debug!("searching: query={}", query);

        let page = self.fetcher.fetch_url(url, options).await?;
        let results = parse_results(&page.text, &page.final_url, limit);

        tracing::debug!("search completed in {}ms, {} results", page.fetch_ms, results.len());

        Ok(results)
    }
}
