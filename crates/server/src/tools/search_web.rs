//! search_web tool implementation.
//!
//! Scrapes the DuckDuckGo HTML results page. Failures are reported in-band as
//! `{"error": "..."}` so the call itself always succeeds.

use rmcp::model::{CallToolResult, Content};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use websift_client::SearchClient;
use websift_core::{Error, FetchOptions, SearchResult};

/// Input parameters for search_web tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchWebParams {
    /// Search query (required).
    pub query: String,

    /// Number of results (1-10, default 5). Out-of-range values are clamped.
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Output of the search_web tool: a result list or an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum SearchWebOutput {
    Results(Vec<SearchResult>),
    Failed { error: String },
}

impl SearchWebOutput {
    /// Wrap the output as a successful tool result carrying JSON text.
    pub fn into_call_result(self) -> CallToolResult {
        CallToolResult::success(vec![Content::text(serde_json::to_string_pretty(&self).unwrap_or_default())])
    }
}

/// Implementation of the search_web tool.
pub async fn search_impl(
    client: &SearchClient, options: FetchOptions, default_limit: u8, params: SearchWebParams,
) -> SearchWebOutput {
    match run_search(client, options, default_limit, &params).await {
        Ok(results) => SearchWebOutput::Results(results),
        Err(e) => {
            tracing::warn!("search_web failed for query {:?}: {}", params.query, e);
            SearchWebOutput::Failed { error: e.to_string() }
        }
    }
}

async fn run_search(
    client: &SearchClient, options: FetchOptions, default_limit: u8, params: &SearchWebParams,
) -> Result<Vec<SearchResult>, Error> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(Error::InvalidInput("query cannot be empty".into()));
    }

    let limit = params.limit.unwrap_or(i64::from(default_limit));
    client.search(query, limit, options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, response::Html, routing::get};
    use std::net::SocketAddr;
    use websift_client::{BoundedFetcher, TransportConfig};

    const TWO_RESULTS: &str = r#"
        <div id="links">
          <div class="result">
            <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fa">
              Result A
            </a>
          </div>
          <div class="result">
            <a class="result__a" href="https://example.com/b">Result B</a>
          </div>
        </div>
    "#;

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn client(endpoint: &str) -> SearchClient {
        SearchClient::new(BoundedFetcher::new(&TransportConfig::default()).unwrap(), endpoint).unwrap()
    }

    #[tokio::test]
    async fn test_search_returns_results() {
        let app = Router::new().route("/html", get(|| async { Html(TWO_RESULTS) }));
        let addr = serve(app).await;

        let params = SearchWebParams { query: "query".into(), limit: None };
        let output = search_impl(&client(&format!("http://{addr}/html")), FetchOptions::default(), 5, params).await;

        let SearchWebOutput::Results(results) = output else {
            panic!("expected results, got {output:?}");
        };
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://example.com/a");
        assert_eq!(results[0].title.as_deref(), Some("Result A"));
    }

    #[tokio::test]
    async fn test_search_limit_applied() {
        let app = Router::new().route("/html", get(|| async { Html(TWO_RESULTS) }));
        let addr = serve(app).await;

        let params = SearchWebParams { query: "query".into(), limit: Some(0) };
        let output = search_impl(&client(&format!("http://{addr}/html")), FetchOptions::default(), 5, params).await;

        assert!(matches!(output, SearchWebOutput::Results(ref r) if r.len() == 1));
    }

    #[tokio::test]
    async fn test_empty_query_is_in_band_error() {
        let params = SearchWebParams { query: "   ".into(), limit: None };
        let output = search_impl(&client("http://127.0.0.1:9/html"), FetchOptions::default(), 5, params).await;

        match output {
            SearchWebOutput::Failed { error } => assert!(error.starts_with("INVALID_INPUT")),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_network_failure_is_in_band_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let params = SearchWebParams { query: "query".into(), limit: None };
        let output = search_impl(&client(&format!("http://{addr}/html")), FetchOptions::default(), 5, params).await;

        assert!(matches!(output, SearchWebOutput::Failed { .. }));
        assert!(!output.into_call_result().is_error.unwrap_or(false));
    }

    #[test]
    fn test_output_serialization() {
        let ok = SearchWebOutput::Results(vec![SearchResult {
            url: "https://example.com/a".into(),
            title: Some("A".into()),
            snippet: None,
        }]);
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"[{"url":"https://example.com/a","title":"A"}]"#);

        let failed = SearchWebOutput::Failed { error: "FETCH_TIMEOUT: slow".into() };
        assert_eq!(serde_json::to_string(&failed).unwrap(), r#"{"error":"FETCH_TIMEOUT: slow"}"#);
    }
}
