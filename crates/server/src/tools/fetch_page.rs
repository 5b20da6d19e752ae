//! fetch_page tool implementation.
//!
//! Fetches a URL under a byte budget and deadline, then extracts the readable
//! article text. Failures are reported in-band as `{"url": ..., "error": ...}`.

use rmcp::model::{CallToolResult, Content};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use websift_client::PageReader;
use websift_core::{FetchOptions, Link};

/// Input parameters for fetch_page tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FetchPageParams {
    /// Absolute http(s) URL to fetch.
    pub url: String,

    /// Request deadline in milliseconds. Defaults to the server setting.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Maximum response size. Defaults to the server setting.
    #[serde(default)]
    pub max_bytes: Option<usize>,
}

/// Output structure for fetch_page tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FetchPageOutput {
    Failed {
        url: String,
        error: String,
    },
    Page {
        /// The URL as requested.
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        content: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        links: Vec<Link>,
    },
}

impl FetchPageOutput {
    pub fn into_call_result(self) -> CallToolResult {
        CallToolResult::success(vec![Content::text(serde_json::to_string_pretty(&self).unwrap_or_default())])
    }
}

/// Implementation of the fetch_page tool.
pub async fn fetch_impl(reader: &PageReader, defaults: FetchOptions, params: FetchPageParams) -> FetchPageOutput {
    let options = defaults.with_overrides(params.timeout_ms, params.max_bytes);

    match reader.read(&params.url, options).await {
        Ok(outcome) => {
            FetchPageOutput::Page { url: params.url, title: outcome.title, content: outcome.content, links: outcome.links }
        }
        Err(e) => {
            if e.is_timeout() {
                tracing::warn!(url = %params.url, timeout_ms = options.timeout_ms, "fetch_page timed out");
            } else {
                tracing::warn!("fetch_page failed for {}: {}", params.url, e);
            }
            FetchPageOutput::Failed { url: params.url, error: e.to_string() }
        }
    }
}
