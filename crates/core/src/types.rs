//! Value records shared between the client pipeline and the MCP tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Default fetch deadline in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Default byte budget for a single fetch.
pub const DEFAULT_MAX_BYTES: usize = 1_500_000;

/// A single search hit, in the order it appeared on the results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchResult {
    /// Absolute target URL with redirect wrappers removed.
    pub url: String,
    /// Visible anchor text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Result description text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

/// A link harvested from extracted article content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Link {
    /// Link text content
    pub text: String,
    /// Resolved href URL
    pub href: String,
}

/// Readable content pulled out of a fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FetchOutcome {
    /// Article text, or the body text when no article was found.
    pub content: String,
    /// Article title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Links found inside the article region.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

/// Request-scoped limits for one bounded fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOptions {
    /// Wall-clock deadline for the whole request, body included.
    pub timeout_ms: u64,
    /// Budget of received bytes; the decoded text never exceeds this many characters.
    pub max_bytes: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { timeout_ms: DEFAULT_TIMEOUT_MS, max_bytes: DEFAULT_MAX_BYTES }
    }
}

impl FetchOptions {
    /// Reject zero deadlines and zero budgets.
    pub fn validate(&self) -> Result<(), Error> {
        if self.timeout_ms == 0 {
            return Err(Error::InvalidInput("timeout_ms must be greater than 0".into()));
        }
        if self.max_bytes == 0 {
            return Err(Error::InvalidInput("max_bytes must be greater than 0".into()));
        }
        Ok(())
    }

    /// Apply optional per-call overrides on top of these options.
    pub fn with_overrides(self, timeout_ms: Option<u64>, max_bytes: Option<usize>) -> Self {
        Self { timeout_ms: timeout_ms.unwrap_or(self.timeout_ms), max_bytes: max_bytes.unwrap_or(self.max_bytes) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_options_default() {
        let options = FetchOptions::default();
        assert_eq!(options.timeout_ms, 15_000);
        assert_eq!(options.max_bytes, 1_500_000);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_fetch_options_rejects_zero() {
        let options = FetchOptions { timeout_ms: 0, ..Default::default() };
        assert!(matches!(options.validate(), Err(Error::InvalidInput(_))));

        let options = FetchOptions { max_bytes: 0, ..Default::default() };
        assert!(matches!(options.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_fetch_options_overrides() {
        let options = FetchOptions::default().with_overrides(None, Some(200_000));
        assert_eq!(options.timeout_ms, 15_000);
        assert_eq!(options.max_bytes, 200_000);
    }

    #[test]
    fn test_search_result_omits_empty_fields() {
        let result = SearchResult { url: "https://example.com/a".into(), title: None, snippet: None };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"url":"https://example.com/a"}"#);
    }

    #[test]
    fn test_fetch_outcome_omits_empty_links() {
        let outcome = FetchOutcome { content: "text".into(), title: Some("T".into()), links: Vec::new() };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["content"], "text");
        assert_eq!(json["title"], "T");
        assert!(json.get("links").is_none());
    }
}
