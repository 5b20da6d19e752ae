//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::{
    fetch_page::{FetchPageParams, fetch_impl},
    search_web::{SearchWebParams, search_impl},
};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use websift_client::{BoundedFetcher, PageReader, SearchClient, TransportConfig};
use websift_core::{AppConfig, FetchOptions};

/// The main MCP server handler for websift.
///
/// Holds no per-call mutable state; clones share the HTTP connection pool.
#[derive(Clone)]
pub struct WebSiftServer {
    tool_router: ToolRouter<Self>,
    search: SearchClient,
    reader: PageReader,
    defaults: FetchOptions,
    default_limit: u8,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl WebSiftServer {
    /// Create a new server handler from loaded configuration.
    pub fn new(config: &AppConfig) -> Result<Self, websift_core::Error> {
        let transport =
            TransportConfig { user_agent: config.user_agent.clone(), max_redirects: config.max_redirects };
        let fetcher = BoundedFetcher::new(&transport)?;

        Ok(Self {
            tool_router: Self::tool_router(),
            search: SearchClient::new(fetcher.clone(), &config.search_url)?,
            reader: PageReader::new(fetcher),
            defaults: config.fetch_options(),
            default_limit: config.default_search_limit,
        })
    }

    /// Search the web via the DuckDuckGo HTML endpoint.
    #[tool(description = "Search the web. Returns a JSON array of {url, title, snippet}; failures return {error}.")]
    async fn search_web(&self, params: Parameters<SearchWebParams>) -> Result<CallToolResult, McpError> {
        Ok(search_impl(&self.search, self.defaults, self.default_limit, params.0).await.into_call_result())
    }

    /// Fetch a page and extract its readable content.
    ///
    /// The response body is cut at `max_bytes` and the whole request at `timeout_ms`.
    #[tool(
        description = "Fetch a URL and extract readable text. Returns {url, title, content, links}; failures return {url, error}."
    )]
    async fn fetch_page(&self, params: Parameters<FetchPageParams>) -> Result<CallToolResult, McpError> {
        Ok(fetch_impl(&self.reader, self.defaults, params.0).await.into_call_result())
    }
}

impl ServerHandler for WebSiftServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "websift-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_both_tools() {
        let server = WebSiftServer::new(&AppConfig::default()).unwrap();
        let mut names: Vec<String> = server.tool_router.list_all().into_iter().map(|t| t.name.to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["fetch_page", "search_web"]);
    }

    #[test]
    fn test_server_info() {
        let server = WebSiftServer::new(&AppConfig::default()).unwrap();
        let info = server.get_info();
        assert_eq!(info.server_info.name, "websift-mcp");
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_invalid_search_url_rejected() {
        let config = AppConfig { search_url: "not a url".into(), ..Default::default() };
        assert!(WebSiftServer::new(&config).is_err());
    }
}
