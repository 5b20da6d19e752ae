//! HTTP transport seam for the bounded fetcher.
//!
//! The fetcher only needs a status, the final URL and a body it can pull from.
//! `ReqwestTransport` is the production implementation; tests swap in fakes.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use reqwest::{Client, header};
use url::Url;
use websift_core::Error;

/// Response body as handed over by a transport.
pub enum Body {
    /// Incremental byte stream. Dropping it cancels the rest of the transfer.
    Streaming(BoxStream<'static, Result<Bytes, Error>>),
    /// Text the transport already read in full.
    Buffered(String),
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Streaming(_) => f.write_str("Body::Streaming"),
            Body::Buffered(text) => f.debug_tuple("Body::Buffered").field(&text.len()).finish(),
        }
    }
}

/// Response head plus body from a single GET.
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// The final URL after redirects
    pub final_url: Url,
    /// Response body, not yet read
    pub body: Body,
}

/// One-shot HTTP GET.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET and return as soon as the response head arrives.
    async fn get(&self, url: &Url) -> Result<TransportResponse, Error>;
}

/// Configuration for the reqwest transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// User agent string sent with every request
    pub user_agent: String,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self { user_agent: websift_core::AppConfig::default().user_agent, max_redirects: 5 }
    }
}

/// reqwest-backed transport with rustls and transparent decompression.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Build the underlying HTTP client.
    ///
    /// No client-level timeout is set; the fetcher owns the deadline.
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::ClientInit(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, Error> {
        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let final_url = response.url().clone();
        let body = Body::Streaming(response.bytes_stream().map(|r| r.map_err(map_reqwest_error)).boxed());

        Ok(TransportResponse { status, final_url, body })
    }
}

/// Map a reqwest failure onto the fetch error taxonomy.
pub fn map_reqwest_error(err: reqwest::Error) -> Error {
    if err.is_timeout() { Error::FetchTimeout(err.to_string()) } else { Error::Network(err.to_string()) }
}
