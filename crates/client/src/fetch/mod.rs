//! Bounded HTTP fetch pipeline.
//!
//! ### Deadline
//! - One `tokio::time::timeout` covers the request and the whole body read.
//! - When it fires the in-flight future is dropped, which aborts the request.
//!
//! ### Byte Budget
//! - The body is pulled chunk by chunk and decoded as it arrives.
//! - Once the received byte count reaches `max_bytes` the stream is dropped
//!   and the decoded text is cut to at most `max_bytes` characters.
//! - A `Buffered` body is truncated by character count after the fact. That
//!   path measures characters, not bytes, and may read more than the budget.
//!
//! ### Status Codes
//! - Non-2xx responses are not errors; their bodies are returned as text.
//! - No retries.

pub mod decode;
pub mod transport;
pub mod url;

use futures_util::StreamExt;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use decode::{Utf8StreamDecoder, truncate_chars};
pub use transport::{Body, HttpTransport, ReqwestTransport, TransportConfig, TransportResponse};
pub use url::{UrlError, parse_target};

use websift_core::{Error, FetchOptions};

/// Text read from a bounded fetch.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The URL requested
    pub url: ::url::Url,
    /// The final URL after redirects
    pub final_url: ::url::Url,
    /// HTTP status code
    pub status: u16,
    /// Decoded body, at most `max_bytes` characters
    pub text: String,
    /// Whether reading stopped because the byte budget was reached
    pub truncated: bool,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

/// Decoded body text and whether the budget stopped the read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedText {
    pub text: String,
    pub truncated: bool,
}

/// HTTP GET with a deadline and a byte budget.
#[derive(Clone)]
pub struct BoundedFetcher {
    transport: Arc<dyn HttpTransport>,
}

impl BoundedFetcher {
    /// Create a fetcher backed by reqwest.
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new(config)?)))
    }

    /// Create a fetcher over an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Validate `url_str` and fetch it.
    pub async fn fetch(&self, url_str: &str, options: FetchOptions) -> Result<FetchResponse, Error> {
        let url = parse_target(url_str)?;
        self.fetch_url(url, options).await
    }

    /// Fetch an already-validated URL.
    pub async fn fetch_url(&self, url: ::url::Url, options: FetchOptions) -> Result<FetchResponse, Error> {
        options.validate()?;

        let start = Instant::now();
        let deadline = Duration::from_millis(options.timeout_ms);

        let work = async {
            let response = self.transport.get(&url).await?;
            if !(200..300).contains(&response.status) {
                tracing::debug!(url = %url, status = response.status, "non-success status, reading body anyway");
            }
            let body = read_bounded(response.body, options.max_bytes).await?;
            Ok::<_, Error>((response.status, response.final_url, body))
        };

        let (status, final_url, body) = match tokio::time::timeout(deadline, work).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::debug!(url = %url, timeout_ms = options.timeout_ms, "fetch deadline fired");
                return Err(Error::FetchTimeout(format!("{} exceeded {}ms", url, options.timeout_ms)));
            }
        };

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            "fetched {} -> {} in {}ms ({} text bytes, truncated={})",
            url,
            final_url,
            fetch_ms,
            body.text.len(),
            body.truncated
        );

        Ok(FetchResponse { url, final_url, status, text: body.text, truncated: body.truncated, fetch_ms })
    }
}

/// Read `body` into text, stopping once `max_bytes` have been received.
///
/// Only the part of the final chunk that fits the budget is decoded. A
/// multi-byte character cut by the budget is dropped rather than replaced.
pub async fn read_bounded(body: Body, max_bytes: usize) -> Result<BoundedText, Error> {
    let mut stream = match body {
        Body::Buffered(text) => {
            let truncated = text.chars().count() > max_bytes;
            return Ok(BoundedText { text: truncate_chars(text, max_bytes), truncated });
        }
        Body::Streaming(stream) => stream,
    };

    let mut decoder = Utf8StreamDecoder::new();
    let mut text = String::new();
    let mut received = 0usize;
    let mut truncated = false;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let room = max_bytes - received;
        if chunk.len() >= room {
            decoder.decode(&chunk[..room], &mut text);
            received = max_bytes;
            truncated = true;
            break;
        }
        decoder.decode(&chunk, &mut text);
        received += chunk.len();
    }

    if received >= max_bytes {
        // budget met: stop pulling and release the connection
        drop(stream);
        decoder.discard();
    } else {
        decoder.finish(&mut text);
    }

    Ok(BoundedText { text: truncate_chars(text, max_bytes), truncated })
}
