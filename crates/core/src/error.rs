//! Unified error types for websift.
//!
//! Only the bounded fetcher produces hard failures. Link normalization,
//! result parsing and content extraction degrade to fallback values instead.

/// Unified error types for the websift tools.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty query, zero byte budget).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The target URL is not a well-formed absolute http(s) URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// The fetch did not complete before its deadline.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// DNS, connect, TLS or mid-body transport failure.
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// The HTTP client could not be constructed.
    #[error("CLIENT_INIT: {0}")]
    ClientInit(String),
}

impl Error {
    /// Whether this error came from the fetch deadline firing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::FetchTimeout(_))
    }
}
