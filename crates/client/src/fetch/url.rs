//! Validation of caller-supplied fetch targets.

/// Error type for target URL validation failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<UrlError> for websift_core::Error {
    fn from(err: UrlError) -> Self {
        websift_core::Error::InvalidUrl(err.to_string())
    }
}

/// Parse a caller-supplied fetch target.
///
/// The input must already be absolute; unlike link normalization no scheme
/// is guessed. Steps:
/// 1. Trim leading/trailing whitespace
/// 2. Require an `http` or `https` scheme
/// 3. Remove fragment (#...)
/// 4. Keep query string intact (do not reorder)
pub fn parse_target(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut parsed = url::Url::parse(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlError::InvalidUrl(format!("missing host: {trimmed}")));
    }

    parsed.set_fragment(None);

    Ok(parsed)
}
