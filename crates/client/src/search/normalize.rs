//! Unwrapping of DuckDuckGo redirect links.

use url::Url;

/// Host serving the redirect endpoint.
const REDIRECT_HOST: &str = "duckduckgo.com";

/// Path prefix of the redirect endpoint.
const REDIRECT_PATH: &str = "/l/";

/// Query parameter carrying the percent-encoded destination.
const TARGET_PARAM: &str = "uddg";

/// Rewrite a result href into the URL it actually points at.
///
/// - `//host/...` is upgraded to `https://host/...`.
/// - `https://duckduckgo.com/l/?uddg=<encoded>` becomes the decoded `<encoded>`.
///   The parameter is percent-decoded once more after query parsing, so a
///   doubly-encoded target (`%253F`) comes out fully decoded.
/// - Anything that fails to parse or decode is returned unchanged.
pub fn normalize_link(raw_href: &str) -> String {
    let href = match raw_href.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => raw_href.to_string(),
    };

    let Ok(parsed) = Url::parse(&href) else {
        return href;
    };

    if is_redirect_host(&parsed)
        && parsed.path().starts_with(REDIRECT_PATH)
        && let Some((_, target)) = parsed.query_pairs().find(|(k, _)| k == TARGET_PARAM)
        && !target.is_empty()
    {
        return match urlencoding::decode(&target) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => href,
        };
    }

    href
}

fn is_redirect_host(url: &Url) -> bool {
    url.host_str()
        .is_some_and(|host| host == REDIRECT_HOST || host.ends_with(&format!(".{REDIRECT_HOST}")))
}
