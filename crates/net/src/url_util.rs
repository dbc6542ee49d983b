// ABOUTME: Normalisation of user-entered feed URLs into requestable http(s) URLs.
// ABOUTME: Handles podcast pseudo-schemes and percent-encodes unencoded input.

use url::Url;

use crate::error::FetchError;

/// Pseudo-schemes podcast directories use for subscribe links.
const FEED_SCHEMES: &[&str] = &["feed://", "itpc://", "pcast://"];

/// Rewrites a feed link the way a user would expect it to be fetched:
/// `feed://`, `itpc://` and `pcast://` become `http://`, `feed:https://x`
/// becomes `https://x`, and a missing scheme defaults to `http://`.
pub fn prepare_url(url: &str) -> String {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();

    if let Some(inner) = lower.strip_prefix("feed:") {
        if inner.starts_with("http://") || inner.starts_with("https://") {
            return prepare_url(&url["feed:".len()..]);
        }
    }
    for scheme in FEED_SCHEMES {
        if lower.starts_with(scheme) {
            return format!("http://{}", &url[scheme.len()..]);
        }
    }
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return url.to_string();
    }
    format!("http://{url}")
}

/// Parses a request URL. Input that is not yet percent-encoded (spaces,
/// non-ASCII paths) is encoded while parsing; only http and https are accepted.
pub fn request_url(source: &str) -> Result<Url, FetchError> {
    let source = source.trim();
    let url = Url::parse(source).map_err(|e| FetchError::invalid_url(source, e))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        "http" | "https" => Err(FetchError::invalid_url(source, "missing host")),
        other => Err(FetchError::invalid_url(source, format!("unsupported scheme {other}"))),
    }
}
