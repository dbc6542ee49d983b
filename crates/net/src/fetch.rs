// ABOUTME: Feed download boundary: fetches feed bytes and reports HTTP redirects.
// ABOUTME: refresh_feed combines fetch and parse into a DownloadResult.

use std::net::IpAddr;

use bytes::Bytes;
use podcore_feed::{FeedHandlerResult, FeedParser, ParseOptions};
use podcore_model::{DownloadError, DownloadResult, FeedComponent, FeedFileType};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::{Host, Url};

use crate::context::ClientContext;
use crate::error::FetchError;
use crate::url_util::request_url;

const FEED_ACCEPT: &str =
    "application/rss+xml, application/atom+xml, application/xml;q=0.9, text/xml;q=0.9, */*;q=0.8";

/// A downloaded feed document.
#[derive(Debug, Clone)]
pub struct FetchedFeed {
    pub bytes: Bytes,
    /// URL the body was finally served from.
    pub final_url: String,
    /// Set when `final_url` differs from the requested URL.
    pub redirect_url: Option<String>,
    pub content_type: Option<String>,
}

/// Downloads feed documents with a shared client context.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    ctx: ClientContext,
}

impl FeedFetcher {
    pub fn new(ctx: &ClientContext) -> Self {
        Self { ctx: ctx.clone() }
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchedFeed, FetchError> {
        let requested = request_url(url)?;
        let limit = self.ctx.config().max_body_bytes;
        tracing::info!(url = %requested, "fetching feed");

        let sent = self
            .ctx
            .http()
            .get(requested.clone())
            .header(ACCEPT, FEED_ACCEPT)
            .send()
            .await;
        let response = match sent {
            Ok(response) => response,
            Err(err) => return Err(request_failed(&requested, err).await),
        };

        let status = response.status();
        let final_url = response.url().to_string();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: final_url,
                status: status.as_u16(),
            });
        }
        if response.content_length().is_some_and(|len| len > limit) {
            return Err(FetchError::TooLarge { url: final_url, limit });
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_lowercase());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::request(final_url.as_str(), e))?;
        if bytes.len() as u64 > limit {
            return Err(FetchError::TooLarge { url: final_url, limit });
        }
        if looks_like_html(&bytes) {
            return Err(FetchError::Html { url: final_url });
        }

        let redirect_url = (final_url != requested.as_str()).then(|| final_url.clone());
        if let Some(redirect) = &redirect_url {
            tracing::info!(from = %requested, to = %redirect, "feed request was redirected");
        }
        tracing::debug!(url = %final_url, bytes = bytes.len(), "feed downloaded");

        Ok(FetchedFeed {
            bytes,
            final_url,
            redirect_url,
            content_type,
        })
    }
}

/// Connect failures carry the addresses the host resolves to, so that a
/// host sinkholed to a loopback address can be told apart from one that is down.
pub(crate) async fn request_failed(url: &Url, source: reqwest::Error) -> FetchError {
    if !source.is_connect() {
        return FetchError::request(url.as_str(), source);
    }
    FetchError::Connect {
        url: url.to_string(),
        addresses: resolve_addresses(url).await,
        source,
    }
}

async fn resolve_addresses(url: &Url) -> Vec<IpAddr> {
    let port = url.port_or_known_default().unwrap_or(80);
    match url.host() {
        Some(Host::Ipv4(ip)) => vec![IpAddr::V4(ip)],
        Some(Host::Ipv6(ip)) => vec![IpAddr::V6(ip)],
        Some(Host::Domain(domain)) => match tokio::net::lookup_host((domain, port)).await {
            Ok(addrs) => addrs.map(|addr| addr.ip()).collect(),
            Err(err) => {
                tracing::debug!(host = domain, error = %err, "host did not resolve");
                Vec::new()
            }
        },
        None => Vec::new(),
    }
}

/// True when the body starts like an HTML page rather than a feed.
fn looks_like_html(body: &[u8]) -> bool {
    let body = body.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(body);
    let start = body
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(body.len());
    let head: Vec<u8> = body[start..]
        .iter()
        .take(14)
        .map(u8::to_ascii_lowercase)
        .collect();
    head.starts_with(b"<!doctype html") || head.starts_with(b"<html")
}

/// Fetches and parses a feed, reporting the outcome as a DownloadResult.
/// The parse result is present only on success.
pub async fn refresh_feed(
    ctx: &ClientContext,
    url: &str,
) -> (Option<FeedHandlerResult>, DownloadResult) {
    match fetch_and_parse(ctx, url).await {
        Ok(result) => {
            let mut title = result.feed.human_readable_identifier();
            if title.is_empty() {
                title = url.to_string();
            }
            let outcome = DownloadResult::new(0, FeedFileType::Feed, title, DownloadError::Success, true, None);
            (Some(result), outcome)
        }
        Err(err) => {
            let reason = err.download_error();
            tracing::warn!(url, error = %err, code = reason.code(), "feed refresh failed");
            let outcome = DownloadResult::new(0, FeedFileType::Feed, url, reason, false, Some(err.to_string()));
            (None, outcome)
        }
    }
}

async fn fetch_and_parse(ctx: &ClientContext, url: &str) -> Result<FeedHandlerResult, FetchError> {
    let fetched = FeedFetcher::new(ctx).fetch(url).await?;
    let parser = FeedParser::with_options(ParseOptions::builder().download_url(url).build());
    Ok(parser.parse(&fetched.bytes, fetched.redirect_url.as_deref())?)
}
