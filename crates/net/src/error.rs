// ABOUTME: Error type for the feed fetch boundary.
// ABOUTME: Each failure classifies itself into the stored DownloadError code.

use std::net::IpAddr;

use podcore_feed::FeedError;
use podcore_model::DownloadError;
use thiserror::Error;

use crate::blocked::was_download_blocked;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid feed URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Connection failure. `addresses` is what the host resolved to; empty
    /// when resolution failed too.
    #[error("could not connect to {url} (resolved to {}): {source}", list_addresses(.addresses))]
    Connect {
        url: String,
        addresses: Vec<IpAddr>,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} is larger than {limit} bytes")]
    TooLarge { url: String, limit: u64 },

    #[error("{url} returned an HTML page instead of a feed")]
    Html { url: String },

    #[error("{url} returned malformed JSON: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("directory entry \"{track}\" by {artist} has no feed URL")]
    NoFeedUrl { artist: String, track: String },

    #[error("iTunes has no top list for country {country}")]
    UnknownCountry { country: String },

    #[error(transparent)]
    Parse(#[from] FeedError),
}

impl FetchError {
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        FetchError::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        FetchError::Request {
            url: url.into(),
            source,
        }
    }

    /// The stored download outcome for this failure.
    pub fn download_error(&self) -> DownloadError {
        match self {
            FetchError::InvalidUrl { .. } => DownloadError::MalformedUrl,
            FetchError::Client(_) => DownloadError::RequestError,
            FetchError::Request { source, .. } => classify_request_error(self, source),
            FetchError::Connect { addresses, source, .. } => {
                if addresses.is_empty() {
                    DownloadError::UnknownHost
                } else if !source.is_timeout() && was_download_blocked(self) {
                    DownloadError::IoBlocked
                } else {
                    DownloadError::ConnectionError
                }
            }
            FetchError::Status { status, .. } => match status {
                401 => DownloadError::Unauthorized,
                403 => DownloadError::Forbidden,
                404 | 410 => DownloadError::NotFound,
                _ => DownloadError::HttpDataError,
            },
            FetchError::TooLarge { .. } => DownloadError::IoWrongSize,
            FetchError::Html { .. } => DownloadError::UnsupportedTypeHtml,
            FetchError::Json { .. } => DownloadError::ParserException,
            FetchError::NoFeedUrl { .. } | FetchError::UnknownCountry { .. } => DownloadError::NotFound,
            FetchError::Parse(err) => err.download_error(),
        }
    }
}

fn classify_request_error(err: &FetchError, source: &reqwest::Error) -> DownloadError {
    if source.is_builder() {
        DownloadError::MalformedUrl
    } else if source.is_connect() {
        if was_download_blocked(err) {
            DownloadError::IoBlocked
        } else {
            DownloadError::ConnectionError
        }
    } else if source.is_timeout() {
        DownloadError::ConnectionError
    } else if source.is_redirect() || source.is_request() {
        DownloadError::RequestError
    } else if source.is_body() || source.is_decode() {
        DownloadError::IoError
    } else {
        DownloadError::ConnectionError
    }
}

fn list_addresses(addresses: &[IpAddr]) -> String {
    if addresses.is_empty() {
        return "nothing".to_string();
    }
    addresses
        .iter()
        .map(IpAddr::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
