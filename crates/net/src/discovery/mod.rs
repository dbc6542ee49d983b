// ABOUTME: Podcast directory search: the searcher seam, search results and shared JSON fetching.
// ABOUTME: iTunes search, the iTunes top list and a weighted combination of searchers live below.

mod combined;
mod itunes;
mod toplist;

pub use combined::{weight_search_results, CombinedSearcher};
pub use itunes::ItunesSearcher;
pub use toplist::{remove_subscribed, ItunesTopListLoader, TOPLIST_FETCH_SIZE};

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::context::ClientContext;
use crate::error::FetchError;
use crate::fetch::request_failed;

/// Base URL of the public iTunes API.
pub const ITUNES_API_BASE: &str = "https://itunes.apple.com";

/// One podcast offered by a directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PodcastSearchResult {
    pub title: String,
    pub image_url: Option<String>,
    /// Subscribable feed URL. Top list entries only carry `source_url` and
    /// need a lookup first.
    pub feed_url: Option<String>,
    pub author: Option<String>,
    pub episode_count: Option<u32>,
    pub last_release: Option<String>,
    /// Directory page for the podcast.
    pub source_url: Option<String>,
}

/// A podcast directory that can be searched by keyword.
#[async_trait]
pub trait PodcastSearcher: Send + Sync {
    /// Results in the directory's own ranking order.
    async fn search(&self, query: &str) -> Result<Vec<PodcastSearchResult>, FetchError>;

    /// Turns a directory page URL into the feed URL it describes.
    async fn lookup_url(&self, url: &str) -> Result<String, FetchError>;

    fn url_needs_lookup(&self, url: &str) -> bool;

    fn name(&self) -> &str;
}

/// GETs `url` and decodes the JSON body.
async fn get_json<T: DeserializeOwned>(ctx: &ClientContext, url: Url) -> Result<T, FetchError> {
    tracing::debug!(url = %url, "directory request");
    let response = match ctx.http().get(url.clone()).header(ACCEPT, "application/json").send().await {
        Ok(response) => response,
        Err(err) => return Err(request_failed(&url, err).await),
    };
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response
        .bytes()
        .await
        .map_err(|e| FetchError::request(url.as_str(), e))?;
    serde_json::from_slice(&body).map_err(|source| FetchError::Json {
        url: url.to_string(),
        source,
    })
}

fn join_api_url(base: &Url, path: &str) -> Result<Url, FetchError> {
    base.join(path).map_err(|e| FetchError::invalid_url(path, e))
}
