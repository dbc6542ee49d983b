// ABOUTME: iTunes podcast search and the lookup from an Apple Podcasts page to its feed URL.
// ABOUTME: Entries without a feed URL are dropped from search results.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use url::Url;

use super::{get_json, join_api_url, PodcastSearchResult, PodcastSearcher, ITUNES_API_BASE};
use crate::context::ClientContext;
use crate::error::FetchError;
use crate::url_util::request_url;

static PODCAST_PAGE_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"podcasts\.apple\.com/.*/podcast/.*/id(\d+)").expect("valid podcast page regex")
});

#[derive(Debug, Deserialize)]
struct ItunesResponse {
    #[serde(default)]
    results: Vec<ItunesEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItunesEntry {
    collection_name: Option<String>,
    track_name: Option<String>,
    artist_name: Option<String>,
    feed_url: Option<String>,
    #[serde(rename = "artworkUrl600")]
    artwork_url_600: Option<String>,
    #[serde(rename = "artworkUrl100")]
    artwork_url_100: Option<String>,
    track_count: Option<u32>,
    release_date: Option<String>,
    collection_view_url: Option<String>,
}

impl From<ItunesEntry> for PodcastSearchResult {
    fn from(entry: ItunesEntry) -> Self {
        PodcastSearchResult {
            title: entry.collection_name.or(entry.track_name).unwrap_or_default(),
            image_url: entry.artwork_url_600.or(entry.artwork_url_100),
            feed_url: entry.feed_url,
            author: entry.artist_name,
            episode_count: entry.track_count,
            last_release: entry.release_date,
            source_url: entry.collection_view_url,
        }
    }
}

/// Searches the iTunes podcast directory.
#[derive(Debug, Clone)]
pub struct ItunesSearcher {
    ctx: ClientContext,
    base: Url,
}

impl ItunesSearcher {
    pub fn new(ctx: &ClientContext) -> Result<Self, FetchError> {
        Self::with_base_url(ctx, ITUNES_API_BASE)
    }

    /// Talks to another API host, such as a mirror or a test server.
    pub fn with_base_url(ctx: &ClientContext, base: &str) -> Result<Self, FetchError> {
        Ok(Self {
            ctx: ctx.clone(),
            base: request_url(base)?,
        })
    }

    /// The iTunes lookup URL for an Apple Podcasts page, if `url` is one.
    fn lookup_endpoint(&self, url: &str) -> Result<Option<Url>, FetchError> {
        let Some(id) = PODCAST_PAGE_ID_RE.captures(url).and_then(|c| c.get(1)) else {
            return Ok(None);
        };
        let mut endpoint = join_api_url(&self.base, "/lookup")?;
        endpoint.query_pairs_mut().append_pair("id", id.as_str());
        Ok(Some(endpoint))
    }
}

#[async_trait]
impl PodcastSearcher for ItunesSearcher {
    async fn search(&self, query: &str) -> Result<Vec<PodcastSearchResult>, FetchError> {
        let mut url = join_api_url(&self.base, "/search")?;
        url.query_pairs_mut()
            .append_pair("media", "podcast")
            .append_pair("term", query);

        let response: ItunesResponse = get_json(&self.ctx, url).await?;
        let results: Vec<PodcastSearchResult> = response
            .results
            .into_iter()
            .filter(|entry| entry.feed_url.is_some())
            .map(PodcastSearchResult::from)
            .collect();
        tracing::debug!(query, results = results.len(), "itunes search finished");
        Ok(results)
    }

    async fn lookup_url(&self, url: &str) -> Result<String, FetchError> {
        let endpoint = match self.lookup_endpoint(url)? {
            Some(endpoint) => endpoint,
            None => request_url(url)?,
        };
        let response: ItunesResponse = get_json(&self.ctx, endpoint.clone()).await?;
        let Some(entry) = response.results.into_iter().next() else {
            return Err(FetchError::NoFeedUrl {
                artist: String::new(),
                track: endpoint.to_string(),
            });
        };
        match entry.feed_url {
            Some(feed_url) => Ok(feed_url),
            None => Err(FetchError::NoFeedUrl {
                artist: entry.artist_name.unwrap_or_default(),
                track: entry.track_name.or(entry.collection_name).unwrap_or_default(),
            }),
        }
    }

    fn url_needs_lookup(&self, url: &str) -> bool {
        url.contains("itunes.apple.com") || PODCAST_PAGE_ID_RE.is_match(url)
    }

    fn name(&self) -> &str {
        "Apple"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ClientConfig;
    use pretty_assertions::assert_eq;

    fn searcher() -> ItunesSearcher {
        ItunesSearcher::new(&ClientContext::new(ClientConfig::default()).unwrap()).unwrap()
    }

    #[test]
    fn recognises_directory_urls() {
        let s = searcher();
        assert!(s.url_needs_lookup("https://podcasts.apple.com/us/podcast/some-show/id123456"));
        assert!(s.url_needs_lookup("https://itunes.apple.com/lookup?id=1"));
        assert!(!s.url_needs_lookup("https://example.com/feed.xml"));
    }

    #[test]
    fn page_urls_map_to_lookup_endpoint() {
        let endpoint = searcher()
            .lookup_endpoint("https://podcasts.apple.com/de/podcast/eine-show/id987?i=5")
            .unwrap()
            .unwrap();
        assert_eq!(endpoint.as_str(), "https://itunes.apple.com/lookup?id=987");
        assert_eq!(searcher().lookup_endpoint("https://example.com/feed.xml").unwrap(), None);
    }

    #[test]
    fn entry_prefers_large_artwork_and_collection_name() {
        let entry: ItunesEntry = serde_json::from_str(
            r#"{"collectionName":"Show","trackName":"Track","artistName":"Host",
                "feedUrl":"https://feeds/show.xml","artworkUrl100":"https://img/100.jpg",
                "artworkUrl600":"https://img/600.jpg","trackCount":42}"#,
        )
        .unwrap();
        let result = PodcastSearchResult::from(entry);
        assert_eq!(result.title, "Show");
        assert_eq!(result.image_url.as_deref(), Some("https://img/600.jpg"));
        assert_eq!(result.episode_count, Some(42));
        assert_eq!(result.author.as_deref(), Some("Host"));
    }
}
