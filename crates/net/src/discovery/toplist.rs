// ABOUTME: Loads the iTunes podcast charts for a country and hides podcasts already subscribed to.
// ABOUTME: Without an explicit country the locale decides, falling back to the US chart.

use podcore_model::Feed;
use serde::Deserialize;
use url::Url;

use super::{get_json, join_api_url, PodcastSearchResult, ITUNES_API_BASE};
use crate::context::ClientContext;
use crate::error::FetchError;
use crate::url_util::request_url;

/// Entries requested from iTunes before subscribed podcasts are removed.
pub const TOPLIST_FETCH_SIZE: usize = 25;

const FALLBACK_COUNTRY: &str = "us";

#[derive(Debug, Deserialize)]
struct TopListResponse {
    feed: Option<TopListFeed>,
}

#[derive(Debug, Deserialize)]
struct TopListFeed {
    #[serde(default)]
    entry: OneOrMany<TopListEntry>,
}

/// iTunes sends a bare object instead of an array when a chart has one entry.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
struct Label {
    label: String,
}

#[derive(Debug, Deserialize)]
struct TopListEntry {
    title: Option<Label>,
    #[serde(rename = "im:name")]
    name: Option<Label>,
    #[serde(rename = "im:image", default)]
    images: Vec<Label>,
    id: Option<Label>,
    #[serde(rename = "im:artist")]
    artist: Option<Label>,
}

impl From<TopListEntry> for PodcastSearchResult {
    fn from(entry: TopListEntry) -> Self {
        PodcastSearchResult {
            // "Name - Artist", which is what subscriptions are matched against.
            title: entry
                .title
                .or(entry.name)
                .map(|l| l.label)
                .unwrap_or_default(),
            // Images are listed smallest first.
            image_url: entry.images.into_iter().last().map(|l| l.label),
            feed_url: None,
            author: entry.artist.map(|l| l.label),
            episode_count: None,
            last_release: None,
            source_url: entry.id.map(|l| l.label),
        }
    }
}

/// Fetches iTunes podcast charts.
#[derive(Debug, Clone)]
pub struct ItunesTopListLoader {
    ctx: ClientContext,
    base: Url,
}

impl ItunesTopListLoader {
    pub fn new(ctx: &ClientContext) -> Result<Self, FetchError> {
        Self::with_base_url(ctx, ITUNES_API_BASE)
    }

    pub fn with_base_url(ctx: &ClientContext, base: &str) -> Result<Self, FetchError> {
        Ok(Self {
            ctx: ctx.clone(),
            base: request_url(base)?,
        })
    }

    /// Chart for `country` (ISO 3166 code) minus `subscribed`, at most `limit`
    /// entries. `None` picks the country from the locale and retries with the
    /// US chart if that fails.
    pub async fn load_toplist(
        &self,
        country: Option<&str>,
        limit: usize,
        subscribed: &[Feed],
    ) -> Result<Vec<PodcastSearchResult>, FetchError> {
        let entries = match country {
            Some(country) => self.fetch_chart(country).await?,
            None => {
                let country = locale_country().unwrap_or_else(|| FALLBACK_COUNTRY.to_string());
                match self.fetch_chart(&country).await {
                    Ok(entries) => entries,
                    Err(err) if country != FALLBACK_COUNTRY => {
                        tracing::info!(%country, error = %err, "top list unavailable, using the US chart");
                        self.fetch_chart(FALLBACK_COUNTRY).await?
                    }
                    Err(err) => return Err(err),
                }
            }
        };
        Ok(remove_subscribed(entries, subscribed, limit))
    }

    async fn fetch_chart(&self, country: &str) -> Result<Vec<PodcastSearchResult>, FetchError> {
        let country = country.trim().to_ascii_lowercase();
        let path = format!("/{country}/rss/toppodcasts/limit={TOPLIST_FETCH_SIZE}/explicit=true/json");
        let url = join_api_url(&self.base, &path)?;
        let response: TopListResponse = match get_json(&self.ctx, url).await {
            Ok(response) => response,
            Err(FetchError::Status { status: 400, .. }) => {
                return Err(FetchError::UnknownCountry { country });
            }
            Err(err) => return Err(err),
        };
        let entries = response
            .feed
            .map(|feed| feed.entry.into_vec())
            .unwrap_or_default();
        Ok(entries.into_iter().map(PodcastSearchResult::from).collect())
    }
}

/// Drops chart entries whose "title - author" matches a subscribed feed and
/// keeps at most `limit` of the rest.
pub fn remove_subscribed(
    suggested: Vec<PodcastSearchResult>,
    subscribed: &[Feed],
    limit: usize,
) -> Vec<PodcastSearchResult> {
    let known: std::collections::HashSet<String> = subscribed
        .iter()
        .filter_map(|feed| match (&feed.title, &feed.author) {
            (Some(title), Some(author)) => Some(format!("{} - {}", title.trim(), author.trim())),
            _ => None,
        })
        .collect();
    suggested
        .into_iter()
        .filter(|result| !known.contains(result.title.trim()))
        .take(limit)
        .collect()
}

fn locale_country() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find_map(|value| country_from_locale(&value))
}

/// Country part of a POSIX locale such as `de_AT.UTF-8`.
fn country_from_locale(locale: &str) -> Option<String> {
    let name = locale.split(['.', '@']).next()?;
    let (_, country) = name.split_once(['_', '-'])?;
    (country.len() == 2 && country.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| country.to_ascii_lowercase())
}
