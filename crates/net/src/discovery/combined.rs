// ABOUTME: Merges several podcast directories into one ranked result list.
// ABOUTME: A result scores weight / (position + 1) per directory listing it, keyed by feed URL.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{ItunesSearcher, PodcastSearchResult, PodcastSearcher};
use crate::context::ClientContext;
use crate::error::FetchError;

/// Searchers with a weight; directories weighted zero or below are skipped.
pub struct CombinedSearcher {
    searchers: Vec<(Box<dyn PodcastSearcher>, f32)>,
}

impl CombinedSearcher {
    pub fn new(searchers: Vec<(Box<dyn PodcastSearcher>, f32)>) -> Self {
        Self { searchers }
    }

    /// Every built-in directory at its default weight.
    pub fn with_defaults(ctx: &ClientContext) -> Result<Self, FetchError> {
        let itunes: Box<dyn PodcastSearcher> = Box::new(ItunesSearcher::new(ctx)?);
        Ok(Self::new(vec![(itunes, 1.0)]))
    }

    fn active(&self) -> impl Iterator<Item = &(Box<dyn PodcastSearcher>, f32)> {
        self.searchers.iter().filter(|(_, weight)| *weight > 0.0)
    }
}

#[async_trait]
impl PodcastSearcher for CombinedSearcher {
    /// A failing directory is logged and left out of the ranking.
    async fn search(&self, query: &str) -> Result<Vec<PodcastSearchResult>, FetchError> {
        let mut ranked = Vec::new();
        for (searcher, weight) in self.active() {
            match searcher.search(query).await {
                Ok(results) => ranked.push((results, *weight)),
                Err(err) => {
                    tracing::warn!(searcher = searcher.name(), error = %err, "directory search failed");
                }
            }
        }
        Ok(weight_search_results(ranked))
    }

    async fn lookup_url(&self, url: &str) -> Result<String, FetchError> {
        match self.searchers.iter().find(|(s, _)| s.url_needs_lookup(url)) {
            Some((searcher, _)) => searcher.lookup_url(url).await,
            None => Ok(url.to_string()),
        }
    }

    fn url_needs_lookup(&self, url: &str) -> bool {
        self.searchers.iter().any(|(s, _)| s.url_needs_lookup(url))
    }

    fn name(&self) -> &str {
        "Combined"
    }
}

/// Merges per-directory result lists into one list, best score first. Results
/// without a feed URL are dropped; on equal scores first appearance wins.
pub fn weight_search_results(lists: Vec<(Vec<PodcastSearchResult>, f32)>) -> Vec<PodcastSearchResult> {
    let mut scores: HashMap<String, f32> = HashMap::new();
    let mut merged: Vec<PodcastSearchResult> = Vec::new();

    for (results, weight) in lists {
        for (position, result) in results.into_iter().enumerate() {
            let Some(feed_url) = result.feed_url.clone() else {
                continue;
            };
            let score = weight / (position as f32 + 1.0);
            match scores.get_mut(&feed_url) {
                Some(total) => *total += score,
                None => {
                    scores.insert(feed_url, score);
                    merged.push(result);
                }
            }
        }
    }

    let score_of = |result: &PodcastSearchResult| {
        result
            .feed_url
            .as_ref()
            .and_then(|url| scores.get(url))
            .copied()
            .unwrap_or_default()
    };
    merged.sort_by(|a, b| score_of(b).total_cmp(&score_of(a)));
    merged
}
