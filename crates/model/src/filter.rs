// ABOUTME: Immutable episode filter built from string tokens such as "played".
// ABOUTME: An item matches when every active predicate holds; no tokens match everything.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::feed::{FeedItem, TAG_FAVORITE, TAG_QUEUE};

pub const PLAYED: &str = "played";
pub const UNPLAYED: &str = "unplayed";
pub const NEW: &str = "new";
pub const PAUSED: &str = "paused";
pub const NOT_PAUSED: &str = "not_paused";
pub const IS_FAVORITE: &str = "is_favorite";
pub const NOT_FAVORITE: &str = "not_favorite";
pub const HAS_MEDIA: &str = "has_media";
pub const NO_MEDIA: &str = "no_media";
pub const QUEUED: &str = "queued";
pub const NOT_QUEUED: &str = "not_queued";
pub const DOWNLOADED: &str = "downloaded";
pub const NOT_DOWNLOADED: &str = "not_downloaded";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FeedItemFilter {
    properties: Vec<String>,

    show_played: bool,
    show_unplayed: bool,
    show_paused: bool,
    show_not_paused: bool,
    show_new: bool,
    show_queued: bool,
    show_not_queued: bool,
    show_downloaded: bool,
    show_not_downloaded: bool,
    show_has_media: bool,
    show_no_media: bool,
    show_is_favorite: bool,
    show_not_favorite: bool,
}

/// Token order and repetition carry no meaning, so filters compare as sets.
impl PartialEq for FeedItemFilter {
    fn eq(&self, other: &Self) -> bool {
        self.token_set() == other.token_set()
    }
}

impl Eq for FeedItemFilter {}

impl FeedItemFilter {
    fn token_set(&self) -> BTreeSet<&str> {
        self.properties.iter().map(String::as_str).collect()
    }

    pub fn new<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let properties: Vec<String> = properties
            .into_iter()
            .map(Into::into)
            .filter(|p| !p.is_empty())
            .collect();
        let has = |name: &str| properties.iter().any(|p| p == name);

        Self {
            show_played: has(PLAYED),
            show_unplayed: has(UNPLAYED),
            show_paused: has(PAUSED),
            show_not_paused: has(NOT_PAUSED),
            show_new: has(NEW),
            show_queued: has(QUEUED),
            show_not_queued: has(NOT_QUEUED),
            show_downloaded: has(DOWNLOADED),
            show_not_downloaded: has(NOT_DOWNLOADED),
            show_has_media: has(HAS_MEDIA),
            show_no_media: has(NO_MEDIA),
            show_is_favorite: has(IS_FAVORITE),
            show_not_favorite: has(NOT_FAVORITE),
            properties,
        }
    }

    /// Builds a filter from a comma separated token list.
    pub fn parse(properties: &str) -> Self {
        Self::new(properties.split(',').map(str::trim))
    }

    pub fn unfiltered() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// The tokens this filter was built from.
    pub fn values(&self) -> &[String] {
        &self.properties
    }

    pub fn is_unfiltered(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn matches(&self, item: &FeedItem) -> bool {
        let queued = item.is_tagged(TAG_QUEUE);
        let favorite = item.is_tagged(TAG_FAVORITE);

        !((self.show_new && !item.is_new())
            || (self.show_played && !item.is_played())
            || (self.show_unplayed && item.is_played())
            || (self.show_paused && !item.is_in_progress())
            || (self.show_not_paused && item.is_in_progress())
            || (self.show_queued && !queued)
            || (self.show_not_queued && queued)
            || (self.show_downloaded && !item.is_downloaded())
            || (self.show_not_downloaded && item.is_downloaded())
            || (self.show_has_media && !item.has_media())
            || (self.show_no_media && item.has_media())
            || (self.show_is_favorite && !favorite)
            || (self.show_not_favorite && favorite))
    }
}

impl From<Vec<String>> for FeedItemFilter {
    fn from(properties: Vec<String>) -> Self {
        FeedItemFilter::new(properties)
    }
}

impl From<FeedItemFilter> for Vec<String> {
    fn from(filter: FeedItemFilter) -> Self {
        filter.properties
    }
}
