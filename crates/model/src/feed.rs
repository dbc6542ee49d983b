// ABOUTME: Feed, FeedItem and FeedMedia: the document the parser builds.
// ABOUTME: Identity-only equality; refresh merges never touch user-owned attributes.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::component::{differs_if_present, impl_identity_eq, update_if_present, FeedComponent};
use crate::filter::FeedItemFilter;
use crate::funding::FeedFunding;
use crate::media_type::MediaType;
use crate::settings::{FeedCounter, VolumeAdaptionSetting};
use crate::sort_order::SortOrder;

/// Tag marking an item as part of the playback queue.
pub const TAG_QUEUE: &str = "Queue";

/// Tag marking an item as a favorite.
pub const TAG_FAVORITE: &str = "Favorite";

/// Transcript MIME types, best first.
const TRANSCRIPT_TYPES: &[&str] = &[
    "application/json",
    "text/vtt",
    "application/srt",
    "application/x-subrip",
    "text/html",
    "text/plain",
];

/// Playback state of an item, owned by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    #[default]
    New,
    Unplayed,
    Played,
}

/// A podcast feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feed {
    pub id: i64,
    pub title: Option<String>,
    /// Title chosen by the user; wins over `title` for display.
    pub custom_title: Option<String>,
    pub feed_identifier: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub author: Option<String>,
    pub image_url: Option<String>,
    /// URL the feed is downloaded from. Maintained by the caller, not the document.
    pub download_url: Option<String>,
    /// Value of `itunes:new-feed-url`, if the publisher announced a move.
    pub new_feed_url: Option<String>,
    pub payment_links: Vec<FeedFunding>,
    pub last_update: Option<String>,
    /// "rss" or "atom".
    pub feed_type: Option<String>,
    pub paged: bool,
    pub next_page_link: Option<String>,
    pub items: Vec<FeedItem>,

    pub sort_order: Option<SortOrder>,
    pub item_filter: FeedItemFilter,
    pub volume_adaption: VolumeAdaptionSetting,
    pub counter: FeedCounter,
}

impl Feed {
    pub fn new(download_url: Option<String>) -> Self {
        Self {
            download_url,
            ..Default::default()
        }
    }

    /// Display title: the user's custom title, then the document title.
    pub fn display_title(&self) -> Option<&str> {
        self.custom_title.as_deref().or(self.title.as_deref())
    }

    /// Appends a funding entry unless an equal one is already present.
    pub fn add_payment(&mut self, funding: FeedFunding) {
        if !self.payment_links.contains(&funding) {
            self.payment_links.push(funding);
        }
    }

    /// Items accepted by the feed's own item filter.
    pub fn filtered_items(&self) -> impl Iterator<Item = &FeedItem> {
        self.items.iter().filter(|item| self.item_filter.matches(item))
    }
}

impl FeedComponent for Feed {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn human_readable_identifier(&self) -> String {
        self.display_title()
            .or(self.download_url.as_deref())
            .unwrap_or_default()
            .to_string()
    }

    fn update_from_other(&mut self, other: &Self) {
        // download_url is never copied; the caller applies redirects explicitly.
        update_if_present(&mut self.image_url, &other.image_url);
        update_if_present(&mut self.title, &other.title);
        update_if_present(&mut self.feed_identifier, &other.feed_identifier);
        update_if_present(&mut self.link, &other.link);
        update_if_present(&mut self.description, &other.description);
        update_if_present(&mut self.language, &other.language);
        update_if_present(&mut self.author, &other.author);
        update_if_present(&mut self.new_feed_url, &other.new_feed_url);
        update_if_present(&mut self.last_update, &other.last_update);
        update_if_present(&mut self.feed_type, &other.feed_type);
        if !other.payment_links.is_empty() {
            self.payment_links.clone_from(&other.payment_links);
        }
        // A paged feed may already point past the other's first page.
        if !self.paged && other.paged {
            self.paged = other.paged;
            self.next_page_link.clone_from(&other.next_page_link);
        }
    }

    fn compare_with_other(&self, other: &Self) -> bool {
        differs_if_present(&self.image_url, &other.image_url)
            || differs_if_present(&self.title, &other.title)
            || differs_if_present(&self.feed_identifier, &other.feed_identifier)
            || differs_if_present(&self.link, &other.link)
            || differs_if_present(&self.description, &other.description)
            || differs_if_present(&self.language, &other.language)
            || differs_if_present(&self.author, &other.author)
            || differs_if_present(&self.new_feed_url, &other.new_feed_url)
            || differs_if_present(&self.last_update, &other.last_update)
            || differs_if_present(&self.feed_type, &other.feed_type)
            || (!other.payment_links.is_empty() && self.payment_links != other.payment_links)
            || (other.paged && !self.paged)
            || (self.paged && other.paged && self.next_page_link != other.next_page_link)
    }
}

/// A chapter mark inside an episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub start_ms: i64,
    pub title: Option<String>,
    pub link: Option<String>,
    pub image_url: Option<String>,
}

/// One episode of a feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: i64,
    pub feed_id: i64,
    pub item_identifier: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub pub_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub media: Option<FeedMedia>,
    pub payment_link: Option<String>,
    pub chapters: Vec<Chapter>,
    pub podcast_index_chapter_url: Option<String>,
    pub transcript_url: Option<String>,
    pub transcript_type: Option<String>,

    pub state: PlayState,
    pub tags: BTreeSet<String>,
}

impl FeedItem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps whichever description is longer, counted in characters.
    pub fn set_description_if_longer(&mut self, description: &str) {
        let longer = match &self.description {
            None => true,
            Some(existing) => description.chars().count() > existing.chars().count(),
        };
        if longer {
            self.description = Some(description.to_string());
        }
    }

    /// Records a transcript, keeping the best-ranked type seen so far.
    pub fn set_transcript(&mut self, mime_type: Option<&str>, url: &str) {
        let rank = |t: Option<&str>| {
            t.and_then(|t| TRANSCRIPT_TYPES.iter().position(|known| *known == t))
                .unwrap_or(TRANSCRIPT_TYPES.len())
        };
        if self.transcript_url.is_none() || rank(mime_type) < rank(self.transcript_type.as_deref()) {
            self.transcript_url = Some(url.to_string());
            self.transcript_type = mime_type.map(str::to_string);
        }
    }

    pub fn is_new(&self) -> bool {
        self.state == PlayState::New
    }

    pub fn is_played(&self) -> bool {
        self.state == PlayState::Played
    }

    pub fn set_played(&mut self, played: bool) {
        self.state = if played {
            PlayState::Played
        } else {
            PlayState::Unplayed
        };
    }

    pub fn is_in_progress(&self) -> bool {
        self.media.as_ref().is_some_and(|m| m.position_ms > 0)
    }

    pub fn is_downloaded(&self) -> bool {
        self.media.as_ref().is_some_and(|m| m.downloaded)
    }

    pub fn has_media(&self) -> bool {
        self.media.is_some()
    }

    pub fn is_tagged(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.remove(tag);
    }
}

impl FeedComponent for FeedItem {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn human_readable_identifier(&self) -> String {
        self.title
            .as_deref()
            .or(self.item_identifier.as_deref())
            .unwrap_or_default()
            .to_string()
    }

    fn update_from_other(&mut self, other: &Self) {
        update_if_present(&mut self.title, &other.title);
        update_if_present(&mut self.description, &other.description);
        update_if_present(&mut self.link, &other.link);
        update_if_present(&mut self.pub_date, &other.pub_date);
        update_if_present(&mut self.image_url, &other.image_url);
        update_if_present(&mut self.payment_link, &other.payment_link);
        update_if_present(&mut self.podcast_index_chapter_url, &other.podcast_index_chapter_url);
        update_if_present(&mut self.transcript_url, &other.transcript_url);
        update_if_present(&mut self.transcript_type, &other.transcript_type);
        if !other.chapters.is_empty() {
            self.chapters.clone_from(&other.chapters);
        }
        if let Some(other_media) = &other.media {
            match &mut self.media {
                Some(media) => media.update_from_other(other_media),
                None => self.media = Some(other_media.clone()),
            }
        }
    }

    fn compare_with_other(&self, other: &Self) -> bool {
        let media_changed = match (&self.media, &other.media) {
            (Some(media), Some(other_media)) => media.compare_with_other(other_media),
            (None, Some(_)) => true,
            _ => false,
        };
        media_changed
            || differs_if_present(&self.title, &other.title)
            || differs_if_present(&self.description, &other.description)
            || differs_if_present(&self.link, &other.link)
            || differs_if_present(&self.pub_date, &other.pub_date)
            || differs_if_present(&self.image_url, &other.image_url)
            || differs_if_present(&self.payment_link, &other.payment_link)
    }
}

/// The downloadable file attached to an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedMedia {
    pub id: i64,
    pub item_id: i64,
    pub download_url: String,
    /// Size in bytes; 0 when unknown.
    pub size: i64,
    pub mime_type: Option<String>,
    pub duration_ms: i64,

    pub position_ms: i64,
    pub played_duration_ms: i64,
    pub file_url: Option<String>,
    pub downloaded: bool,
}

impl FeedMedia {
    pub fn new(download_url: impl Into<String>, size: i64, mime_type: Option<String>) -> Self {
        Self {
            download_url: download_url.into(),
            size,
            mime_type,
            ..Default::default()
        }
    }

    pub fn media_type(&self) -> MediaType {
        MediaType::from_mime_type(self.mime_type.as_deref())
    }
}

impl FeedComponent for FeedMedia {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn human_readable_identifier(&self) -> String {
        self.download_url.clone()
    }

    fn update_from_other(&mut self, other: &Self) {
        if !other.download_url.is_empty() {
            self.download_url.clone_from(&other.download_url);
        }
        if other.size > 0 {
            self.size = other.size;
        }
        update_if_present(&mut self.mime_type, &other.mime_type);
        if other.duration_ms > 0 && !self.downloaded {
            // Duration of a downloaded file comes from the file itself.
            self.duration_ms = other.duration_ms;
        }
    }

    fn compare_with_other(&self, other: &Self) -> bool {
        (!other.download_url.is_empty() && self.download_url != other.download_url)
            || (other.size > 0 && other.size != self.size)
            || differs_if_present(&self.mime_type, &other.mime_type)
    }
}

impl_identity_eq!(Feed, FeedItem, FeedMedia);
