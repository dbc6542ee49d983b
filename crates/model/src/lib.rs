// ABOUTME: Feed document model and download outcome value types for podcore.
// ABOUTME: Shared by the feed parser, the network layer and the CLI.

pub mod component;
pub mod download;
pub mod error;
pub mod feed;
pub mod filter;
pub mod funding;
pub mod media_type;
pub mod settings;
pub mod sort_order;

pub use component::FeedComponent;
pub use download::{
    compare_by_completion_date, sort_by_completion_date, DownloadError, DownloadResult,
    DownloadState, DownloadStatus, FeedFileType,
};
pub use error::ModelError;
pub use feed::{Chapter, Feed, FeedItem, FeedMedia, PlayState, TAG_FAVORITE, TAG_QUEUE};
pub use filter::FeedItemFilter;
pub use funding::{
    extract_payment_links, get_payment_links_as_string, FeedFunding, FUNDING_ENTRIES_SEPARATOR,
    FUNDING_TITLE_SEPARATOR,
};
pub use media_type::MediaType;
pub use settings::{FeedCounter, VolumeAdaptionSetting};
pub use sort_order::{Scope, SortOrder};
