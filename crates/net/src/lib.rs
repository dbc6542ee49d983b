// ABOUTME: Network side of podcore: feed download, refresh outcomes, download events and directory search.
// ABOUTME: Every operation takes an explicit ClientContext instead of global state.

pub mod blocked;
pub mod context;
pub mod discovery;
pub mod error;
pub mod events;
pub mod fetch;
pub mod url_util;

pub use blocked::was_download_blocked;
pub use context::{ClientConfig, ClientConfigBuilder, ClientContext};
pub use discovery::{
    CombinedSearcher, ItunesSearcher, ItunesTopListLoader, PodcastSearchResult, PodcastSearcher,
};
pub use error::FetchError;
pub use events::{AggregatorClosed, DownloadEventAggregator, EpisodeDownloadEvent, StatusPublisher};
pub use fetch::{refresh_feed, FeedFetcher, FetchedFeed};
pub use url_util::{prepare_url, request_url};
