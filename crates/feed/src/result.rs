// ABOUTME: The value returned by a successful parse.
// ABOUTME: Bundles the feed with alternate feed URLs and the caller-supplied redirect URL.

use std::collections::BTreeMap;

use podcore_model::Feed;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FeedHandlerResult {
    pub feed: Feed,
    /// Alternate feed URL to title.
    pub alternate_feed_urls: BTreeMap<String, String>,
    /// Final URL after HTTP redirects, when the fetch was redirected.
    pub redirect_url: Option<String>,
}
