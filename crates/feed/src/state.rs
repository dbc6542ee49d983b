// ABOUTME: Mutable parse context shared by every namespace handler during one parse.
// ABOUTME: Holds the frame stack, the feed and item under construction, and the text buffer.

use std::collections::BTreeMap;

use podcore_model::{Feed, FeedFunding, FeedItem};
use url::Url;

use crate::error::FeedError;
use crate::mime::resolve_url;
use crate::namespace::Namespace;
use crate::options::ParseOptions;

/// One open element, bound to the handler that must process its end event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFrame {
    pub name: String,
    pub namespace: Namespace,
}

impl ParseFrame {
    pub fn new(name: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }
}

/// Parse context for a single document. Never shared between parses.
#[derive(Debug)]
pub struct HandlerState {
    feed: Feed,
    current_item: Option<FeedItem>,
    tag_stack: Vec<ParseFrame>,
    content_buf: Option<String>,
    alternate_urls: BTreeMap<String, String>,
    base_url: Option<Url>,
    max_depth: usize,
    max_text_len: usize,

    /// `itunes:duration` of the open item, applied to its media when the item ends.
    pub(crate) pending_duration_ms: Option<i64>,
    /// `podcast:funding` entry waiting for its text content.
    pub(crate) pending_funding: Option<FeedFunding>,
}

impl HandlerState {
    pub fn new(options: &ParseOptions) -> Self {
        let base_url = options
            .download_url
            .as_deref()
            .filter(|_| options.resolve_relative_urls)
            .and_then(|u| Url::parse(u).ok());
        Self {
            feed: Feed::new(options.download_url.clone()),
            current_item: None,
            tag_stack: Vec::new(),
            content_buf: None,
            alternate_urls: BTreeMap::new(),
            base_url,
            max_depth: options.max_depth,
            max_text_len: options.max_text_len,
            pending_duration_ms: None,
            pending_funding: None,
        }
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut Feed {
        &mut self.feed
    }

    pub fn current_item(&self) -> Option<&FeedItem> {
        self.current_item.as_ref()
    }

    pub fn current_item_mut(&mut self) -> Option<&mut FeedItem> {
        self.current_item.as_mut()
    }

    /// Opens a new item. Only the core RSS and Atom handlers call this.
    pub(crate) fn begin_item(&mut self) {
        if self.current_item.is_some() {
            tracing::debug!("item opened while another is still open; closing the previous one");
            self.end_item();
        }
        self.pending_duration_ms = None;
        self.current_item = Some(FeedItem::new());
    }

    /// Closes the open item and appends it to the feed in document order.
    pub(crate) fn end_item(&mut self) {
        let Some(mut item) = self.current_item.take() else {
            return;
        };
        // The title is optional in RSS 2.0; fall back to the description.
        if item.title.is_none() {
            item.title.clone_from(&item.description);
        }
        if let Some(duration_ms) = self.pending_duration_ms.take() {
            if let Some(media) = item.media.as_mut() {
                media.duration_ms = duration_ms;
            }
        }
        self.feed.items.push(item);
    }

    pub fn push(&mut self, frame: ParseFrame) -> Result<(), FeedError> {
        if self.tag_stack.len() >= self.max_depth {
            return Err(FeedError::TooDeep(self.max_depth));
        }
        self.tag_stack.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<ParseFrame> {
        self.tag_stack.pop()
    }

    pub fn depth(&self) -> usize {
        self.tag_stack.len()
    }

    pub fn frames(&self) -> &[ParseFrame] {
        &self.tag_stack
    }

    /// Innermost open element. While an element starts this is its parent;
    /// while it ends this is the element itself.
    pub fn top(&self) -> Option<&str> {
        self.nth_from_top(0)
    }

    /// The element below the top of the stack.
    pub fn second_tag(&self) -> Option<&str> {
        self.nth_from_top(1)
    }

    pub fn third_tag(&self) -> Option<&str> {
        self.nth_from_top(2)
    }

    fn nth_from_top(&self, n: usize) -> Option<&str> {
        self.tag_stack
            .len()
            .checked_sub(n + 1)
            .map(|idx| self.tag_stack[idx].name.as_str())
    }

    pub(crate) fn start_text(&mut self) {
        self.content_buf = Some(String::new());
    }

    pub(crate) fn append_text(&mut self, text: &str) {
        let Some(buf) = self.content_buf.as_mut() else {
            return;
        };
        if buf.len() + text.len() <= self.max_text_len {
            buf.push_str(text);
            return;
        }
        let room = self.max_text_len.saturating_sub(buf.len());
        let mut cut = room.min(text.len());
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        if cut > 0 {
            buf.push_str(&text[..cut]);
        }
        tracing::warn!(limit = self.max_text_len, "element text exceeds limit, truncating");
    }

    pub(crate) fn clear_text(&mut self) {
        self.content_buf = None;
    }

    /// Text collected since the current element started.
    pub fn content(&self) -> Option<&str> {
        self.content_buf.as_deref()
    }

    /// Collected text with surrounding whitespace removed.
    pub fn trimmed_content(&self) -> Option<String> {
        self.content().map(|c| c.trim().to_string())
    }

    /// Records an alternate feed URL; `title` falls back to the URL itself.
    pub fn add_alternate_feed_url(&mut self, title: Option<&str>, url: &str) {
        let url = self.resolve(url);
        let title = title
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| url.clone());
        self.alternate_urls.insert(url, title);
    }

    pub fn alternate_feed_urls(&self) -> &BTreeMap<String, String> {
        &self.alternate_urls
    }

    /// Resolves a possibly relative link against the download URL.
    pub fn resolve(&self, href: &str) -> String {
        resolve_url(href, self.base_url.as_ref())
    }

    pub(crate) fn into_parts(mut self) -> (Feed, BTreeMap<String, String>) {
        self.end_item();
        (self.feed, self.alternate_urls)
    }
}
