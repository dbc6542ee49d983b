// ABOUTME: Handler for the iTunes podcast namespace.
// ABOUTME: Images, author, summaries, the item duration and the announced new feed URL.

use super::{Attributes, Namespace};
use crate::duration_parse::parse_duration_millis;
use crate::error::FeedError;
use crate::state::{HandlerState, ParseFrame};

pub(super) fn handle_element_start(
    local_name: &str,
    state: &mut HandlerState,
    attributes: &Attributes,
) -> ParseFrame {
    if local_name == "image" {
        if let Some(href) = attributes.non_blank("href") {
            let href = state.resolve(href);
            if let Some(item) = state.current_item_mut() {
                item.image_url = Some(href);
            } else {
                state.feed_mut().image_url = Some(href);
            }
        }
    }
    ParseFrame::new(local_name, Namespace::Itunes)
}

pub(super) fn handle_element_end(local_name: &str, state: &mut HandlerState) -> Result<(), FeedError> {
    let Some(content) = state.trimmed_content() else {
        return Ok(());
    };
    if content.is_empty() {
        return Ok(());
    }
    let in_item = state.current_item().is_some();

    match local_name {
        "author" if !in_item => state.feed_mut().author = Some(content),
        "duration" if in_item => match parse_duration_millis(&content) {
            Some(duration_ms) => state.pending_duration_ms = Some(duration_ms),
            None => tracing::debug!(value = %content, "ignoring unparseable itunes:duration"),
        },
        "subtitle" => {
            if let Some(item) = state.current_item_mut() {
                if item.description.as_deref().map_or(true, str::is_empty) {
                    item.set_description_if_longer(&content);
                }
            } else if state.feed().description.as_deref().map_or(true, str::is_empty) {
                state.feed_mut().description = Some(content);
            }
        }
        "summary" => {
            if let Some(item) = state.current_item_mut() {
                item.set_description_if_longer(&content);
            } else {
                state.feed_mut().description = Some(content);
            }
        }
        "new-feed-url" if !in_item => {
            let url = state.resolve(&content);
            state.feed_mut().new_feed_url = Some(url);
        }
        _ => {}
    }
    Ok(())
}
