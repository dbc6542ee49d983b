// ABOUTME: Core RSS 2.0 / RSS 1.0 handler for unqualified elements.
// ABOUTME: Creates items, reads enclosures and maps channel/item text elements.

use podcore_model::FeedMedia;

use super::{Attributes, Namespace};
use crate::error::FeedError;
use crate::mime::{effective_mime_type, is_media_file};
use crate::state::{HandlerState, ParseFrame};
use crate::time_parse::parse_or_none_if_future;

/// Enclosure lengths below this are placeholders, not real file sizes.
const MIN_PLAUSIBLE_ENCLOSURE_SIZE: i64 = 16 * 1024;

pub(super) fn handle_element_start(
    local_name: &str,
    state: &mut HandlerState,
    attributes: &Attributes,
) -> ParseFrame {
    match local_name {
        "item" if matches!(state.top(), Some("channel" | "RDF")) => state.begin_item(),
        "enclosure" if state.top() == Some("item") => handle_enclosure(state, attributes),
        _ => {}
    }
    ParseFrame::new(local_name, Namespace::Rss)
}

fn handle_enclosure(state: &mut HandlerState, attributes: &Attributes) {
    let Some(url) = attributes.non_blank("url") else {
        tracing::debug!("enclosure without url");
        return;
    };
    let url = state.resolve(url);
    let mime_type = effective_mime_type(attributes.get("type"), &url);
    if !is_media_file(mime_type.as_deref()) {
        tracing::debug!(url = %url, mime = ?mime_type, "skipping non-media enclosure");
        return;
    }
    let size = enclosure_size(attributes.get("length"));
    if let Some(item) = state.current_item_mut() {
        if item.media.is_none() {
            item.media = Some(FeedMedia::new(url, size, mime_type));
        }
    }
}

/// Declared enclosure length in bytes; 0 when missing, invalid or implausibly small.
pub(super) fn enclosure_size(length: Option<&str>) -> i64 {
    let Some(length) = length.map(str::trim).filter(|l| !l.is_empty()) else {
        return 0;
    };
    match length.parse::<i64>() {
        Ok(size) if size >= MIN_PLAUSIBLE_ENCLOSURE_SIZE => size,
        Ok(_) => 0,
        Err(_) => {
            tracing::debug!(length, "ignoring invalid enclosure length");
            0
        }
    }
}

pub(super) fn handle_element_end(local_name: &str, state: &mut HandlerState) -> Result<(), FeedError> {
    if local_name == "item" {
        if state.top() == Some("item") {
            state.end_item();
        }
        return Ok(());
    }
    if state.depth() < 2 {
        return Ok(());
    }
    let Some(raw) = state.content().map(str::to_string) else {
        return Ok(());
    };
    let content = raw.trim();
    let parent = state.second_tag().unwrap_or_default().to_string();
    let grandparent = state.third_tag().map(str::to_string);

    match (local_name, parent.as_str()) {
        ("guid", "item") => {
            // Some publishers emit an empty guid; keep the identifier unset then.
            if !raw.is_empty() {
                if let Some(item) = state.current_item_mut() {
                    item.item_identifier = Some(raw);
                }
            }
        }
        ("title", "item") => {
            if let Some(item) = state.current_item_mut() {
                item.title = Some(content.to_string());
            }
        }
        ("title", "channel") => state.feed_mut().title = Some(content.to_string()),
        ("link", "channel") if !content.is_empty() => {
            let link = state.resolve(content);
            state.feed_mut().link = Some(link);
        }
        ("link", "item") if !content.is_empty() => {
            let link = state.resolve(content);
            if let Some(item) = state.current_item_mut() {
                item.link = Some(link);
            }
        }
        ("pubDate", "item") => {
            let pub_date = parse_or_none_if_future(content);
            if let Some(item) = state.current_item_mut() {
                item.pub_date = pub_date;
            }
        }
        ("lastBuildDate", "channel") if !content.is_empty() => {
            state.feed_mut().last_update = Some(content.to_string());
        }
        ("url", "image") if grandparent.as_deref() == Some("channel") && !content.is_empty() => {
            // itunes:image wins when present
            if state.feed().image_url.is_none() {
                let image = state.resolve(content);
                state.feed_mut().image_url = Some(image);
            }
        }
        ("description", "channel") => state.feed_mut().description = Some(raw),
        ("description", "item") => {
            if let Some(item) = state.current_item_mut() {
                item.set_description_if_longer(content);
            }
        }
        ("language", _) if !content.is_empty() => {
            state.feed_mut().language = Some(content.to_lowercase());
        }
        _ => {}
    }
    Ok(())
}
