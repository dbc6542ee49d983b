// ABOUTME: Handler for Media RSS (`media:content`, `media:thumbnail`, `media:description`).
// ABOUTME: Content is classified as episode media or artwork by medium and MIME type.

use podcore_model::FeedMedia;

use super::{Attributes, Namespace};
use crate::duration_parse::parse_duration_millis;
use crate::error::FeedError;
use crate::mime::{effective_mime_type, is_image_file, is_media_file};
use crate::state::{HandlerState, ParseFrame};

enum ContentKind {
    Media(Option<String>),
    Image,
    Other,
}

pub(super) fn handle_element_start(
    local_name: &str,
    state: &mut HandlerState,
    attributes: &Attributes,
) -> ParseFrame {
    match local_name {
        "content" => handle_content(state, attributes),
        "thumbnail" => {
            if let Some(url) = attributes.non_blank("url") {
                let url = state.resolve(url);
                if let Some(item) = state.current_item_mut() {
                    item.image_url = Some(url);
                } else if state.feed().image_url.is_none() {
                    state.feed_mut().image_url = Some(url);
                }
            }
        }
        _ => {}
    }
    ParseFrame::new(local_name, Namespace::Media)
}

fn classify(medium: Option<&str>, mime_type: Option<String>) -> ContentKind {
    let playable = |t: &Option<String>| {
        t.as_deref()
            .is_some_and(|t| t.starts_with("audio/") || t.starts_with("video/"))
    };
    match medium {
        Some("audio") if playable(&mime_type) => ContentKind::Media(mime_type),
        Some("audio") => ContentKind::Media(Some("audio/*".to_string())),
        Some("video") if playable(&mime_type) => ContentKind::Media(mime_type),
        Some("video") => ContentKind::Media(Some("video/*".to_string())),
        // Some publishers label the episode audio itself as an image.
        Some("image") if !playable(&mime_type) => ContentKind::Image,
        _ if is_media_file(mime_type.as_deref()) => ContentKind::Media(mime_type),
        _ if is_image_file(mime_type.as_deref()) => ContentKind::Image,
        _ => ContentKind::Other,
    }
}

fn handle_content(state: &mut HandlerState, attributes: &Attributes) {
    let Some(url) = attributes.non_blank("url") else {
        return;
    };
    let url = state.resolve(url);
    let mime_type = effective_mime_type(attributes.get("type"), &url);
    let is_default = attributes.get("isDefault").map(str::trim) == Some("true");

    match classify(attributes.non_blank("medium"), mime_type) {
        ContentKind::Media(mime_type) => {
            let size = match attributes.non_blank("fileSize").map(str::parse::<i64>) {
                Some(Ok(size)) if size > 0 => size,
                Some(Err(_)) => {
                    tracing::debug!(url = %url, "ignoring invalid media:content fileSize");
                    0
                }
                _ => 0,
            };
            let duration_ms = attributes
                .non_blank("duration")
                .and_then(parse_duration_millis)
                .unwrap_or(0);
            if let Some(item) = state.current_item_mut() {
                if item.media.is_none() || is_default {
                    let mut media = FeedMedia::new(url, size, mime_type);
                    media.duration_ms = duration_ms;
                    item.media = Some(media);
                }
            }
        }
        ContentKind::Image => {
            if let Some(item) = state.current_item_mut() {
                item.image_url = Some(url);
            }
        }
        ContentKind::Other => tracing::debug!(url = %url, "ignoring media:content of unknown type"),
    }
}

pub(super) fn handle_element_end(local_name: &str, state: &mut HandlerState) -> Result<(), FeedError> {
    if local_name == "description" {
        if let Some(text) = state.trimmed_content().filter(|t| !t.is_empty()) {
            if let Some(item) = state.current_item_mut() {
                item.set_description_if_longer(&text);
            }
        }
    }
    Ok(())
}
