// ABOUTME: Atom 1.0 handler, also used for atom:link elements inside RSS channels.
// ABOUTME: Maps entries to items and dispatches link relations (alternate, enclosure, payment, next).

use podcore_model::{FeedFunding, FeedMedia};

use super::rss::enclosure_size;
use super::{Attributes, Namespace};
use crate::error::FeedError;
use crate::mime::{effective_mime_type, is_media_file};
use crate::state::{HandlerState, ParseFrame};
use crate::time_parse::{parse_flexible_time, parse_or_none_if_future};

const REL_ALTERNATE: &str = "alternate";
const REL_ARCHIVES: &str = "archives";
const REL_ENCLOSURE: &str = "enclosure";
const REL_PAYMENT: &str = "payment";
const REL_NEXT: &str = "next";

const TYPE_HTML: &str = "text/html";
const TYPE_XHTML: &str = "application/xhtml+xml";
const TYPE_ATOM: &str = "application/atom+xml";
const TYPE_RSS: &str = "application/rss+xml";

pub(super) fn handle_element_start(
    local_name: &str,
    state: &mut HandlerState,
    attributes: &Attributes,
) -> ParseFrame {
    match local_name {
        "entry" if state.top() == Some("feed") => state.begin_item(),
        "link" => handle_link(state, attributes),
        _ => {}
    }
    ParseFrame::new(local_name, Namespace::Atom)
}

fn handle_link(state: &mut HandlerState, attributes: &Attributes) {
    let Some(href) = attributes.non_blank("href") else {
        return;
    };
    let href = state.resolve(href);
    let rel = attributes.non_blank("rel").unwrap_or(REL_ALTERNATE);
    let link_type = attributes.non_blank("type");

    match state.top() {
        Some("entry" | "item") => handle_item_link(state, rel, href, attributes),
        Some("feed" | "channel") => match rel {
            REL_ALTERNATE => match link_type {
                None | Some(TYPE_HTML) | Some(TYPE_XHTML) => {
                    if state.feed().link.is_none() {
                        state.feed_mut().link = Some(href);
                    }
                }
                Some(TYPE_ATOM) | Some(TYPE_RSS) => {
                    if state.feed().download_url.as_deref() != Some(href.as_str()) {
                        state.add_alternate_feed_url(attributes.get("title"), &href);
                    }
                }
                Some(other) => tracing::debug!(link_type = other, "ignoring alternate link type"),
            },
            REL_ARCHIVES => state.add_alternate_feed_url(attributes.get("title"), &href),
            REL_PAYMENT => {
                let title = attributes.get("title").unwrap_or_default().trim().to_string();
                state.feed_mut().add_payment(FeedFunding::new(href, title));
            }
            REL_NEXT => {
                let feed = state.feed_mut();
                feed.paged = true;
                feed.next_page_link = Some(href);
            }
            _ => {}
        },
        _ => {}
    }
}

fn handle_item_link(state: &mut HandlerState, rel: &str, href: String, attributes: &Attributes) {
    match rel {
        REL_ALTERNATE => {
            if let Some(item) = state.current_item_mut() {
                if item.link.is_none() {
                    item.link = Some(href);
                }
            }
        }
        REL_ENCLOSURE => {
            let mime_type = effective_mime_type(attributes.get("type"), &href);
            if !is_media_file(mime_type.as_deref()) {
                tracing::debug!(url = %href, mime = ?mime_type, "skipping non-media enclosure link");
                return;
            }
            let size = enclosure_size(attributes.get("length"));
            if let Some(item) = state.current_item_mut() {
                if item.media.is_none() {
                    item.media = Some(FeedMedia::new(href, size, mime_type));
                }
            }
        }
        REL_PAYMENT => {
            if let Some(item) = state.current_item_mut() {
                item.payment_link = Some(href);
            }
        }
        _ => {}
    }
}

pub(super) fn handle_element_end(local_name: &str, state: &mut HandlerState) -> Result<(), FeedError> {
    if local_name == "entry" {
        if state.top() == Some("entry") && state.current_item().is_some() {
            state.end_item();
        }
        return Ok(());
    }
    let Some(raw) = state.content().map(str::to_string) else {
        return Ok(());
    };
    let content = raw.trim();
    if content.is_empty() {
        return Ok(());
    }
    let parent = state.second_tag().unwrap_or_default().to_string();
    let grandparent = state.third_tag().map(str::to_string);
    let in_entry = parent == "entry" && state.current_item().is_some();

    match local_name {
        "id" if in_entry => {
            if let Some(item) = state.current_item_mut() {
                item.item_identifier = Some(content.to_string());
            }
        }
        "id" if parent == "feed" => state.feed_mut().feed_identifier = Some(content.to_string()),
        "title" if in_entry => {
            if let Some(item) = state.current_item_mut() {
                item.title = Some(content.to_string());
            }
        }
        "title" if parent == "feed" => state.feed_mut().title = Some(content.to_string()),
        "subtitle" if parent == "feed" => state.feed_mut().description = Some(content.to_string()),
        "content" | "summary" if in_entry => {
            if let Some(item) = state.current_item_mut() {
                item.set_description_if_longer(content);
            }
        }
        "published" if in_entry => {
            let pub_date = parse_or_none_if_future(content);
            if let Some(item) = state.current_item_mut() {
                item.pub_date = pub_date;
            }
        }
        "updated" if in_entry => {
            let updated = parse_or_none_if_future(content);
            if let Some(item) = state.current_item_mut() {
                if item.pub_date.is_none() {
                    item.pub_date = updated;
                }
            }
        }
        "updated" if parent == "feed" => {
            if parse_flexible_time(content).is_none() {
                tracing::debug!(value = content, "feed updated date is not a recognised format");
            }
            state.feed_mut().last_update = Some(content.to_string());
        }
        "logo" | "icon" if parent == "feed" => {
            if state.feed().image_url.is_none() {
                let image = state.resolve(content);
                state.feed_mut().image_url = Some(image);
            }
        }
        "name" if parent == "author" && grandparent.as_deref() == Some("feed") => {
            if state.feed().author.is_none() {
                state.feed_mut().author = Some(content.to_string());
            }
        }
        _ => {}
    }
    Ok(())
}
