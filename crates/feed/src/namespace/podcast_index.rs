// ABOUTME: Handler for the podcast-index namespace: funding, chapters and transcripts.
// ABOUTME: A funding entry is opened at element start and completed with its text at the end.

use podcore_model::FeedFunding;

use super::{Attributes, Namespace};
use crate::error::FeedError;
use crate::state::{HandlerState, ParseFrame};

pub(super) fn handle_element_start(
    local_name: &str,
    state: &mut HandlerState,
    attributes: &Attributes,
) -> ParseFrame {
    match local_name {
        "funding" => {
            let url = attributes.non_blank("url").map(|url| state.resolve(url));
            state.pending_funding = url.map(|url| FeedFunding::new(url, ""));
        }
        "chapters" => {
            if let Some(url) = attributes.non_blank("url") {
                let url = state.resolve(url);
                if let Some(item) = state.current_item_mut() {
                    item.podcast_index_chapter_url = Some(url);
                }
            }
        }
        "transcript" => {
            if let Some(url) = attributes.non_blank("url") {
                let url = state.resolve(url);
                let mime_type = attributes.non_blank("type").map(str::to_ascii_lowercase);
                if let Some(item) = state.current_item_mut() {
                    item.set_transcript(mime_type.as_deref(), &url);
                }
            }
        }
        _ => {}
    }
    ParseFrame::new(local_name, Namespace::PodcastIndex)
}

pub(super) fn handle_element_end(local_name: &str, state: &mut HandlerState) -> Result<(), FeedError> {
    if local_name != "funding" {
        return Ok(());
    }
    let Some(mut funding) = state.pending_funding.take() else {
        return Ok(());
    };
    funding.content = Some(state.trimmed_content().unwrap_or_default());
    state.feed_mut().add_payment(funding);
    Ok(())
}
