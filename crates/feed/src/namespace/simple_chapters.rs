// ABOUTME: Handler for Podlove Simple Chapters (`psc:chapter`).
// ABOUTME: Each chapter element becomes a Chapter of the open item.

use podcore_model::Chapter;

use super::{Attributes, Namespace};
use crate::duration_parse::parse_duration_millis;
use crate::state::{HandlerState, ParseFrame};

pub(super) fn handle_element_start(
    local_name: &str,
    state: &mut HandlerState,
    attributes: &Attributes,
) -> ParseFrame {
    if local_name == "chapter" && state.current_item().is_some() {
        match attributes.non_blank("start").and_then(parse_duration_millis) {
            Some(start_ms) => {
                let chapter = Chapter {
                    start_ms,
                    title: attributes.non_blank("title").map(str::to_string),
                    link: attributes.non_blank("href").map(|h| state.resolve(h)),
                    image_url: attributes.non_blank("image").map(|i| state.resolve(i)),
                };
                if let Some(item) = state.current_item_mut() {
                    item.chapters.push(chapter);
                }
            }
            None => tracing::debug!(start = ?attributes.get("start"), "ignoring chapter without valid start"),
        }
    }
    ParseFrame::new(local_name, Namespace::SimpleChapters)
}
