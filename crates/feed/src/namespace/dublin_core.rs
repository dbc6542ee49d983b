// ABOUTME: Handler for Dublin Core elements.
// ABOUTME: Only `dc:date` on items is used, as a publication date.

use crate::error::FeedError;
use crate::state::HandlerState;
use crate::time_parse::parse_or_none_if_future;

pub(super) fn handle_element_end(local_name: &str, state: &mut HandlerState) -> Result<(), FeedError> {
    if local_name != "date" || state.second_tag() != Some("item") {
        return Ok(());
    }
    let Some(content) = state.trimmed_content() else {
        return Ok(());
    };
    if let Some(date) = parse_or_none_if_future(&content) {
        if let Some(item) = state.current_item_mut() {
            item.pub_date = Some(date);
        }
    }
    Ok(())
}
