// ABOUTME: Handler for the RSS content module (`content:encoded`).
// ABOUTME: Feeds the item's longest-wins description.

use crate::error::FeedError;
use crate::state::HandlerState;

pub(super) fn handle_element_end(local_name: &str, state: &mut HandlerState) -> Result<(), FeedError> {
    if local_name != "encoded" {
        return Ok(());
    }
    let Some(text) = state.content().map(str::to_string) else {
        return Ok(());
    };
    if let Some(item) = state.current_item_mut() {
        item.set_description_if_longer(&text);
    }
    Ok(())
}
