//! Caret placement after a replacement.
//!
//! Two cases: collapse the live selection after an in-place splice, and
//! re-seat the caret at the end of a block whose markup was rewritten (the
//! rewrite destroys the old selection's nodes entirely).

use web_sys::Element;

use crate::dom;
use crate::error::DomError;

const SHOW_TEXT: u32 = 0x4;

/// Collapse the live selection to its end.
pub fn collapse_to_end() -> Result<(), DomError> {
    let selection = dom::selection()?;
    if selection.range_count() == 0 {
        return Ok(());
    }
    selection
        .collapse_to_end()
        .map_err(|e| DomError::from_js("collapseToEnd", e))
}

/// Place the caret at the end of the last text node inside `block`, falling
/// back to a collapsed select-all when the block has no text nodes.
pub fn place_at_block_end(block: &Element) -> Result<(), DomError> {
    let document = dom::document()?;
    let walker = document
        .create_tree_walker_with_what_to_show(block, SHOW_TEXT)
        .map_err(|e| DomError::from_js("createTreeWalker", e))?;

    let mut last_text = None;
    while let Ok(Some(node)) = walker.next_node() {
        last_text = Some(node);
    }

    let range = document
        .create_range()
        .map_err(|e| DomError::from_js("createRange", e))?;
    match last_text {
        Some(node) => {
            let len = node
                .text_content()
                .map(|t| t.encode_utf16().count() as u32)
                .unwrap_or(0);
            range
                .set_start(&node, len)
                .map_err(|e| DomError::from_js("setStart", e))?;
            range.collapse_with_to_start(true);
        }
        None => {
            range
                .select_node_contents(block)
                .map_err(|e| DomError::from_js("selectNodeContents", e))?;
            range.collapse_with_to_start(false);
        }
    }

    let selection = dom::selection()?;
    selection
        .remove_all_ranges()
        .map_err(|e| DomError::from_js("removeAllRanges", e))?;
    selection
        .add_range(&range)
        .map_err(|e| DomError::from_js("addRange", e))?;
    Ok(())
}
