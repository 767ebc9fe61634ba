//! Whole-block text extraction and replacement, used by the live-typing
//! translation loop.

use web_sys::Element;

use crate::caret;
use crate::error::DomError;

/// The block's text with line structure preserved: `<br>` and block-element
/// starts become newlines, entities are decoded.
pub fn block_text(block: &Element) -> String {
    inkshift_core::markup_to_text(&block.inner_html())
        .trim()
        .to_owned()
}

/// Replace the block's contents with `text`, newlines becoming `<br>`, then
/// re-seat the caret at the block end. A caret failure is not a replacement
/// failure; the content is already in place.
pub fn replace_block(block: &Element, text: &str) -> Result<(), DomError> {
    block.set_inner_html(&inkshift_core::text_to_markup(text));
    if let Err(e) = caret::place_at_block_end(block) {
        tracing::debug!(target: "inkshift::block", error = %e, "caret re-seat failed");
    }
    Ok(())
}
