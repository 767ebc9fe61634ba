//! Small shared DOM accessors.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlDocument, Selection, Window};

use crate::error::DomError;

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or_else(|| DomError::from("no window"))
}

pub fn document() -> Result<Document, DomError> {
    window()?
        .document()
        .ok_or_else(|| DomError::from("no document"))
}

pub fn html_document() -> Result<HtmlDocument, DomError> {
    document()?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| DomError::from("document is not an HTML document"))
}

pub fn selection() -> Result<Selection, DomError> {
    window()?
        .get_selection()
        .map_err(|e| DomError::from_js("getSelection", e))?
        .ok_or_else(|| DomError::from("no selection object"))
}

/// The selected text, read by cloning the first range's contents.
///
/// Returns an empty string when nothing is selected. Cloning can throw on a
/// detached range; that maps to an error rather than a panic.
pub fn selection_text(selection: &Selection) -> Result<String, DomError> {
    if selection.range_count() == 0 {
        return Ok(String::new());
    }
    let range = selection
        .get_range_at(0)
        .map_err(|e| DomError::from_js("getRangeAt", e))?;
    let fragment = range
        .clone_contents()
        .map_err(|e| DomError::from_js("cloneContents", e))?;
    Ok(fragment.text_content().unwrap_or_default())
}
