//! Selection capture.
//!
//! On a settled pointer-up the content script snapshots everything a later
//! replacement needs: the trimmed text, a cloned live range, the raw range
//! endpoints, and the editable target element if there is one. The snapshot
//! outlives the selection itself; the page can collapse or rewrite the
//! selection long before a reply arrives.

use web_sys::{HtmlElement, Node, Range};

use crate::dom;
use crate::error::DomError;
use crate::host::BrowserHost;

/// Everything captured at selection time.
///
/// `target` is `None` for read-only selections; the replacement engine still
/// runs on those (the range-based strategies need no target) and bottoms out
/// at the clipboard.
#[derive(Debug, Clone)]
pub struct CapturedSelection {
    /// Trimmed selected text. Never empty.
    pub text: String,
    /// Clone of the live range, detached from later selection changes.
    pub range: Range,
    pub start_container: Node,
    pub start_offset: u32,
    pub end_container: Node,
    pub end_offset: u32,
    /// Editable element owning the selection, if any.
    pub target: Option<HtmlElement>,
}

impl CapturedSelection {
    pub fn is_read_only(&self) -> bool {
        self.target.is_none()
    }
}

/// Snapshot the current selection.
///
/// Returns `Ok(None)` for an empty or whitespace-only selection. Any throwing
/// range read aborts the capture with an error; the caller drops it silently
/// rather than surfacing UI for a selection that no longer exists.
pub fn capture(
    host: &BrowserHost,
    event_target: Option<&Node>,
) -> Result<Option<CapturedSelection>, DomError> {
    let selection = dom::selection()?;
    if selection.range_count() == 0 {
        return Ok(None);
    }

    let text = dom::selection_text(&selection)?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let range = selection
        .get_range_at(0)
        .map_err(|e| DomError::from_js("getRangeAt", e))?;
    let cloned = range
        .clone_range();
    let start_container = range
        .start_container()
        .map_err(|e| DomError::from_js("startContainer", e))?;
    let start_offset = range
        .start_offset()
        .map_err(|e| DomError::from_js("startOffset", e))?;
    let end_container = range
        .end_container()
        .map_err(|e| DomError::from_js("endContainer", e))?;
    let end_offset = range
        .end_offset()
        .map_err(|e| DomError::from_js("endOffset", e))?;

    // Editable target: the event target's ancestry first (clicks land on the
    // concrete element), then the range's common ancestor.
    let target = event_target
        .and_then(|n| host.find_editable_ancestor(n))
        .or_else(|| {
            range
                .common_ancestor_container()
                .ok()
                .and_then(|n| host.find_editable_ancestor(&n))
        })
        .or_else(|| {
            // Virtualized editors anchor selections outside their visible
            // container; fall back to the document-level probe. Both the
            // ancestor walk and the probe only yield editable elements.
            let document = dom::document().ok()?;
            host.probe_container(&document)
        });

    Ok(Some(CapturedSelection {
        text: text.to_owned(),
        range: cloned,
        start_container,
        start_offset,
        end_container,
        end_offset,
        target,
    }))
}

/// Restore a captured range as the live selection.
pub fn restore(captured: &CapturedSelection) -> Result<(), DomError> {
    if let Some(target) = &captured.target {
        let _ = target.focus();
    }
    let selection = dom::selection()?;
    selection
        .remove_all_ranges()
        .map_err(|e| DomError::from_js("removeAllRanges", e))?;
    selection
        .add_range(&captured.range)
        .map_err(|e| DomError::from_js("addRange", e))?;
    Ok(())
}

/// Whether the live selection still reads as the captured text.
pub fn still_matches(captured: &CapturedSelection) -> Result<bool, DomError> {
    let selection = dom::selection()?;
    let current = dom::selection_text(&selection)?;
    Ok(current.trim() == captured.text)
}

/// The anchor node of the live selection, if any.
pub fn anchor_node() -> Option<Node> {
    dom::selection().ok()?.anchor_node()
}
