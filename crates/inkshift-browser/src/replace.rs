//! The replacement engine: executes the host's strategy order against a
//! captured selection, stopping at the first success.
//!
//! Per-strategy failures never propagate; they only select fallthrough. The
//! designed floor is the clipboard copy, so the generated text is never lost
//! even when every in-place technique bounces off the editor.

use inkshift_core::{AttemptOutcome, EngineOutcome, FailReason, StrategyKind, order_for};
use wasm_bindgen::JsCast;
use web_sys::{
    Event, EventInit, EventTarget, HtmlInputElement, HtmlTextAreaElement, InputEvent,
    InputEventInit, KeyboardEvent, KeyboardEventInit, Node,
};

use crate::caret;
use crate::clipboard;
use crate::dom;
use crate::error::DomError;
use crate::host::BrowserHost;
use crate::selection::{self, CapturedSelection};

pub struct ReplacementEngine<'a> {
    host: &'a BrowserHost,
}

impl<'a> ReplacementEngine<'a> {
    pub fn new(host: &'a BrowserHost) -> Self {
        Self { host }
    }

    /// Run the strategy order until one succeeds. The order comes from the
    /// refined target variant when there is a target: a plain field inside a
    /// specialized host still splices like any form control. Read-only
    /// selections fall back to the page-level order.
    pub async fn replace(&self, captured: &CapturedSelection, new_text: &str) -> EngineOutcome {
        let order = match &captured.target {
            Some(target) => order_for(self.host.refine(target.as_ref())),
            None => self.host.rules().strategy_order(),
        };
        for kind in order {
            let outcome = match kind {
                StrategyKind::ReselectInsert => reselect_insert(captured, new_text),
                StrategyKind::ValueSplice => value_splice(captured, new_text),
                StrategyKind::MarkupSplice => markup_splice(captured, new_text),
                StrategyKind::RangeSplice => range_splice(captured, new_text),
                StrategyKind::SimulatedPaste => simulated_paste(captured, new_text).await,
                StrategyKind::SyntheticInput => synthetic_input(captured, new_text),
                StrategyKind::SyntheticKeys => synthetic_keys(captured, new_text),
                StrategyKind::ClipboardCopy => {
                    return match clipboard::write_text(new_text).await {
                        Ok(()) => EngineOutcome::CopiedToClipboard,
                        Err(e) => {
                            tracing::warn!(target: "inkshift::replace", error = %e, "clipboard floor failed");
                            EngineOutcome::Failed
                        }
                    };
                }
            };
            match outcome {
                AttemptOutcome::Replaced => {
                    tracing::debug!(target: "inkshift::replace", strategy = ?kind, "replaced in place");
                    if let Err(e) = caret::collapse_to_end() {
                        tracing::debug!(target: "inkshift::replace", error = %e, "caret collapse failed");
                    }
                    return EngineOutcome::Applied(*kind);
                }
                AttemptOutcome::Failed(reason) => {
                    tracing::debug!(target: "inkshift::replace", strategy = ?kind, %reason, "strategy failed");
                }
            }
        }
        // Orders end at ClipboardCopy, so this is unreachable for the
        // shipped tables; a custom order without a floor just fails.
        EngineOutcome::Failed
    }
}

fn failed(reason: FailReason) -> AttemptOutcome {
    AttemptOutcome::Failed(reason)
}

fn platform_err(e: DomError) -> AttemptOutcome {
    AttemptOutcome::Failed(FailReason::Platform(e.0))
}

/// Restore the saved range, verify the live selection still reads as the
/// captured text, then issue one undoable insert-text command.
fn reselect_insert(captured: &CapturedSelection, new_text: &str) -> AttemptOutcome {
    // A detached endpoint can still stringify to the captured text, so the
    // equality check alone would pass on a range the page already discarded.
    if !captured.start_container.is_connected() {
        return failed(FailReason::StaleRange);
    }
    if let Err(e) = selection::restore(captured) {
        return failed(FailReason::Platform(e.0));
    }
    match selection::still_matches(captured) {
        Ok(true) => {}
        Ok(false) => return failed(FailReason::StaleRange),
        Err(e) => return platform_err(e),
    }
    let html_doc = match dom::html_document() {
        Ok(d) => d,
        Err(e) => return platform_err(e),
    };
    match html_doc.exec_command_with_show_ui_and_value("insertText", false, new_text) {
        Ok(true) => AttemptOutcome::Replaced,
        Ok(false) => failed(FailReason::CommandRejected),
        Err(e) => failed(FailReason::Platform(format!("execCommand: {e:?}"))),
    }
}

/// Splice into a form control's value at the first occurrence of the
/// captured text, then synthesize exactly one bubbling `input` event.
fn value_splice(captured: &CapturedSelection, new_text: &str) -> AttemptOutcome {
    let Some(target) = &captured.target else {
        return failed(FailReason::NotApplicable);
    };

    let value = if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = target.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        return failed(FailReason::NotApplicable);
    };

    let Some(idx) = value.find(&captured.text) else {
        return failed(FailReason::TextNotFound);
    };
    let mut next = String::with_capacity(value.len() + new_text.len());
    next.push_str(&value[..idx]);
    next.push_str(new_text);
    next.push_str(&value[idx + captured.text.len()..]);

    let caret_utf16 = next[..idx + new_text.len()].encode_utf16().count() as u32;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        input.set_value(&next);
        let _ = input.set_selection_range(caret_utf16, caret_utf16);
    } else if let Some(area) = target.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(&next);
        let _ = area.set_selection_range(caret_utf16, caret_utf16);
    }

    if let Err(e) = dispatch_input(target.as_ref()) {
        return platform_err(e);
    }
    AttemptOutcome::Replaced
}

/// First-occurrence string replacement in the editable element's serialized
/// markup. Fails when the selection spans formatting boundaries and the raw
/// text no longer occurs verbatim in the markup.
fn markup_splice(captured: &CapturedSelection, new_text: &str) -> AttemptOutcome {
    let Some(target) = &captured.target else {
        return failed(FailReason::NotApplicable);
    };
    if !target.is_content_editable() {
        return failed(FailReason::NotApplicable);
    }
    let html = target.inner_html();
    if !html.contains(&captured.text) {
        return failed(FailReason::TextNotFound);
    }
    let markup = inkshift_core::text_to_markup(new_text);
    target.set_inner_html(&html.replacen(&captured.text, &markup, 1));
    AttemptOutcome::Replaced
}

/// Operate on the saved endpoints directly: same-text-node offset splice, or
/// clear the spanned contents and insert a fresh text node.
fn range_splice(captured: &CapturedSelection, new_text: &str) -> AttemptOutcome {
    if !captured.start_container.is_connected() {
        return failed(FailReason::StaleRange);
    }

    let same_text_node = captured.start_container == captured.end_container
        && captured.start_container.node_type() == Node::TEXT_NODE;
    if same_text_node {
        let content = captured.start_container.text_content().unwrap_or_default();
        let spliced = splice_utf16(
            &content,
            captured.start_offset,
            captured.end_offset,
            new_text,
        );
        captured.start_container.set_text_content(Some(&spliced));
        return AttemptOutcome::Replaced;
    }

    if let Err(e) = captured.range.delete_contents() {
        return failed(FailReason::Platform(format!("deleteContents: {e:?}")));
    }
    let document = match dom::document() {
        Ok(d) => d,
        Err(e) => return platform_err(e),
    };
    let text_node = document.create_text_node(new_text);
    match captured.range.insert_node(&text_node) {
        Ok(()) => AttemptOutcome::Replaced,
        Err(e) => failed(FailReason::Platform(format!("insertNode: {e:?}"))),
    }
}

/// Put the text on the clipboard, restore the range, and issue a paste
/// command. Most browsers reject script-initiated paste; that just falls
/// through.
async fn simulated_paste(captured: &CapturedSelection, new_text: &str) -> AttemptOutcome {
    if let Err(e) = clipboard::write_text(new_text).await {
        return platform_err(e);
    }
    if let Err(e) = selection::restore(captured) {
        return platform_err(e);
    }
    let html_doc = match dom::html_document() {
        Ok(d) => d,
        Err(e) => return platform_err(e),
    };
    match html_doc.exec_command("paste") {
        Ok(true) => AttemptOutcome::Replaced,
        Ok(false) => failed(FailReason::CommandRejected),
        Err(e) => failed(FailReason::Platform(format!("execCommand paste: {e:?}"))),
    }
}

/// Dispatch a cancelable synthetic `beforeinput` insert at the editor.
/// An editor that consumes the event cancels it; an uncancelled event means
/// nothing handled the insert, so the strategy reports failure.
fn synthetic_input(captured: &CapturedSelection, new_text: &str) -> AttemptOutcome {
    let Some(target) = event_target(captured) else {
        return failed(FailReason::NotApplicable);
    };
    let init = InputEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_input_type("insertText");
    init.set_data(Some(new_text));
    let event = match InputEvent::new_with_event_init_dict("beforeinput", &init) {
        Ok(ev) => ev,
        Err(e) => return failed(FailReason::Platform(format!("InputEvent: {e:?}"))),
    };
    match target.dispatch_event(&event) {
        // dispatchEvent returns false when a handler called preventDefault,
        // i.e. an editor consumed the insert.
        Ok(false) => AttemptOutcome::Replaced,
        Ok(true) => failed(FailReason::CommandRejected),
        Err(e) => failed(FailReason::Platform(format!("dispatchEvent: {e:?}"))),
    }
}

/// Per-character synthetic keydown sequence. Reports success only when at
/// least one key event was consumed by a handler.
fn synthetic_keys(captured: &CapturedSelection, new_text: &str) -> AttemptOutcome {
    let Some(target) = event_target(captured) else {
        return failed(FailReason::NotApplicable);
    };
    let mut consumed = false;
    for ch in new_text.chars() {
        let init = KeyboardEventInit::new();
        init.set_key(&ch.to_string());
        init.set_bubbles(true);
        init.set_cancelable(true);
        let event = match KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init) {
            Ok(ev) => ev,
            Err(e) => return failed(FailReason::Platform(format!("KeyboardEvent: {e:?}"))),
        };
        match target.dispatch_event(&event) {
            Ok(false) => consumed = true,
            Ok(true) => {}
            Err(e) => return failed(FailReason::Platform(format!("dispatchEvent: {e:?}"))),
        }
    }
    if consumed {
        AttemptOutcome::Replaced
    } else {
        failed(FailReason::CommandRejected)
    }
}

/// Where synthetic events land: the captured target, else the page's active
/// element, else the saved start container's element.
fn event_target(captured: &CapturedSelection) -> Option<EventTarget> {
    if let Some(target) = &captured.target {
        return Some(target.clone().into());
    }
    if let Ok(document) = dom::document() {
        if let Some(active) = document.active_element() {
            if active.tag_name() != "BODY" {
                return Some(active.into());
            }
        }
    }
    crate::host::as_element(&captured.start_container).map(Into::into)
}

fn dispatch_input(target: &EventTarget) -> Result<(), DomError> {
    let init = EventInit::new();
    init.set_bubbles(true);
    let event = Event::new_with_event_init_dict("input", &init)
        .map_err(|e| DomError::from_js("Event input", e))?;
    target
        .dispatch_event(&event)
        .map_err(|e| DomError::from_js("dispatchEvent", e))?;
    Ok(())
}

/// Splice `insert` over the UTF-16 code-unit span `[start, end)` of
/// `original`. DOM offsets are UTF-16, Rust strings are UTF-8, so the splice
/// goes through a code-unit buffer.
fn splice_utf16(original: &str, start: u32, end: u32, insert: &str) -> String {
    let units: Vec<u16> = original.encode_utf16().collect();
    let start = (start as usize).min(units.len());
    let end = (end as usize).clamp(start, units.len());
    let mut out: Vec<u16> = Vec::with_capacity(units.len() + insert.len());
    out.extend_from_slice(&units[..start]);
    out.extend(insert.encode_utf16());
    out.extend_from_slice(&units[end..]);
    String::from_utf16_lossy(&out)
}

#[cfg(test)]
mod tests {
    use super::splice_utf16;

    #[test]
    fn splice_replaces_code_unit_span() {
        assert_eq!(splice_utf16("hello world", 6, 11, "earth"), "hello earth");
    }

    #[test]
    fn splice_counts_utf16_not_bytes() {
        // The emoji is one char, two UTF-16 code units, four UTF-8 bytes.
        assert_eq!(splice_utf16("a😀b", 1, 3, "x"), "axb");
    }

    #[test]
    fn splice_clamps_out_of_range_offsets() {
        assert_eq!(splice_utf16("abc", 2, 99, "Z"), "abZ");
        assert_eq!(splice_utf16("abc", 99, 99, "Z"), "abcZ");
    }
}
