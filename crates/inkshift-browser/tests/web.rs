//! WASM browser tests for inkshift-browser.
//!
//! Run with: `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_test::*;

use inkshift_browser::host::BrowserHost;
use inkshift_browser::inkshift_core::{EngineOutcome, rules_for};
use inkshift_browser::replace::ReplacementEngine;
use inkshift_browser::selection::{self, CapturedSelection};
use inkshift_browser::{block, dom};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn fixture(html: &str) -> web_sys::Element {
    let doc = document();
    let container = doc.create_element("div").unwrap();
    container.set_inner_html(html);
    doc.body().unwrap().append_child(&container).unwrap();
    container
}

fn generic_host() -> BrowserHost {
    BrowserHost::new(rules_for("example.org"))
}

/// Select the full contents of the first text node under `el`.
fn select_contents(el: &web_sys::Element) {
    let doc = document();
    let text = el.first_child().unwrap();
    let range = doc.create_range().unwrap();
    range.select_node_contents(&text).unwrap();
    let sel = web_sys::window().unwrap().get_selection().unwrap().unwrap();
    sel.remove_all_ranges().unwrap();
    sel.add_range(&range).unwrap();
}

#[wasm_bindgen_test]
fn capture_on_editable_div_finds_target() {
    let container = fixture("<div contenteditable=\"true\">hello world</div>");
    let editable = container.first_element_child().unwrap();
    select_contents(&editable);

    let host = generic_host();
    let captured = selection::capture(&host, Some(editable.as_ref()))
        .unwrap()
        .unwrap();
    assert_eq!(captured.text, "hello world");
    assert!(!captured.is_read_only());
    container.remove();
}

#[wasm_bindgen_test]
fn capture_on_static_text_is_read_only() {
    let container = fixture("<p>just some prose</p>");
    let para = container.first_element_child().unwrap();
    select_contents(&para);

    let host = generic_host();
    let captured = selection::capture(&host, Some(para.as_ref())).unwrap().unwrap();
    assert_eq!(captured.text, "just some prose");
    assert!(captured.is_read_only());
    container.remove();
}

#[wasm_bindgen_test]
fn capture_of_empty_selection_is_none() {
    let sel = web_sys::window().unwrap().get_selection().unwrap().unwrap();
    sel.remove_all_ranges().unwrap();

    let host = generic_host();
    assert!(selection::capture(&host, None).unwrap().is_none());
}

#[wasm_bindgen_test]
fn editability_probing() {
    let container =
        fixture("<textarea></textarea><div contenteditable=\"true\"></div><span>x</span>");
    let host = generic_host();
    let children = container.children();
    assert!(host.is_editable(&children.item(0).unwrap()));
    assert!(host.is_editable(&children.item(1).unwrap()));
    assert!(!host.is_editable(&children.item(2).unwrap()));
    container.remove();
}

#[wasm_bindgen_test]
async fn value_splice_replaces_and_fires_one_input_event() {
    let container = fixture("<input value=\"hello world\">");
    let input: web_sys::HtmlInputElement =
        container.first_element_child().unwrap().dyn_into().unwrap();

    let count = Rc::new(Cell::new(0u32));
    let seen = count.clone();
    let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
        seen.set(seen.get() + 1);
    });
    input
        .add_event_listener_with_callback("input", listener.as_ref().unchecked_ref())
        .unwrap();

    // A collapsed dummy range: the reselect-insert strategy sees a stale
    // selection and falls through to the value splice.
    let doc = document();
    let range = doc.create_range().unwrap();
    let body: web_sys::Node = doc.body().unwrap().into();
    let captured = CapturedSelection {
        text: "world".to_string(),
        range,
        start_container: body.clone(),
        start_offset: 0,
        end_container: body,
        end_offset: 0,
        target: Some(input.clone().into()),
    };

    let host = generic_host();
    let outcome = ReplacementEngine::new(&host)
        .replace(&captured, "earth")
        .await;
    assert!(outcome.replaced_in_place());
    assert_eq!(input.value(), "hello earth");
    assert_eq!(count.get(), 1);

    drop(listener);
    container.remove();
}

#[wasm_bindgen_test]
async fn invalidated_range_falls_through_without_throwing() {
    let container = fixture("<p>soon gone</p>");
    let para = container.first_element_child().unwrap();
    select_contents(&para);

    let host = generic_host();
    let captured = selection::capture(&host, Some(para.as_ref())).unwrap().unwrap();

    // Invalidate every endpoint by removing the fixture from the document.
    container.remove();

    let outcome = ReplacementEngine::new(&host)
        .replace(&captured, "replacement")
        .await;
    // In-place strategies must all decline; the run ends at the clipboard
    // floor (which headless runners may deny).
    assert!(matches!(
        outcome,
        EngineOutcome::CopiedToClipboard | EngineOutcome::Failed
    ));
}

#[wasm_bindgen_test]
fn container_probe_skips_non_editable_wrappers() {
    // Docs-like layout: the first container selector matches a structural
    // wrapper; the editable surface sits behind the second selector.
    let container = fixture(
        "<div class=\"kix-page-content-wrap\"><div role=\"textbox\">body text</div></div>",
    );
    let host = BrowserHost::new(rules_for("docs.google.com"));
    let probed = host.probe_container(&document()).unwrap();
    assert_eq!(probed.get_attribute("role").as_deref(), Some("textbox"));
    container.remove();
}

#[wasm_bindgen_test]
fn block_text_preserves_line_breaks() {
    let container = fixture("<div>line one<br>line two</div>");
    let div = container.first_element_child().unwrap();
    assert_eq!(block::block_text(&div), "line one\nline two");
    container.remove();
}

#[wasm_bindgen_test]
fn replace_block_round_trips_multiline_text() {
    let container = fixture("<div contenteditable=\"true\">old</div>");
    let div = container.first_element_child().unwrap();
    block::replace_block(&div, "first\nsecond").unwrap();
    assert!(div.inner_html().contains("<br>"));
    assert_eq!(block::block_text(&div), "first\nsecond");
    container.remove();
}

#[wasm_bindgen_test]
fn enclosing_block_stops_at_paragraph() {
    let container = fixture(
        "<div contenteditable=\"true\"><p id=\"target-para\"><span>inline</span></p></div>",
    );
    let span = document().query_selector("#target-para span").unwrap().unwrap();
    let host = generic_host();
    let block = host.find_enclosing_block(span.as_ref()).unwrap();
    assert_eq!(block.id(), "target-para");
    container.remove();
}

#[wasm_bindgen_test]
fn selection_text_reads_live_selection() {
    let container = fixture("<p>alpha beta</p>");
    let para = container.first_element_child().unwrap();
    select_contents(&para);
    let sel = dom::selection().unwrap();
    assert_eq!(dom::selection_text(&sel).unwrap(), "alpha beta");
    container.remove();
}
