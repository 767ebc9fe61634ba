//! Translate-as-you-type: watch input events inside editable blocks, debounce,
//! translate the enclosing block, and rewrite it in place.
//!
//! All the loop-prevention reasoning lives in `inkshift_core::live`; this
//! module owns the actual timer and the DOM reads/writes around it.

use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use inkshift_browser::inkshift_core::{
    LiveDecision, TransformRequest, TransformResponse, LIVE_DEBOUNCE_MS, is_plain_field_tag,
};
use inkshift_browser::{block, chrome, dom, selection};

use crate::app::App;
use crate::ui::Ui;

pub fn install(app: &Rc<App>) {
    let Ok(document) = dom::document() else {
        return;
    };
    let app = app.clone();
    let opts = EventListenerOptions::run_in_capture_phase();
    EventListener::new_with_options(&document, "input", opts, move |event| {
        on_input(&app, event);
    })
    .forget();
}

fn on_input(app: &Rc<App>, event: &web_sys::Event) {
    if !app.settings.borrow().live_translate_enabled {
        return;
    }
    let Some(target) = event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
    else {
        return;
    };
    if Ui::is_inside(target.as_ref()) {
        return;
    }
    // Live typing targets rich editable surfaces only; plain form fields
    // keep their literal input.
    if is_plain_field_tag(&target.tag_name().to_ascii_lowercase()) {
        return;
    }
    if !app.host.is_editable(&target)
        && app.host.find_editable_ancestor(target.as_ref()).is_none()
    {
        return;
    }

    // The block under the caret, not under the event target: editors often
    // re-target input events at their root.
    let anchor = selection::anchor_node().unwrap_or_else(|| target.clone().into());
    let Some(block) = app.host.find_enclosing_block(&anchor) else {
        return;
    };
    let text = block::block_text(&block);

    match app.live.borrow_mut().note_input(&text) {
        LiveDecision::Ignore => {
            if text.is_empty() {
                if let Some(timer) = app.live_timer.borrow_mut().take() {
                    timer.cancel();
                }
            }
        }
        LiveDecision::Schedule { generation } => {
            *app.live_block.borrow_mut() = Some(block);
            if let Some(timer) = app.live_timer.borrow_mut().take() {
                timer.cancel();
            }
            let app_for_timer = app.clone();
            let timer = Timeout::new(LIVE_DEBOUNCE_MS, move || {
                spawn_local(async move {
                    fire(&app_for_timer, generation).await;
                });
            });
            *app.live_timer.borrow_mut() = Some(timer);
        }
    }
}

/// The debounce elapsed: re-read the block now and translate what is there,
/// not what was there when the timer started.
async fn fire(app: &Rc<App>, generation: u64) {
    let Some(block) = app.live_block.borrow().clone() else {
        return;
    };
    let current = block::block_text(&block);
    let Some(source) = app.live.borrow_mut().timer_fired(generation, &current) else {
        return;
    };

    let (source_lang, target_lang) = {
        let settings = app.settings.borrow();
        (settings.source_lang.clone(), settings.target_lang.clone())
    };
    let request = TransformRequest::Translate {
        text: source,
        source_lang,
        target_lang,
    };

    match chrome::send_transform(&request)
        .await
        .and_then(TransformResponse::into_result)
    {
        Ok(translated) => {
            if let Err(e) = block::replace_block(&block, &translated) {
                tracing::warn!(target: "inkshift::live", error = %e, "block rewrite failed");
            }
            app.live.borrow_mut().on_success();
        }
        // Live failures stay silent: no panel, no toast, just a retry
        // window on the next edit.
        Err(e) => {
            tracing::debug!(target: "inkshift::live", error = %e, "live translation failed");
            app.live.borrow_mut().on_failure();
        }
    }
}
