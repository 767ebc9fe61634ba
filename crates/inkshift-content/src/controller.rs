//! The interaction controller: pointer events in, session transitions and UI
//! updates out.

use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Node;
use web_time::Instant;

use inkshift_browser::inkshift_core::{
    DismissDecision, EngineOutcome, RequestToken, ResultView, SelectionSnapshot, SubMenu,
    ToneStyle, TransformRequest, TransformResponse, UiState, DISMISS_RECHECK_MS, ERROR_DISMISS_MS,
    LANGUAGES, SELECTION_SETTLE_MS, TONES, parse_alternatives, tone_label,
};
use inkshift_browser::{chrome, clipboard, dom, selection, ReplacementEngine};

use crate::app::App;
use crate::ui::{self, Ui};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperationKind {
    Translate,
    Tone,
    Rewrite,
}

/// Hook the document-level listeners. They live for the page lifetime.
pub fn install(app: &Rc<App>) {
    let Ok(document) = dom::document() else {
        tracing::warn!(target: "inkshift::controller", "no document; not installing");
        return;
    };

    // Capture phase, so host pages that stop propagation cannot starve us.
    let opts = EventListenerOptions::run_in_capture_phase();

    let on_up = app.clone();
    EventListener::new_with_options(&document, "mouseup", opts, move |event| {
        pointer_up(&on_up, event);
    })
    .forget();

    let on_down = app.clone();
    EventListener::new_with_options(&document, "mousedown", opts, move |event| {
        pointer_down(&on_down, event);
    })
    .forget();
}

fn event_node(event: &web_sys::Event) -> Option<Node> {
    event.target()?.dyn_into::<Node>().ok()
}

/// Pointer released: wait for the selection to settle, then capture it.
fn pointer_up(app: &Rc<App>, event: &web_sys::Event) {
    let node = event_node(event);
    if let Some(node) = &node {
        if Ui::is_inside(node) {
            return;
        }
    }
    let app = app.clone();
    Timeout::new(SELECTION_SETTLE_MS as u32, move || {
        spawn_local(async move {
            // Settings can change from the popup at any time; re-read them
            // on each gesture.
            let settings = chrome::load_settings().await;
            *app.settings.borrow_mut() = settings.clone();
            if !settings.extension_enabled {
                return;
            }
            settled_capture(&app, node.as_ref());
        });
    })
    .forget();
}

fn settled_capture(app: &Rc<App>, node: Option<&Node>) {
    let captured = match selection::capture(&app.host, node) {
        Ok(Some(captured)) => captured,
        // Selection collapsed: tear down anything still showing. The event
        // target was already vetted as outside our UI.
        Ok(None) => {
            if app.session.borrow().state() != UiState::Idle {
                app.dismiss_all();
            }
            return;
        }
        // A throwing range read means the selection died mid-capture.
        Err(e) => {
            tracing::debug!(target: "inkshift::controller", error = %e, "capture aborted");
            return;
        }
    };

    let Some(snapshot) = SelectionSnapshot::new(&captured.text, captured.target.clone()) else {
        return;
    };
    let anchor = captured.range.get_bounding_client_rect();

    app.session.borrow_mut().capture(snapshot);
    *app.captured.borrow_mut() = Some(captured);

    let on_activate = app.clone();
    app.ui.borrow_mut().show_icon(
        anchor,
        Rc::new(move || open_menu(&on_activate)),
    );
}

/// Pointer pressed: the dismissal rule. Clicks on our UI arm the guard
/// window; outside clicks tear down only after the deferred re-check.
fn pointer_down(app: &Rc<App>, event: &web_sys::Event) {
    let Some(node) = event_node(event) else {
        return;
    };
    if Ui::is_inside(&node) {
        app.session.borrow_mut().note_ui_pointer(Instant::now());
        return;
    }
    match app.session.borrow().dismissal(Instant::now(), false) {
        DismissDecision::Ignore => {}
        DismissDecision::RecheckAfterDelay => {
            let app = app.clone();
            Timeout::new(DISMISS_RECHECK_MS as u32, move || {
                // A competing handler may have noted a UI pointer since.
                let verdict = app.session.borrow().dismissal(Instant::now(), false);
                if verdict == DismissDecision::RecheckAfterDelay {
                    app.dismiss_all();
                }
            })
            .forget();
        }
    }
}

fn open_menu(app: &Rc<App>) {
    if !app.session.borrow_mut().icon_activated() {
        return;
    }
    let translate = app.clone();
    let tone = app.clone();
    let rewrite = app.clone();
    let close = app.clone();
    app.ui.borrow_mut().show_menu(vec![
        (
            "Translate".to_owned(),
            Rc::new(move || open_languages(&translate)) as Rc<dyn Fn()>,
        ),
        (
            "Change tone".to_owned(),
            Rc::new(move || open_tones(&tone)),
        ),
        (
            "Rewrite".to_owned(),
            Rc::new(move || {
                let app = rewrite.clone();
                let request = {
                    let captured = app.captured.borrow();
                    captured.as_ref().map(|c| TransformRequest::Rewrite {
                        text: c.text.clone(),
                    })
                };
                if let Some(request) = request {
                    run_operation(&app, OperationKind::Rewrite, request);
                }
            }),
        ),
        ("Close".to_owned(), {
            let app = close.clone();
            Rc::new(move || app.dismiss_all())
        }),
    ]);
}

fn open_languages(app: &Rc<App>) {
    if !app.session.borrow_mut().open_submenu(SubMenu::Languages) {
        return;
    }
    let items = LANGUAGES
        .iter()
        .map(|(code, label)| {
            let app = app.clone();
            let code = (*code).to_owned();
            (
                (*label).to_owned(),
                Rc::new(move || {
                    let request = {
                        let settings = app.settings.borrow();
                        let captured = app.captured.borrow();
                        captured.as_ref().map(|c| TransformRequest::Translate {
                            text: c.text.clone(),
                            source_lang: settings.source_lang.clone(),
                            target_lang: code.clone(),
                        })
                    };
                    if let Some(request) = request {
                        run_operation(&app, OperationKind::Translate, request);
                    }
                }) as Rc<dyn Fn()>,
            )
        })
        .collect();
    app.ui.borrow_mut().show_submenu(items);
}

fn open_tones(app: &Rc<App>) {
    if !app.session.borrow_mut().open_submenu(SubMenu::Tones) {
        return;
    }
    let items = TONES
        .iter()
        .map(|style| {
            let app = app.clone();
            let style: ToneStyle = *style;
            (
                tone_label(style).to_owned(),
                Rc::new(move || {
                    let request = {
                        let captured = app.captured.borrow();
                        captured.as_ref().map(|c| TransformRequest::Tone {
                            text: c.text.clone(),
                            tone: style.key().to_owned(),
                        })
                    };
                    if let Some(request) = request {
                        run_operation(&app, OperationKind::Tone, request);
                    }
                }) as Rc<dyn Fn()>,
            )
        })
        .collect();
    app.ui.borrow_mut().show_submenu(items);
}

/// Dispatch one backend request and route its reply.
fn run_operation(app: &Rc<App>, kind: OperationKind, request: TransformRequest) {
    let Some(token) = app.session.borrow_mut().begin_request() else {
        return;
    };
    app.ui.borrow_mut().show_result_loading();

    let app = app.clone();
    spawn_local(async move {
        let result = chrome::send_transform(&request)
            .await
            .and_then(TransformResponse::into_result);

        // Anything that happened since the request left (new selection,
        // dismissal, newer request) makes this reply stale.
        if !app.session.borrow().accepts_response(token) {
            tracing::debug!(target: "inkshift::controller", ?kind, "stale reply dropped");
            return;
        }

        match result {
            Ok(text) if kind == OperationKind::Rewrite => show_alternatives(&app, token, &text),
            Ok(text) => apply_result(&app, text).await,
            Err(err) => show_error(&app, token, &err.user_message()),
        }
    });
}

fn show_alternatives(app: &Rc<App>, token: RequestToken, raw: &str) {
    let alternatives = parse_alternatives(raw);
    if alternatives.is_empty() {
        // Same auto-dismissing error panel as any backend failure.
        show_error(app, token, "No suggestions came back.");
        return;
    }
    app.session
        .borrow_mut()
        .show_result(ResultView::Alternatives);
    let picker = app.clone();
    app.ui.borrow_mut().show_result_alternatives(
        &alternatives,
        Rc::new(move |choice: String| {
            let app = picker.clone();
            spawn_local(async move {
                apply_result(&app, choice).await;
            });
        }),
    );
}

/// Run the replacement engine on the saved selection. Success and the
/// clipboard floor both close the interaction; only a total failure keeps
/// the panel up, showing the text with a copy button.
async fn apply_result(app: &Rc<App>, text: String) {
    let Some(captured) = app.captured.borrow().clone() else {
        app.dismiss_all();
        return;
    };

    let outcome = ReplacementEngine::new(&app.host)
        .replace(&captured, &text)
        .await;
    if outcome.replaced_in_place() {
        ui::toast("Replaced");
        app.dismiss_all();
        return;
    }
    match outcome {
        EngineOutcome::CopiedToClipboard => {
            ui::toast("Copied to clipboard, press Ctrl+V to paste");
            app.dismiss_all();
        }
        _ => {
            app.session.borrow_mut().show_result(ResultView::Single);
            let copy_text = text.clone();
            app.ui.borrow_mut().show_result_single(
                &text,
                Rc::new(move || {
                    clipboard::write_text_detached(copy_text.clone());
                    ui::toast("Copied");
                }),
            );
        }
    }
}

fn show_error(app: &Rc<App>, token: RequestToken, message: &str) {
    app.session.borrow_mut().show_result(ResultView::Error);
    app.ui.borrow_mut().show_result_error(message);

    let app = app.clone();
    Timeout::new(ERROR_DISMISS_MS as u32, move || {
        // Only auto-dismiss the error this timer was armed for.
        let still_current = app.session.borrow().accepts_response(token)
            && app.session.borrow().state() == UiState::ResultShown(ResultView::Error);
        if still_current {
            app.dismiss_all();
        }
    })
    .forget();
}
