//! Background service worker entry point for inkshift.
//!
//! Receives [`TransformRequest`] messages from content scripts, performs the
//! backend calls, and replies with a [`TransformResponse`]. Credentials never
//! leave this crate; content scripts only ever see text or an error message.

pub mod credentials;
pub mod prompts;
pub mod service;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use inkshift_browser::chrome;
use inkshift_browser::inkshift_core::{TransformRequest, TransformResponse};

/// Register the message listener. The closure returns `true` so the response
/// channel stays open across the awaits.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    {
        use tracing::Level;
        use tracing_subscriber::Registry;
        use tracing_subscriber::layer::SubscriberExt;

        let console_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };
        let wasm_layer = tracing_wasm::WASMLayer::new(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(console_level)
                .build(),
        );
        let _ = tracing::subscriber::set_global_default(Registry::default().with(wasm_layer));
    }

    let listener = Closure::<dyn FnMut(JsValue, JsValue, js_sys::Function) -> JsValue>::new(
        move |request: JsValue, _sender: JsValue, send_response: js_sys::Function| {
            spawn_local(async move {
                let response = handle_message(request).await;
                let value = serde_wasm_bindgen::to_value(&response).unwrap_or(JsValue::NULL);
                if let Err(e) = send_response.call1(&JsValue::NULL, &value) {
                    tracing::debug!(target: "inkshift::worker", error = ?e, "sendResponse failed");
                }
            });
            JsValue::TRUE
        },
    );
    chrome::add_message_listener(listener.as_ref().unchecked_ref());
    listener.forget();

    tracing::info!(target: "inkshift::worker", "service worker ready");
}

/// One request end to end: decode, load settings, call the backend, and
/// settle the trial quota on success.
pub async fn handle_message(raw: JsValue) -> TransformResponse {
    let request: TransformRequest = match serde_wasm_bindgen::from_value(raw) {
        Ok(request) => request,
        Err(e) => return TransformResponse::err(format!("unrecognized request: {e}")),
    };

    let settings = chrome::load_settings().await;
    match service::handle(request, &settings).await {
        Ok(outcome) => {
            if outcome.used_trial {
                credentials::consume_trial(&settings).await;
            }
            TransformResponse::ok(outcome.text)
        }
        Err(e) => {
            tracing::warn!(target: "inkshift::worker", error = %e, "transformation failed");
            TransformResponse::err(e.user_message())
        }
    }
}
