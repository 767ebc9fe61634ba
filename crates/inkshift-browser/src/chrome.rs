//! Bindings to the extension platform APIs (`chrome.runtime`,
//! `chrome.storage.local`) plus typed helpers over them.
//!
//! web-sys does not cover the extension namespaces, so these are hand-rolled
//! `wasm_bindgen` imports. Everything crossing the boundary is serde-typed on
//! this side; raw `JsValue`s stop here.

use inkshift_core::{ServiceError, Settings, TransformRequest, TransformResponse};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::error::DomError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime"], js_name = sendMessage)]
    fn runtime_send_message(message: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = get)]
    fn storage_local_get(keys: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = set)]
    fn storage_local_set(items: &JsValue) -> Result<js_sys::Promise, JsValue>;

    /// `chrome.runtime.onMessage.addListener`. The listener must return
    /// `true` to keep the response channel open across an await.
    #[wasm_bindgen(js_namespace = ["chrome", "runtime", "onMessage"], js_name = addListener)]
    pub fn add_message_listener(listener: &js_sys::Function);
}

fn channel_err(context: &str, value: JsValue) -> ServiceError {
    ServiceError::Channel(format!("{context}: {value:?}"))
}

/// Send a transformation request to the background worker and await the
/// typed reply.
///
/// A rejected promise usually means the extension context was invalidated
/// (reload, update); that maps to [`ServiceError::Channel`] and recovers on
/// the next user action.
pub async fn send_transform(request: &TransformRequest) -> Result<TransformResponse, ServiceError> {
    let message = serde_wasm_bindgen::to_value(request)
        .map_err(|e| ServiceError::Channel(e.to_string()))?;
    let promise = runtime_send_message(&message).map_err(|e| channel_err("sendMessage", e))?;
    let reply = JsFuture::from(promise)
        .await
        .map_err(|e| channel_err("worker reply", e))?;
    serde_wasm_bindgen::from_value(reply).map_err(|e| ServiceError::Channel(e.to_string()))
}

/// Load the whole settings store. Missing keys fall back to their defaults;
/// a failing store reads as all-defaults rather than an error.
pub async fn load_settings() -> Settings {
    let promise = match storage_local_get(&JsValue::NULL) {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!(target: "inkshift::chrome", error = ?e, "storage get failed");
            return Settings::default();
        }
    };
    match JsFuture::from(promise).await {
        Ok(value) => serde_wasm_bindgen::from_value(value).unwrap_or_default(),
        Err(e) => {
            tracing::debug!(target: "inkshift::chrome", error = ?e, "storage get rejected");
            Settings::default()
        }
    }
}

/// Write a partial settings object (only the supplied keys change).
pub async fn store_items(items: &JsValue) -> Result<(), DomError> {
    let promise = storage_local_set(items).map_err(|e| DomError::from_js("storage set", e))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| DomError::from_js("storage set rejected", e))?;
    Ok(())
}
