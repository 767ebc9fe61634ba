//! Async clipboard access.

use wasm_bindgen_futures::JsFuture;

use crate::dom;
use crate::error::DomError;

/// Write text via the async Clipboard API.
pub async fn write_text(text: &str) -> Result<(), DomError> {
    let clipboard = dom::window()?.navigator().clipboard();
    JsFuture::from(clipboard.write_text(text))
        .await
        .map_err(|e| DomError::from_js("clipboard writeText", e))?;
    Ok(())
}

/// Fire-and-forget clipboard write; failures only log.
pub fn write_text_detached(text: String) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = write_text(&text).await {
            tracing::warn!(target: "inkshift::clipboard", error = %e, "clipboard write failed");
        }
    });
}
