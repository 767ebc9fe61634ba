//! Content script entry point for inkshift.
//!
//! Injected into every page; wires the document-level listeners to the
//! per-page [`App`] state and keeps the cached settings fresh.

mod app;
mod controller;
mod live;
mod ui;

pub use app::App;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use inkshift_browser::chrome;

/// Initialize logging and panic reporting, then mount the page state.
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

    let app = App::new();
    controller::install(&app);
    live::install(&app);

    // Settings load is async; until it lands the defaults apply, and every
    // gesture re-reads the store anyway.
    let warm = app.clone();
    spawn_local(async move {
        *warm.settings.borrow_mut() = chrome::load_settings().await;
    });

    tracing::info!(target: "inkshift::content", "content script mounted");
}
