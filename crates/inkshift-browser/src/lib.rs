//! Browser DOM layer for inkshift.
//!
//! Everything here assumes a `wasm32-unknown-unknown` target inside a page
//! or extension context. The pure decision logic lives in `inkshift-core`;
//! this crate binds it to the DOM:
//!
//! - `selection`: capture and restore of selection snapshots
//! - `host`: editability probing and block discovery per host rules
//! - `replace`: the escalating replacement engine
//! - `caret`: caret re-seating after replacements
//! - `block`: whole-block extraction/rewrite for live typing
//! - `chrome`: extension messaging and settings storage
//!
//! Re-exports `inkshift-core` so consumers only need this crate.

pub use inkshift_core;
pub use inkshift_core::*;

pub mod block;
pub mod caret;
pub mod chrome;
pub mod clipboard;
pub mod dom;
pub mod error;
pub mod host;
pub mod replace;
pub mod selection;

pub use error::DomError;
pub use host::BrowserHost;
pub use replace::ReplacementEngine;
pub use selection::CapturedSelection;
