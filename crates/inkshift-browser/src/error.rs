//! Error type for DOM operations.

use wasm_bindgen::JsValue;

/// Error type for DOM-layer operations.
///
/// Selection and replacement failures are expected events, not bugs, so this
/// carries only a message. Callers decide whether to log, fall through to the
/// next strategy, or abort silently.
#[derive(Debug, Clone)]
pub struct DomError(pub String);

impl std::fmt::Display for DomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for DomError {}

impl From<&str> for DomError {
    fn from(s: &str) -> Self {
        DomError(s.to_string())
    }
}

impl From<String> for DomError {
    fn from(s: String) -> Self {
        DomError(s)
    }
}

impl DomError {
    /// Wrap a raw JS exception with a short context prefix.
    pub fn from_js(context: &str, value: JsValue) -> Self {
        DomError(format!("{context}: {value:?}"))
    }
}
