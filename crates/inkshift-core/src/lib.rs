//! inkshift-core: Pure Rust logic for the inkshift extension, no browser dependencies.
//!
//! This crate provides:
//! - `Session` - the single-slot selection registry and interaction state machine
//! - `HostRules` - per-host editability markers, block selectors, strategy order
//! - Strategy order tables and outcome types for the replacement engine
//! - Response parsing, markup/text conversion, live-typing debounce state
//! - Settings, trial quota, and service wire types shared with the worker

pub mod engine;
pub mod error;
pub mod host;
pub mod live;
pub mod markup;
pub mod quota;
pub mod respond;
pub mod service;
pub mod session;
pub mod settings;

pub use engine::{AttemptOutcome, EngineOutcome, FailReason, StrategyKind};
pub use error::ServiceError;
pub use host::{
    ElementFacts, HostRules, HostVariant, is_plain_field_tag, order_for, refine_target, rules_for,
};
pub use live::{LiveDecision, LiveTranslate, LIVE_DEBOUNCE_MS};
pub use markup::{decode_entities, markup_to_text, text_to_markup};
pub use quota::TrialQuota;
pub use respond::{friendly_error, parse_alternatives, MAX_ALTERNATIVES};
pub use service::{
    language_label, tone_label, ToneStyle, TransformRequest, TransformResponse, LANGUAGES, TONES,
};
pub use session::{
    DismissDecision, RequestToken, ResultView, SelectionSnapshot, Session, SubMenu, UiState,
    DISMISS_RECHECK_MS, ERROR_DISMISS_MS, SELECTION_SETTLE_MS, UI_POINTER_GUARD_MS,
};
pub use settings::Settings;
