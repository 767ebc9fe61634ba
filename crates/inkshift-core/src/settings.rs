//! Typed view of the flat key-value settings store.
//!
//! The store has no transactions; every field has a documented default so a
//! missing key is never an error, and nothing here assumes atomicity across
//! a read-then-write sequence.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET_LANG: &str = "en";
pub const DEFAULT_SOURCE_LANG: &str = "auto";
pub const DEFAULT_TONE: &str = "formal";
pub const TRIAL_LIMIT: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Master switch for selection handling.
    pub extension_enabled: bool,
    /// Switch for the translate-as-you-type loop.
    pub live_translate_enabled: bool,
    pub source_lang: String,
    pub target_lang: String,
    pub tone_style: String,
    /// User's own translation API key, if configured.
    pub translate_api_key: Option<String>,
    /// User's own generative-model API key, if configured.
    pub model_api_key: Option<String>,
    pub trial_active: bool,
    pub trial_remaining: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extension_enabled: true,
            live_translate_enabled: true,
            source_lang: DEFAULT_SOURCE_LANG.to_owned(),
            target_lang: DEFAULT_TARGET_LANG.to_owned(),
            tone_style: DEFAULT_TONE.to_owned(),
            translate_api_key: None,
            model_api_key: None,
            trial_active: true,
            trial_remaining: TRIAL_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let s: Settings = serde_json::from_str("{}").unwrap();
        assert!(s.extension_enabled);
        assert!(s.live_translate_enabled);
        assert_eq!(s.target_lang, "en");
        assert_eq!(s.tone_style, "formal");
        assert_eq!(s.trial_remaining, TRIAL_LIMIT);
        assert!(s.translate_api_key.is_none());
    }

    #[test]
    fn partial_store_overrides_only_named_keys() {
        let s: Settings =
            serde_json::from_str(r#"{"targetLang":"ja","extensionEnabled":false}"#).unwrap();
        assert_eq!(s.target_lang, "ja");
        assert!(!s.extension_enabled);
        assert_eq!(s.tone_style, "formal");
    }
}
