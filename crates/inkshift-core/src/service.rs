//! Wire types shared between the content script and the background worker,
//! plus the language and tone tables driving the submenus.

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// A transformation request, tagged the way the worker protocol expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransformRequest {
    Translate {
        text: String,
        #[serde(rename = "sourceLang")]
        source_lang: String,
        #[serde(rename = "targetLang")]
        target_lang: String,
    },
    Tone {
        text: String,
        tone: String,
    },
    Rewrite {
        text: String,
    },
}

impl TransformRequest {
    pub fn text(&self) -> &str {
        match self {
            TransformRequest::Translate { text, .. }
            | TransformRequest::Tone { text, .. }
            | TransformRequest::Rewrite { text } => text,
        }
    }
}

/// Worker reply: one of `text` or `error` is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransformResponse {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            text: None,
            error: Some(message.into()),
        }
    }

    pub fn into_result(self) -> Result<String, ServiceError> {
        if let Some(message) = self.error {
            return Err(ServiceError::Backend(message));
        }
        match self.text {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(ServiceError::MalformedResponse),
        }
    }
}

/// Tone styles offered in the submenu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneStyle {
    Formal,
    Casual,
    Fluent,
    Professional,
}

impl ToneStyle {
    pub fn key(self) -> &'static str {
        match self {
            ToneStyle::Formal => "formal",
            ToneStyle::Casual => "casual",
            ToneStyle::Fluent => "fluent",
            ToneStyle::Professional => "professional",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        TONES.iter().find(|t| t.key() == key).copied()
    }
}

/// Submenu order.
pub const TONES: &[ToneStyle] = &[
    ToneStyle::Formal,
    ToneStyle::Casual,
    ToneStyle::Fluent,
    ToneStyle::Professional,
];

pub fn tone_label(tone: ToneStyle) -> &'static str {
    match tone {
        ToneStyle::Formal => "Formal",
        ToneStyle::Casual => "Casual",
        ToneStyle::Fluent => "Fluent",
        ToneStyle::Professional => "Professional",
    }
}

/// Target languages offered in the translate submenu: `(code, label)`.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("es", "Spanish"),
    ("fr", "French"),
];

/// Full code-to-name table, used when phrasing model prompts.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("zh", "Chinese"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ar", "Arabic"),
];

/// Human name for a language code; unknown codes read as English.
pub fn language_label(code: &str) -> &'static str {
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or("English")
}

/// Language code for a human name; unknown names read as the name itself
/// being unusable, so default to `en`.
pub fn language_code(name: &str) -> &'static str {
    LANGUAGE_NAMES
        .iter()
        .find(|(_, n)| n.eq_ignore_ascii_case(name))
        .map(|(c, _)| *c)
        .unwrap_or("en")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_round_trips_with_wire_tags() {
        let req = TransformRequest::Translate {
            text: "hola".into(),
            source_lang: "auto".into(),
            target_lang: "en".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "translate");
        assert_eq!(json["targetLang"], "en");
        let back: TransformRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn response_into_result() {
        assert_eq!(
            TransformResponse::ok("hi").into_result().unwrap(),
            "hi"
        );
        assert!(TransformResponse::err("boom").into_result().is_err());
        assert!(TransformResponse::default().into_result().is_err());
    }

    #[test]
    fn language_tables() {
        assert_eq!(language_label("ja"), "Japanese");
        assert_eq!(language_label("xx"), "English");
        assert_eq!(language_code("German"), "de");
        assert_eq!(language_code("klingon"), "en");
    }

    #[test]
    fn tone_keys_round_trip() {
        for tone in TONES {
            assert_eq!(ToneStyle::from_key(tone.key()), Some(*tone));
        }
        assert_eq!(ToneStyle::from_key("sarcastic"), None);
    }
}
