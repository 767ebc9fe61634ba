//! Prompt templates for the generative-model calls.

use inkshift_browser::inkshift_core::{language_label, MAX_ALTERNATIVES, ToneStyle};

pub fn tone_prompt(style: ToneStyle, text: &str) -> String {
    let instruction = match style {
        ToneStyle::Formal => "Rewrite the following text in a formal, polished register",
        ToneStyle::Casual => "Rewrite the following text in a relaxed, conversational register",
        ToneStyle::Fluent => "Rewrite the following text so it reads smoothly and naturally",
        ToneStyle::Professional => {
            "Rewrite the following text in a concise, professional business register"
        }
    };
    format!(
        "{instruction}. Keep the original meaning and language. \
         Reply with the rewritten text only.\n\n{text}"
    )
}

pub fn alternatives_prompt(text: &str) -> String {
    format!(
        "Provide up to {MAX_ALTERNATIVES} improved rewrites of the following text. \
         Keep the original language and meaning. Separate the rewrites with \"||\" \
         and reply with nothing else.\n\n{text}"
    )
}

/// Model-backed translation, used when no translation API key is available
/// or the translation API call failed.
pub fn translate_prompt(source_lang: &str, target_lang: &str, text: &str) -> String {
    let target = language_label(target_lang);
    if source_lang == "auto" {
        format!(
            "Translate the following text into {target}. \
             Reply with the translation only.\n\n{text}"
        )
    } else {
        format!(
            "Translate the following text from {} into {target}. \
             Reply with the translation only.\n\n{text}",
            language_label(source_lang)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_prompt_carries_text_and_register() {
        let p = tone_prompt(ToneStyle::Casual, "see you soon");
        assert!(p.contains("conversational"));
        assert!(p.ends_with("see you soon"));
    }

    #[test]
    fn alternatives_prompt_requests_the_separator() {
        let p = alternatives_prompt("draft");
        assert!(p.contains("||"));
        assert!(p.contains("up to 3"));
    }

    #[test]
    fn translate_prompt_handles_auto_detection() {
        let auto = translate_prompt("auto", "ja", "hello");
        assert!(auto.contains("into Japanese"));
        assert!(!auto.contains("from"));

        let explicit = translate_prompt("de", "en", "hallo");
        assert!(explicit.contains("from German into English"));
    }
}
