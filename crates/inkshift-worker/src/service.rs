//! Backend calls: the translation API with a generative-model fallback, and
//! the model-only tone/rewrite paths.

use inkshift_browser::inkshift_core::{
    decode_entities, ServiceError, Settings, ToneStyle, TransformRequest,
};

use crate::credentials;
use crate::prompts;

const TRANSLATE_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";
const MODEL_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// A successful transformation, plus whether the shared trial credential
/// paid for it (the caller decrements the quota once per outcome).
pub struct Outcome {
    pub text: String,
    pub used_trial: bool,
}

pub async fn handle(request: TransformRequest, settings: &Settings) -> Result<Outcome, ServiceError> {
    match request {
        TransformRequest::Translate {
            text,
            source_lang,
            target_lang,
        } => translate(&text, &source_lang, &target_lang, settings).await,
        TransformRequest::Tone { text, tone } => {
            let style = ToneStyle::from_key(&tone).unwrap_or(ToneStyle::Formal);
            generate(&prompts::tone_prompt(style, &text), settings).await
        }
        TransformRequest::Rewrite { text } => {
            generate(&prompts::alternatives_prompt(&text), settings).await
        }
    }
}

/// Dedicated translation API first; any failure there falls back to the
/// model. Only when neither path has a credential does the request fail.
async fn translate(
    text: &str,
    source_lang: &str,
    target_lang: &str,
    settings: &Settings,
) -> Result<Outcome, ServiceError> {
    if let Some(cred) = credentials::translate_credential(settings) {
        match call_translate_api(text, source_lang, target_lang, cred.key()).await {
            Ok(translated) => {
                return Ok(Outcome {
                    text: translated,
                    used_trial: cred.is_trial(),
                });
            }
            Err(e) => {
                tracing::warn!(
                    target: "inkshift::worker",
                    error = %e,
                    "translation API failed, falling back to the model"
                );
            }
        }
    }
    let prompt = prompts::translate_prompt(source_lang, target_lang, text);
    generate(&prompt, settings).await
}

async fn generate(prompt: &str, settings: &Settings) -> Result<Outcome, ServiceError> {
    let cred = credentials::model_credential(settings)
        .ok_or(ServiceError::MissingCredential("this transformation"))?;
    let text = call_model(prompt, cred.key()).await?;
    Ok(Outcome {
        text,
        used_trial: cred.is_trial(),
    })
}

async fn call_translate_api(
    text: &str,
    source_lang: &str,
    target_lang: &str,
    key: &str,
) -> Result<String, ServiceError> {
    let mut params: Vec<(&str, &str)> = vec![
        ("q", text),
        ("target", target_lang),
        ("format", "text"),
        ("key", key),
    ];
    if source_lang != "auto" {
        params.push(("source", source_lang));
    }

    let response = reqwest::Client::new()
        .post(TRANSLATE_ENDPOINT)
        .form(&params)
        .send()
        .await
        .map_err(net_err)?;
    let status = response.status();
    let body: serde_json::Value = response.json().await.map_err(net_err)?;
    if !status.is_success() {
        return Err(ServiceError::Backend(backend_message(
            &body,
            "translation service error",
        )));
    }

    let translated = body["data"]["translations"][0]["translatedText"]
        .as_str()
        .ok_or(ServiceError::MalformedResponse)?;
    // The API HTML-escapes its output even in text mode.
    Ok(decode_entities(translated))
}

async fn call_model(prompt: &str, key: &str) -> Result<String, ServiceError> {
    let body = serde_json::json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    });
    let response = reqwest::Client::new()
        .post(format!("{MODEL_ENDPOINT}?key={key}"))
        .json(&body)
        .send()
        .await
        .map_err(net_err)?;
    let status = response.status();
    let body: serde_json::Value = response.json().await.map_err(net_err)?;
    if !status.is_success() {
        return Err(ServiceError::Backend(backend_message(
            &body,
            "model service error",
        )));
    }

    let text = body["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or(ServiceError::MalformedResponse)?;
    Ok(text.trim().to_owned())
}

fn net_err(e: reqwest::Error) -> ServiceError {
    ServiceError::Network(e.to_string())
}

fn backend_message(body: &serde_json::Value, fallback: &str) -> String {
    body["error"]["message"]
        .as_str()
        .unwrap_or(fallback)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_prefers_the_service_detail() {
        let body = serde_json::json!({"error": {"message": "quota exceeded", "code": 429}});
        assert_eq!(backend_message(&body, "fallback"), "quota exceeded");
        assert_eq!(
            backend_message(&serde_json::json!({}), "fallback"),
            "fallback"
        );
    }
}
