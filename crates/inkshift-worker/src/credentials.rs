//! Credential selection and trial-quota persistence.
//!
//! A user-configured key always wins. Otherwise the packaged trial key is
//! used while the quota lasts; the quota is decremented once per successful
//! operation, never per HTTP attempt.

use inkshift_browser::chrome;
use inkshift_browser::inkshift_core::{Settings, TrialQuota};

/// Shared trial keys, injected at packaging time. Empty means no trial.
pub const TRIAL_TRANSLATE_KEY: &str = match option_env!("INKSHIFT_TRIAL_TRANSLATE_KEY") {
    Some(key) => key,
    None => "",
};
pub const TRIAL_MODEL_KEY: &str = match option_env!("INKSHIFT_TRIAL_MODEL_KEY") {
    Some(key) => key,
    None => "",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    User(String),
    Trial(&'static str),
}

impl Credential {
    pub fn key(&self) -> &str {
        match self {
            Credential::User(key) => key,
            Credential::Trial(key) => key,
        }
    }

    pub fn is_trial(&self) -> bool {
        matches!(self, Credential::Trial(_))
    }
}

pub fn translate_credential(settings: &Settings) -> Option<Credential> {
    pick(
        settings.translate_api_key.as_deref(),
        TRIAL_TRANSLATE_KEY,
        quota_of(settings),
    )
}

pub fn model_credential(settings: &Settings) -> Option<Credential> {
    pick(
        settings.model_api_key.as_deref(),
        TRIAL_MODEL_KEY,
        quota_of(settings),
    )
}

fn quota_of(settings: &Settings) -> TrialQuota {
    TrialQuota::new(settings.trial_active, settings.trial_remaining)
}

fn pick(user: Option<&str>, trial_key: &'static str, quota: TrialQuota) -> Option<Credential> {
    if let Some(key) = user.filter(|k| !k.trim().is_empty()) {
        return Some(Credential::User(key.to_owned()));
    }
    if !trial_key.is_empty() && quota.usable() {
        return Some(Credential::Trial(trial_key));
    }
    None
}

/// Persist one consumed trial use. Storage failures only log; the worst case
/// is an uncounted free call.
pub async fn consume_trial(settings: &Settings) {
    let mut quota = quota_of(settings);
    if !quota.consume() {
        return;
    }
    let items = serde_json::json!({
        "trialActive": quota.active,
        "trialRemaining": quota.remaining,
    });
    let Ok(items) = serde_wasm_bindgen::to_value(&items) else {
        return;
    };
    if let Err(e) = chrome::store_items(&items).await {
        tracing::warn!(target: "inkshift::worker", error = %e, "trial quota write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_key_always_wins() {
        let cred = pick(Some("sk-user"), "trial", TrialQuota::new(true, 5)).unwrap();
        assert_eq!(cred, Credential::User("sk-user".into()));
        assert!(!cred.is_trial());
    }

    #[test]
    fn blank_user_key_falls_back_to_trial() {
        let cred = pick(Some("   "), "trial", TrialQuota::new(true, 5)).unwrap();
        assert_eq!(cred, Credential::Trial("trial"));
        assert!(cred.is_trial());
    }

    #[test]
    fn exhausted_trial_yields_nothing() {
        assert_eq!(pick(None, "trial", TrialQuota::new(true, 0)), None);
        assert_eq!(pick(None, "trial", TrialQuota::new(false, 10)), None);
    }

    #[test]
    fn missing_trial_key_yields_nothing() {
        assert_eq!(pick(None, "", TrialQuota::new(true, 10)), None);
    }
}
