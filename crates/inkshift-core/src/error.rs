//! Error taxonomy for backend interactions.
//!
//! Selection and replacement errors never reach this level: a bad range
//! read aborts silently and a failed strategy only selects fallthrough.
//! What remains is the backend call and its response shape.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The backend reported an error; the message is shown to the user
    /// (possibly rephrased, see [`crate::respond::friendly_error`]).
    #[error("{0}")]
    Backend(String),

    /// No credential available for the requested operation.
    #[error("{0} requires an API key; configure one in the extension settings")]
    MissingCredential(&'static str),

    /// The response arrived but carried no usable payload.
    #[error("malformed service response")]
    MalformedResponse,

    /// The HTTP request itself failed before any response was read.
    #[error("network error: {0}")]
    Network(String),

    /// The messaging channel to the worker failed (extension reloaded,
    /// context invalidated). Recoverable by the next user action.
    #[error("extension messaging unavailable: {0}")]
    Channel(String),
}

impl ServiceError {
    /// The message to surface, with the friendly rephrasings applied.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Backend(message) => crate::respond::friendly_error(message)
                .map(str::to_owned)
                .unwrap_or_else(|| message.clone()),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_messages_pass_through_verbatim() {
        let err = ServiceError::Backend("upstream timeout".into());
        assert_eq!(err.user_message(), "upstream timeout");
    }

    #[test]
    fn overload_is_rephrased() {
        let err = ServiceError::Backend("model overloaded (503)".into());
        assert!(err.user_message().contains("temporarily overloaded"));
    }
}
