//! Error types for finledger-assistant

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Message must not be empty")]
    EmptyMessage,

    #[error("Provider API key is not configured")]
    MissingApiKey,

    #[error("Provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for AssistantError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            AssistantError::Network("Request timed out".to_string())
        } else if let Some(status) = error.status() {
            AssistantError::Provider {
                status: status.as_u16(),
                message: error.to_string(),
            }
        } else {
            AssistantError::Network(error.to_string())
        }
    }
}

/// Result type with AssistantError
pub type AssistantResult<T> = Result<T, AssistantError>;
