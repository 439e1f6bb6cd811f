use std::time::Duration;
use thiserror::Error;

use crate::models::FormField;

/// Every failure the form can surface. `Display` is the user-facing message.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or malformed local input; never reaches the network
    #[error("{message}")]
    Validation { field: FormField, message: String },

    /// API key does not carry the required prefix
    #[error("Invalid OpenAI API key format (must start with {prefix})")]
    AuthFormat { prefix: &'static str },

    #[error("{0}")]
    Network(String),

    #[error("Request timed out ({}s). The generator API is responding slowly. Please try again.", .0.as_secs())]
    Timeout(Duration),

    /// Non-2xx status, or a 2xx body without the success flag
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Could not parse server response: {0}")]
    Parse(String),

    #[error("Copy failed: {0}")]
    Clipboard(String),

    #[error("{0}")]
    Download(String),

    #[error("A generation request is already in progress.")]
    Busy,

    #[error("Credential storage error: {0}")]
    Storage(String),
}

impl ClientError {
    pub fn validation(field: FormField, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Field that should receive focus after this error, if any
    pub fn focus(&self) -> Option<FormField> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            Self::AuthFormat { .. } => Some(FormField::ApiKey),
            _ => None,
        }
    }

    /// True for failures detected before any request was sent
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::AuthFormat { .. } | Self::Busy)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
