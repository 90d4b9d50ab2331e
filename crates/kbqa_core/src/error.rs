use serde::{Deserialize, Serialize};
use std::fmt;

pub const CREDENTIAL_INVALID: &str = "AI_CREDENTIAL_INVALID";

/// Single structured error shape shared by every pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    pub retryable: bool,
}

impl AppError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    /// True when the remote service rejected the API key. Boundary layers use
    /// this to re-prompt for a key or downgrade to offline mode.
    pub fn is_invalid_credential(&self) -> bool {
        self.code == CREDENTIAL_INVALID
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
