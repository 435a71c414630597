use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream returned {status}")]
    Upstream { status: u16, body: Value },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session storage error: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Auth(_) => "Authentication failed. Please log in again.",
            ApiError::Network(_) => "Network error. Check your connection.",
            ApiError::Upstream {
                status: 401 | 403,
                ..
            } => "Streamlabs rejected the token. Please log in again.",
            ApiError::Upstream { .. } => "Streamlabs returned an error. Please try again later.",
            ApiError::Validation(_) => "Invalid input.",
            ApiError::Storage(_) => "Could not read or write the saved session.",
        }
    }

    /// Status code to surface to a downstream caller. Transport failures have
    /// no upstream status and map to 500.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Upstream { status, .. } => *status,
            ApiError::Auth(_) => 401,
            ApiError::Validation(_) => 400,
            ApiError::Network(_) | ApiError::Storage(_) => 500,
        }
    }

    /// Body to surface as `details`: the upstream payload when there is one,
    /// otherwise `{ "message": ... }`.
    pub fn details(&self) -> Value {
        match self {
            ApiError::Upstream { body, .. } => body.clone(),
            other => serde_json::json!({ "message": other.to_string() }),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
