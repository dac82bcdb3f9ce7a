//! Failure kinds surfaced by the API client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response, passed through with its status and body.
    #[error("Request failed ({status}): {body}")]
    Http { status: StatusCode, body: String },

    /// 401 with nothing to refresh the session with.
    #[error("Unauthenticated: no refresh token available")]
    NoRefreshToken,

    /// 401 and the refresh call itself was rejected.
    #[error("Session expired: token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// True for the two failures that end the session (the caller should log out).
    pub fn is_session_error(&self) -> bool {
        matches!(self, ApiError::NoRefreshToken | ApiError::RefreshFailed(_))
    }

    /// HTTP status for `Http` errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Best human-readable reason: the backend's `error`/`detail` field when
    /// the body is JSON, otherwise the whole error.
    pub fn user_message(&self) -> String {
        if let ApiError::Http { body, .. } = self {
            if let Some(message) = backend_message(body) {
                return message;
            }
        }
        self.to_string()
    }
}

fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let fields = value.as_object()?;
    for key in ["error", "detail", "message"] {
        if let Some(text) = fields.get(key).and_then(|v| v.as_str()) {
            return Some(text.to_string());
        }
    }
    // Field validation errors: {"email": ["user with this email already exists."]}
    let parts: Vec<String> = fields
        .iter()
        .filter_map(|(field, v)| {
            let first = v.as_array()?.first()?.as_str()?;
            Some(format!("{}: {}", field, first))
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}
