//! Normalized API error.
//!
//! Every failure of a request to the backend, whether the transport broke or
//! the server answered with a non-2xx status, is turned into one [`ApiError`].
//! Callers of the client never see `reqwest` errors.

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Uniform description of a failed request.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{error}")]
#[diagnostic(code(taskrelay::client::api_error))]
pub struct ApiError {
    /// Human-readable message
    pub error: String,
    /// Machine-readable code, when the server or transport supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// HTTP status of the failed response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
            status: None,
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// A 2xx response whose body did not have the expected shape.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(message).with_code("INVALID_RESPONSE")
    }

    /// Build an error from a non-2xx response.
    ///
    /// The message prefers the body's `error` field, then its `message`
    /// field, then the generic status message.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let field = |name: &str| {
            parsed
                .as_ref()
                .and_then(|v| v.get(name))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let error = field("error")
            .or_else(|| field("message"))
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

        Self {
            error,
            code: field("code"),
            status: Some(status.as_u16()),
            details: parsed
                .as_ref()
                .and_then(|v| v.get("details"))
                .filter(|d| !d.is_null())
                .cloned(),
            timestamp: Utc::now(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        let code = if e.is_timeout() {
            Some("TIMEOUT")
        } else if e.is_connect() {
            Some("CONNECTION_FAILED")
        } else if e.is_decode() {
            Some("INVALID_RESPONSE")
        } else {
            None
        };

        Self {
            error: e.to_string(),
            code: code.map(str::to_string),
            status: e.status().map(|s| s.as_u16()),
            details: None,
            timestamp: Utc::now(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::invalid_response(e.to_string())
    }
}
