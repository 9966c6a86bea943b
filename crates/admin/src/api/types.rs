//! Wire types shared by every endpoint.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The `{ success, data }` wrapper every backend response follows.
///
/// Mutation endpoints frequently answer `{ "success": true }` with no data,
/// so `data` is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    /// Error detail, a code string or an object depending on the endpoint.
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    /// Some auth responses put the token beside `data` instead of inside it.
    #[serde(default)]
    pub token: Option<String>,
}

impl<T> Envelope<T> {
    /// Envelope for an empty 2xx body.
    #[must_use]
    pub const fn empty_success() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
            error: None,
            token: None,
        }
    }

    /// Turn a `success: false` envelope into [`AppError::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::Rejected` carrying the backend message (if any).
    pub fn accepted(self) -> Result<Option<T>, AppError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(AppError::Rejected(
                self.reason()
                    .unwrap_or_else(|| "request was not accepted".to_string()),
            ))
        }
    }

    /// Why the backend refused: `message`, else a string `error` or its
    /// `message` field.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        self.message.clone().or_else(|| match &self.error {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Object(map)) => map
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned),
            _ => None,
        })
    }
}

/// Body for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body for `POST /auth/logout`.
#[derive(Debug, Serialize)]
pub struct LogoutRequest<'a> {
    pub token: &'a str,
}

/// Body for `POST /jobs/:id/publish`.
#[derive(Debug, Serialize)]
pub struct PublishRequest {
    pub publish: bool,
}

/// Body for status-change endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest<S> {
    pub status: S,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler_id: Option<String>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
