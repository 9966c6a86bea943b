//! Unified error handling for the admin client.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::session::TokenStoreError;

/// Application-level error type.
///
/// Every controller operation returns this. The `Display` text is for logs;
/// operators see [`AppError::user_message`].
#[derive(Debug, Error)]
pub enum AppError {
    /// The HTTP layer failed (transport, non-2xx, or malformed body).
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The backend answered `success: false`.
    #[error("Rejected by backend: {0}")]
    Rejected(String),

    /// Local validation failed before any request was sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The record is not in the loaded collection.
    #[error("Not found: {0}")]
    NotFound(String),

    /// No session is active.
    #[error("Not signed in")]
    Unauthenticated,

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The persisted token slot could not be read or written.
    #[error("Token store error: {0}")]
    TokenStore(#[from] TokenStoreError),
}

impl AppError {
    /// Generic text suitable for a notification.
    ///
    /// Backend bodies and transport details are deliberately left out.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) if err.is_auth_failure() => {
                "Your session has expired. Please sign in again.".to_string()
            }
            Self::Api(err) if err.is_not_found() => "The record no longer exists.".to_string(),
            Self::Api(_) | Self::Rejected(_) => {
                "The request could not be completed. Please try again.".to_string()
            }
            Self::Validation(msg) => msg.clone(),
            Self::NotFound(what) => format!("{what} was not found."),
            Self::Unauthenticated => "Please sign in first.".to_string(),
            Self::Config(_) | Self::TokenStore(_) => {
                "The admin client is misconfigured.".to_string()
            }
        }
    }

    /// The underlying HTTP error, if any.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Log the error, sending unexpected failures to Sentry.
    pub fn report(&self, context: &str) {
        if matches!(
            self,
            Self::Api(ApiError::Transport(_) | ApiError::Decode(_)) | Self::TokenStore(_)
        ) {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                context,
                "Admin operation error"
            );
        } else {
            tracing::warn!(error = %self, context, "Admin operation failed");
        }
    }
}
