//! HTTP client errors.

use thiserror::Error;

/// Errors raised by [`ApiClient`](super::ApiClient).
///
/// A `success: false` envelope is *not* an error at this layer; callers
/// inspect the envelope themselves.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, for logging.
        body: String,
    },

    /// The response body was not the JSON we expected.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The request could not be built (bad path, bad header value).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status code, if the backend answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected our credentials.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Whether the backend said the resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_carries_code() {
        let err = ApiError::Status {
            status: 404,
            body: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error! status: 404");
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn test_auth_failure_codes() {
        for status in [401, 403] {
            let err = ApiError::Status {
                status,
                body: String::new(),
            };
            assert!(err.is_auth_failure());
        }
        assert!(!ApiError::Decode("eof".to_string()).is_auth_failure());
    }
}
