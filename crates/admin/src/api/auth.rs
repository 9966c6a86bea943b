//! Authentication endpoints.

use serde_json::Value;
use tracing::instrument;

use super::{ApiClient, ApiError, Envelope, LoginRequest, LogoutRequest};

impl ApiClient {
    /// Exchange credentials for a session (`POST /auth/login`).
    ///
    /// The payload shape varies between backend versions (`data.token` or a
    /// top-level `token`; the profile in `data.user` or `data`), so the data
    /// is returned untyped for the session store to pick apart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Envelope<Value>, ApiError> {
        self.post(&["auth", "login"], &LoginRequest { email, password })
            .await
    }

    /// Invalidate a token server-side (`POST /auth/logout`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip_all)]
    pub async fn logout(&self, token: &str) -> Result<Envelope<Value>, ApiError> {
        self.post(&["auth", "logout"], &LogoutRequest { token }).await
    }

    /// Fetch the profile for the attached token (`GET /auth/me`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self))]
    pub async fn get_profile(&self) -> Result<Envelope<Value>, ApiError> {
        self.get(&["auth", "me"]).await
    }
}
