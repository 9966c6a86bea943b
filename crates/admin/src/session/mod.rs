//! Session store: who is signed in, and with which token.
//!
//! The store owns the only copy of the signed-in identity. It attaches the
//! token to the shared [`ApiClient`] and mirrors it into the persisted
//! [`TokenStore`] slot.

mod token_store;

pub use token_store::{TokenStore, TokenStoreError};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use selam_core::Email;

use crate::api::{ApiClient, ApiError};
use crate::config::AdminConfig;
use crate::models::AdminUser;

/// A signed-in operator.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SecretString,
    pub user: AdminUser,
}

/// Where the store is in its lifecycle.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    /// A persisted token is being validated against `/auth/me`.
    Checking,
    Authenticated(Session),
}

/// Owns the session and keeps client, memory and disk in agreement.
#[derive(Debug)]
pub struct SessionStore {
    client: ApiClient,
    tokens: TokenStore,
    state: SessionState,
    allow_placeholder_token: bool,
}

impl SessionStore {
    #[must_use]
    pub const fn new(client: ApiClient, tokens: TokenStore, allow_placeholder_token: bool) -> Self {
        Self {
            client,
            tokens,
            state: SessionState::Unauthenticated,
            allow_placeholder_token,
        }
    }

    #[must_use]
    pub fn from_config(client: ApiClient, config: &AdminConfig) -> Self {
        Self::new(
            client,
            TokenStore::new(config.token_path.clone()),
            config.allow_placeholder_token,
        )
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    #[must_use]
    pub const fn is_checking(&self) -> bool {
        matches!(self.state, SessionState::Checking)
    }

    #[must_use]
    pub const fn user(&self) -> Option<&AdminUser> {
        match &self.state {
            SessionState::Authenticated(session) => Some(&session.user),
            _ => None,
        }
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Sign in.
    ///
    /// Returns `Ok(false)` when the credentials are refused: an invalid email,
    /// a non-2xx answer, or `success: false`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend could not be reached or sent an
    /// unreadable body.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<bool, ApiError> {
        let email = match Email::parse(email) {
            Ok(email) => email,
            Err(e) => {
                warn!(error = %e, "Login rejected locally");
                return Ok(false);
            }
        };

        let envelope = match self.client.login(email.as_str(), password).await {
            Ok(envelope) => envelope,
            Err(e) if e.status().is_some() => {
                warn!(error = %e, "Login refused by backend");
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        if !envelope.success {
            info!(reason = ?envelope.reason(), "Login unsuccessful");
            return Ok(false);
        }

        let data = envelope.data.unwrap_or(Value::Null);
        let token = envelope
            .token
            .or_else(|| data.get("token").and_then(Value::as_str).map(str::to_owned))
            .filter(|t| !t.is_empty());

        let token = match token {
            Some(token) => SecretString::from(token),
            None if self.allow_placeholder_token => {
                warn!(
                    "Backend returned no token; using an insecure placeholder token. \
                     Set SELAM_ALLOW_PLACEHOLDER_TOKEN=false to refuse such logins"
                );
                placeholder_token(&email)
            }
            None => {
                warn!("Backend returned no token and placeholder tokens are disabled");
                return Ok(false);
            }
        };

        let user = extract_user(&data).unwrap_or_else(|| AdminUser {
            id: None,
            email: email.clone(),
            display_name: String::new(),
            role: String::new(),
            is_active: true,
        });

        self.client.set_token(token.clone());
        if let Err(e) = self.tokens.save(&token) {
            error!(error = %e, "Failed to persist auth token");
        }

        info!(email = %user.email, "Signed in");
        self.state = SessionState::Authenticated(Session { token, user });
        Ok(true)
    }

    /// Validate the persisted token, if any.
    ///
    /// Any failure clears the token and leaves the store unauthenticated.
    /// Returns whether a session is now active.
    #[instrument(skip(self))]
    pub async fn restore_session(&mut self) -> bool {
        let token = match self.tokens.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No persisted token");
                return false;
            }
            Err(e) => {
                warn!(error = %e, "Could not read persisted token");
                return false;
            }
        };

        self.state = SessionState::Checking;
        self.client.set_token(token.clone());

        let user = match self.client.get_profile().await {
            Ok(envelope) if envelope.success => envelope.data.as_ref().and_then(extract_user),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Auth check failed");
                None
            }
        };

        if let Some(user) = user {
            info!(email = %user.email, "Session restored");
            self.state = SessionState::Authenticated(Session { token, user });
            true
        } else {
            self.drop_session();
            false
        }
    }

    /// Sign out. The server call is best effort; local state is always cleared.
    ///
    /// Falls back to the persisted token when none is attached yet.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) {
        let token = self
            .client
            .token()
            .or_else(|| self.tokens.load().ok().flatten());
        if let Some(token) = token {
            self.client.set_token(token.clone());
            if let Err(e) = self.client.logout(token.expose_secret()).await {
                warn!(error = %e, "Logout failed");
            }
        }
        self.drop_session();
        info!("Signed out");
    }

    /// React to an error from any request. A 401/403 ends the session.
    ///
    /// Returns whether the session was dropped.
    pub fn handle_api_error(&mut self, err: &ApiError) -> bool {
        if err.is_auth_failure() {
            warn!(error = %err, "Backend rejected credentials; signing out");
            self.drop_session();
            true
        } else {
            false
        }
    }

    fn drop_session(&mut self) {
        self.client.clear_token();
        if let Err(e) = self.tokens.clear() {
            error!(error = %e, "Failed to remove persisted token");
        }
        self.state = SessionState::Unauthenticated;
    }
}

/// Profile from `data.user`, or `data` itself.
fn extract_user(data: &Value) -> Option<AdminUser> {
    data.get("user")
        .and_then(|user| serde_json::from_value(user.clone()).ok())
        .or_else(|| serde_json::from_value(data.clone()).ok())
}

/// Stand-in token for backends that do not issue one. Not a credential.
fn placeholder_token(email: &Email) -> SecretString {
    let millis = chrono::Utc::now().timestamp_millis();
    SecretString::from(STANDARD.encode(format!("{email}:{millis}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn store_for(server: &MockServer, dir: &tempfile::TempDir, allow: bool) -> SessionStore {
        let base = Url::parse(&format!("{}/api/v1", server.uri())).unwrap();
        let client = ApiClient::new(base, Duration::from_secs(5)).unwrap();
        SessionStore::new(client, TokenStore::new(dir.path().join("auth_token")), allow)
    }

    #[tokio::test]
    async fn test_login_with_nested_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .and(body_json(json!({"email": "admin@co.com", "password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "token": "tok-1",
                    "user": {"email": "admin@co.com", "displayName": "Admin", "role": "ADMIN", "isActive": true}
                }
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut store = store_for(&server, &dir, true);
        assert!(store.login("admin@co.com", "pw").await.unwrap());
        assert_eq!(store.user().unwrap().display_name, "Admin");
        assert_eq!(store.client().token().unwrap().expose_secret(), "tok-1");
        assert_eq!(
            store.tokens.load().unwrap().unwrap().expose_secret(),
            "tok-1"
        );
    }

    #[tokio::test]
    async fn test_login_with_top_level_token_and_flat_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "token": "tok-top",
                "data": {"email": "admin@co.com", "displayName": "Flat"}
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut store = store_for(&server, &dir, true);
        assert!(store.login("admin@co.com", "pw").await.unwrap());
        assert_eq!(store.user().unwrap().display_name, "Flat");
        assert_eq!(store.client().token().unwrap().expose_secret(), "tok-top");
    }

    #[tokio::test]
    async fn test_login_refusal_with_message_and_error_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Invalid credentials",
                "error": "AUTH"
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut store = store_for(&server, &dir, true);
        assert!(!store.login("admin@co.com", "wrong").await.unwrap());
        assert!(!store.is_authenticated());
        assert!(store.tokens.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_refused() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut store = store_for(&server, &dir, true);
        assert!(!store.login("admin@co.com", "wrong").await.unwrap());
        assert!(!store.is_authenticated());
        assert!(!store.client().has_token());
    }

    #[tokio::test]
    async fn test_invalid_email_never_reaches_backend() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut store = store_for(&server, &dir, true);
        assert!(!store.login("not-an-email", "pw").await.unwrap());
    }

    #[tokio::test]
    async fn test_tokenless_login_refused_when_placeholder_disabled() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut store = store_for(&server, &dir, false);
        assert!(!store.login("admin@co.com", "pw").await.unwrap());
        assert!(!store.client().has_token());
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_backend_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/logout"))
            .and(header("authorization", "Bearer tok-9"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut store = store_for(&server, &dir, true);
        store.tokens.save(&SecretString::from("tok-9")).unwrap();
        store.client().set_token(SecretString::from("tok-9"));

        store.logout().await;
        assert!(!store.client().has_token());
        assert!(store.tokens.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_auth_failure_drops_session() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_for(&server, &dir, true);
        store.client().set_token(SecretString::from("tok"));

        let not_found = ApiError::Status {
            status: 404,
            body: String::new(),
        };
        assert!(!store.handle_api_error(&not_found));
        assert!(store.client().has_token());

        let forbidden = ApiError::Status {
            status: 403,
            body: String::new(),
        };
        assert!(store.handle_api_error(&forbidden));
        assert!(!store.client().has_token());
    }

    #[test]
    fn test_placeholder_token_encodes_email() {
        let email = Email::parse("admin@co.com").unwrap();
        let token = placeholder_token(&email);
        let decoded = String::from_utf8(STANDARD.decode(token.expose_secret()).unwrap()).unwrap();
        assert!(decoded.starts_with("admin@co.com:"));
    }
}
