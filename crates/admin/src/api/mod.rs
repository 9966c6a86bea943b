//! REST client for the Selam backend.
//!
//! Every view talks to the backend through one [`ApiClient`]. The client is
//! cheap to clone (shared inner state) and is handed explicitly to the
//! session store and to each list controller.
//!
//! # Contract
//!
//! - Base URL: configured, default `http://localhost:8080/api/v1`
//! - Authentication: `Authorization: Bearer <token>` when a token is held
//! - Bodies: JSON in, JSON out, wrapped in [`Envelope`]
//! - Any non-2xx status is an [`ApiError::Status`]; there are no retries
//!
//! Endpoint methods live in one module per resource.

mod applications;
mod auth;
mod contact;
mod error;
mod jobs;
mod products;
mod system;
mod types;

pub use error::ApiError;
pub use types::*;

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::AdminConfig;

/// Selam backend API client.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<SecretString>>,
}

impl ApiClient {
    /// Create a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("selam-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url,
                token: RwLock::new(None),
            }),
        })
    }

    /// Create a client from the admin configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn from_config(config: &AdminConfig) -> Result<Self, ApiError> {
        Self::new(config.api_base_url.clone(), config.http_timeout)
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Attach a bearer token to every subsequent request.
    pub fn set_token(&self, token: SecretString) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Stop sending a bearer token.
    pub fn clear_token(&self) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The currently held token, if any.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a token is currently attached.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Build the URL for a list of path segments, percent-encoding each.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::InvalidRequest(format!(
                    "base URL cannot hold a path: {}",
                    self.inner.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send one request and decode the envelope.
    ///
    /// `segments` are the path below the base URL, e.g. `["jobs", id]`.
    /// The envelope's `success` flag is returned as-is; callers check it.
    ///
    /// # Errors
    ///
    /// - `ApiError::Transport` if no response arrives
    /// - `ApiError::Status` for any non-2xx status
    /// - `ApiError::Decode` if the body is not a valid envelope
    pub async fn request<T, B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let url = self.url(segments)?;
        debug!(%method, %url, "Sending API request");

        let mut builder = self.inner.client.request(method.clone(), url.clone());
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token.expose_secret());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(%method, %url, error = %e, "API request failed");
            ApiError::Transport(e)
        })?;

        Self::handle_response(response).await
    }

    /// Execute a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<Envelope<T>, ApiError> {
        self.request::<T, ()>(Method::GET, segments, None).await
    }

    /// Execute a POST request.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<Envelope<T>, ApiError> {
        self.request(Method::POST, segments, Some(body)).await
    }

    /// Execute a PUT request.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<Envelope<T>, ApiError> {
        self.request(Method::PUT, segments, Some(body)).await
    }

    /// Execute a PATCH request.
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + ?Sized + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<Envelope<T>, ApiError> {
        self.request(Method::PATCH, segments, Some(body)).await
    }

    /// Execute a DELETE request.
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<Envelope<T>, ApiError> {
        self.request::<T, ()>(Method::DELETE, segments, None).await
    }

    /// Check the status and parse the envelope.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Envelope<T>, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "API returned error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        // 204 and friends carry no envelope; treat them as plain success.
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Envelope::empty_success());
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("token", &self.has_token().then_some("[REDACTED]"))
            .finish_non_exhaustive()
    }
}
