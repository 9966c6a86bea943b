//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SELAM_API_BASE_URL` - Backend REST API base URL (default: `http://localhost:8080/api/v1`)
//! - `SELAM_TOKEN_PATH` - File holding the persisted `auth_token`
//!   (default: `<data dir>/selam/auth_token`)
//! - `SELAM_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//! - `SELAM_ALLOW_PLACEHOLDER_TOKEN` - Synthesize a local token when the backend
//!   omits one at login (default: true)
//! - `SELAM_STRICT_TRANSITIONS` - Enforce the status workflow graph client-side
//!   (default: false)
//! - `SELAM_LOG_JSON` - Emit JSON logs instead of text (default: false)
//!
//! ## Optional (Sentry)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)

use std::path::PathBuf;
use std::time::Duration;

use selam_core::TransitionPolicy;
use thiserror::Error;
use url::Url;

/// Default backend base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Name of the persisted token slot.
pub const TOKEN_FILE_NAME: &str = "auth_token";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Could not determine a data directory for {0}; set SELAM_TOKEN_PATH")]
    NoDataDir(&'static str),
}

/// Admin client configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Backend REST API base URL (no trailing slash)
    pub api_base_url: Url,
    /// Where the `auth_token` slot lives on disk
    pub token_path: PathBuf,
    /// Per-request timeout
    pub http_timeout: Duration,
    /// Whether a tokenless login may fall back to a synthesized token
    pub allow_placeholder_token: bool,
    /// Client-side status transition checking
    pub transition_policy: TransitionPolicy,
    /// Emit JSON logs
    pub log_json: bool,
    /// Sentry configuration (optional)
    pub sentry: Option<SentryConfig>,
}

/// Sentry error tracking configuration.
///
/// Implements `Debug` manually because the DSN embeds the project key.
#[derive(Clone)]
pub struct SentryConfig {
    /// Sentry DSN
    pub dsn: String,
    /// Environment (e.g., "development", "production")
    pub environment: Option<String>,
    /// Error sample rate (0.0 to 1.0)
    pub sample_rate: f32,
}

impl std::fmt::Debug for SentryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentryConfig")
            .field("dsn", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("sample_rate", &self.sample_rate)
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if no
    /// token location can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AdminConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = parse_base_url(
            &lookup("SELAM_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        )?;

        let token_path = match lookup("SELAM_TOKEN_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_token_path()?,
        };

        let http_timeout = lookup("SELAM_HTTP_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("SELAM_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
                })
            })
            .transpose()?
            .map_or(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS), Duration::from_secs);

        let allow_placeholder_token =
            parse_bool(&lookup, "SELAM_ALLOW_PLACEHOLDER_TOKEN", true)?;
        let transition_policy = if parse_bool(&lookup, "SELAM_STRICT_TRANSITIONS", false)? {
            TransitionPolicy::Strict
        } else {
            TransitionPolicy::Permissive
        };
        let log_json = parse_bool(&lookup, "SELAM_LOG_JSON", false)?;

        let sample_rate = lookup("SENTRY_SAMPLE_RATE")
            .map(|raw| parse_sample_rate(&raw))
            .transpose()?
            .unwrap_or(1.0);
        let sentry = lookup("SENTRY_DSN").map(|dsn| SentryConfig {
            dsn,
            environment: lookup("SENTRY_ENVIRONMENT"),
            sample_rate,
        });

        Ok(Self {
            api_base_url,
            token_path,
            http_timeout,
            allow_placeholder_token,
            transition_policy,
            log_json,
            sentry,
        })
    }

    /// Returns a reference to the Sentry configuration (if configured).
    #[must_use]
    pub const fn sentry(&self) -> Option<&SentryConfig> {
        self.sentry.as_ref()
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidEnvVar("SELAM_API_BASE_URL".to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "SELAM_API_BASE_URL".to_string(),
            format!("unsupported scheme: {}", url.scheme()),
        ));
    }
    Ok(url)
}

fn parse_sample_rate(raw: &str) -> Result<f32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("SENTRY_SAMPLE_RATE".to_string(), reason);
    let rate: f32 = raw.trim().parse().map_err(|e: std::num::ParseFloatError| invalid(e.to_string()))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(invalid(format!("expected 0.0 to 1.0, got {rate}")))
    }
}

fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got {other:?}"),
        )),
    }
}

fn default_token_path() -> Result<PathBuf, ConfigError> {
    let mut path = dirs::data_dir().ok_or(ConfigError::NoDataDir(TOKEN_FILE_NAME))?;
    path.push("selam");
    path.push(TOKEN_FILE_NAME);
    Ok(path)
}
