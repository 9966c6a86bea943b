//! CLI error type.

use std::io;

use selam_admin::AppError;
use thiserror::Error;

/// Errors surfaced by a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// An admin operation failed.
    #[error(transparent)]
    App(#[from] AppError),

    /// Output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No session could be restored.
    #[error("Not signed in")]
    NotSignedIn,

    /// Login was refused.
    #[error("Invalid email or password")]
    LoginRefused,
}

impl CliError {
    /// Message shown to the operator.
    pub fn user_message(&self) -> String {
        match self {
            Self::App(e) => e.user_message(),
            Self::Io(e) => format!("could not write output: {e}"),
            Self::NotSignedIn => "not signed in; run `selam login` first".to_string(),
            Self::LoginRefused => "invalid email or password".to_string(),
        }
    }
}

impl From<selam_admin::ApiError> for CliError {
    fn from(e: selam_admin::ApiError) -> Self {
        Self::App(AppError::Api(e))
    }
}
