//! Admin user profile returned by the auth endpoints.

use serde::{Deserialize, Serialize};

use selam_core::{AdminUserId, Email};

use super::serde_helpers::null_as_default;

/// The signed-in staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    /// Backend ID, when the profile endpoint includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AdminUserId>,
    /// Login email.
    pub email: Email,
    /// Name shown in the shell header.
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    /// Backend role string (e.g. `ADMIN`). Not interpreted client-side.
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    /// Whether the account is enabled.
    #[serde(default)]
    pub is_active: bool,
}

impl AdminUser {
    /// Two-letter initials for avatars, falling back to the email.
    #[must_use]
    pub fn initials(&self) -> String {
        let from_name: String = self
            .display_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect();

        if from_name.is_empty() {
            self.email.as_str().chars().take(2).collect()
        } else {
            from_name
        }
        .to_uppercase()
    }
}
