//! Contact form submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use selam_core::{AdminUserId, MessageId, MessageStatus};

use super::serde_helpers::{lenient_datetime, lenient_status, null_as_default};

/// A message left through the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: MessageId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: MessageStatus,
    #[serde(default)]
    pub handled_by_id: Option<AdminUserId>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub handled_at: Option<DateTime<Utc>>,
}

impl ContactMessage {
    /// Whether the message still needs attention.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.status, MessageStatus::New | MessageStatus::InProgress)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_and_open() {
        let msg: ContactMessage = serde_json::from_value(json!({
            "id": "m-1",
            "name": "Abebe",
            "email": "abebe@example.com",
            "subject": "Pricing",
            "message": "How much?",
            "status": "NEW",
            "handledAt": null
        }))
        .unwrap();
        assert!(msg.is_open());
        assert!(msg.handled_at.is_none());

        let resolved = ContactMessage {
            status: MessageStatus::Resolved,
            ..msg
        };
        assert!(!resolved.is_open());
    }

    #[test]
    fn test_null_status_is_new() {
        let msg: ContactMessage =
            serde_json::from_value(json!({"id": "m-2", "status": null, "name": null})).unwrap();
        assert_eq!(msg.status, MessageStatus::New);
        assert!(msg.name.is_empty());
    }
}
