//! Backend audit trail entries (read-only).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::serde_helpers::{lenient_datetime, null_as_default};

/// One recorded admin action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub actor_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entity_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entity_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_with_metadata() {
        let entry: AuditLog = serde_json::from_value(json!({
            "actorId": "u-1",
            "entityType": "JOB",
            "entityId": "j-1",
            "action": "PUBLISH",
            "metadata": {"publish": true},
            "createdAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(entry.action, "PUBLISH");
        assert_eq!(entry.metadata["publish"], json!(true));
        assert!(entry.created_at.is_some());
    }

    #[test]
    fn test_null_metadata() {
        let entry: AuditLog =
            serde_json::from_value(json!({"entityType": "PRODUCT", "metadata": null})).unwrap();
        assert!(entry.metadata.is_empty());
        assert!(entry.actor_id.is_none());
    }
}
