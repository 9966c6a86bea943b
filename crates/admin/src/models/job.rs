//! Job postings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use selam_core::{JobId, PublicationState};

use super::serde_helpers::{lenient_datetime, null_as_default};

/// A job posting as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: JobId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub department: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub employment_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requirements: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub responsibilities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub compensation_range: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_published: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_archived: bool,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub publish_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub close_at: Option<DateTime<Utc>>,
}

impl JobPosting {
    /// Draft / Published / Archived.
    #[must_use]
    pub const fn publication_state(&self) -> PublicationState {
        PublicationState::from_flags(self.is_published, self.is_archived)
    }
}

/// Body for creating a posting (`POST /jobs`) or replacing one (`PUT /jobs/:id`).
///
/// The backend assigns `id` and owns `isArchived`, so neither is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub compensation_range: String,
    pub is_published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_at: Option<DateTime<Utc>>,
}

impl From<&JobPosting> for JobDraft {
    fn from(job: &JobPosting) -> Self {
        Self {
            title: job.title.clone(),
            department: job.department.clone(),
            location: job.location.clone(),
            employment_type: job.employment_type.clone(),
            description: job.description.clone(),
            requirements: job.requirements.clone(),
            responsibilities: job.responsibilities.clone(),
            compensation_range: job.compensation_range.clone(),
            is_published: job.is_published,
            publish_at: job.publish_at,
            close_at: job.close_at,
        }
    }
}

/// Partial update (`PATCH /jobs/:id`). Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compensation_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_at: Option<DateTime<Utc>>,
}

impl JobPatch {
    /// Whether the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the patch to a local copy (used when previewing an edit).
    pub fn apply_to(&self, job: &mut JobPosting) {
        macro_rules! set {
            ($($field:ident),*) => {
                $(if let Some(value) = &self.$field {
                    job.$field = value.clone();
                })*
            };
        }
        set!(
            title,
            department,
            location,
            employment_type,
            description,
            requirements,
            responsibilities,
            compensation_range
        );
        if self.publish_at.is_some() {
            job.publish_at = self.publish_at;
        }
        if self.close_at.is_some() {
            job.close_at = self.close_at;
        }
    }
}
