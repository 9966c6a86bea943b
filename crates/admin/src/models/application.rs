//! Job applications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use selam_core::{AdminUserId, ApplicationId, ApplicationStatus, JobId};

use super::serde_helpers::{blank_as_none, lenient_datetime, lenient_status, null_as_default};

/// A candidate's application to a posting. Only the status is mutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: ApplicationId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_id: JobId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub candidate_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub candidate_email: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub candidate_phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover_letter: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub resume_url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub portfolio_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub reviewer_id: Option<AdminUserId>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_application() {
        let app: JobApplication = serde_json::from_value(json!({
            "id": "app-1",
            "jobId": "job-7",
            "candidateName": "Liya Haile",
            "candidateEmail": "liya@example.com",
            "candidatePhone": "",
            "coverLetter": "Hello",
            "resumeUrl": "https://cdn.example/cv.pdf",
            "status": "IN_REVIEW",
            "reviewerId": null
        }))
        .unwrap();

        assert_eq!(app.id.as_str(), "app-1");
        assert_eq!(app.job_id.as_str(), "job-7");
        assert_eq!(app.status, ApplicationStatus::InReview);
        assert!(app.candidate_phone.is_none());
        assert!(app.linkedin_url.is_none());
        assert!(app.reviewer_id.is_none());
    }

    #[test]
    fn test_null_fields_do_not_sink_the_list() {
        let apps: Vec<JobApplication> = serde_json::from_value(json!([
            {"id": "app-1", "jobId": "job-7", "status": "HIRED"},
            {"id": "app-2", "jobId": null, "status": null, "candidateName": null}
        ]))
        .unwrap();

        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].status, ApplicationStatus::Hired);
        assert_eq!(apps[1].status, ApplicationStatus::Submitted);
        assert_eq!(apps[1].job_id.as_str(), "");
        assert!(apps[1].candidate_name.is_empty());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let result = serde_json::from_value::<JobApplication>(json!({
            "jobId": "job-7",
            "status": "SUBMITTED"
        }));
        assert!(result.is_err());
    }
}
