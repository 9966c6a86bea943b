//! Applicant tracking: review status changes only.

use std::borrow::Cow;

use tracing::instrument;

use selam_core::{ApplicationId, ApplicationStatus, Workflow};

use super::{HasStatus, ListController, Resource};
use crate::api::{ApiClient, ApiError, Envelope};
use crate::error::AppError;
use crate::models::JobApplication;

impl Resource for JobApplication {
    const NAME: &'static str = "application";
    const COLLECTION: &'static str = "applications";
    const FACETS: &'static [&'static str] = &["status", "job"];

    fn key(&self) -> &str {
        self.id.as_str()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.candidate_name.as_str(),
            self.candidate_email.as_str(),
            self.job_id.as_str(),
        ]
    }

    fn facet(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "job" => Some(Cow::Borrowed(self.job_id.as_str())),
            _ => None,
        }
    }

    async fn fetch_all(client: &ApiClient) -> Result<Envelope<Vec<Self>>, ApiError> {
        client.list_applications().await
    }
}

impl HasStatus for JobApplication {
    type Status = ApplicationStatus;

    fn status(&self) -> ApplicationStatus {
        self.status
    }

    fn set_status(&mut self, status: ApplicationStatus) {
        self.status = status;
    }
}

impl ListController<JobApplication> {
    /// Move an application to `status`, then reload.
    ///
    /// Re-applying the current status is harmless: the same request is sent
    /// and the outcome is the same.
    ///
    /// # Errors
    ///
    /// Returns a validation error under a strict policy, or the request failure.
    #[instrument(skip(self))]
    pub async fn update_status(
        &mut self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), AppError> {
        self.check_transition(id.as_str(), status)?;
        let result = self.client().update_application_status(id, status).await;
        self.accept("update application status", result)?;

        self.succeed(format!("Application status updated to {}", status.label()));
        self.refresh_status(id.as_str(), status).await;
        Ok(())
    }

    /// Number of loaded applications in `status`.
    #[must_use]
    pub fn count_with(&self, status: ApplicationStatus) -> usize {
        self.items().iter().filter(|a| a.status == status).count()
    }
}
