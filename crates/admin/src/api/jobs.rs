//! Job posting endpoints.

use serde_json::Value;
use tracing::instrument;

use selam_core::JobId;

use super::{ApiClient, ApiError, Envelope, PublishRequest};
use crate::models::{JobDraft, JobPatch, JobPosting};

impl ApiClient {
    /// List every posting, archived ones included (`GET /jobs`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self))]
    pub async fn list_jobs(&self) -> Result<Envelope<Vec<JobPosting>>, ApiError> {
        self.get(&["jobs"]).await
    }

    /// Fetch one posting (`GET /jobs/:id`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self), fields(job_id = %id))]
    pub async fn get_job(&self, id: &JobId) -> Result<Envelope<JobPosting>, ApiError> {
        self.get(&["jobs", id.as_str()]).await
    }

    /// Create a posting (`POST /jobs`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_job(&self, draft: &JobDraft) -> Result<Envelope<JobPosting>, ApiError> {
        self.post(&["jobs"], draft).await
    }

    /// Replace a posting (`PUT /jobs/:id`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self, draft), fields(job_id = %id))]
    pub async fn update_job(
        &self,
        id: &JobId,
        draft: &JobDraft,
    ) -> Result<Envelope<JobPosting>, ApiError> {
        self.put(&["jobs", id.as_str()], draft).await
    }

    /// Partially update a posting (`PATCH /jobs/:id`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self, patch), fields(job_id = %id))]
    pub async fn patch_job(
        &self,
        id: &JobId,
        patch: &JobPatch,
    ) -> Result<Envelope<JobPosting>, ApiError> {
        self.patch(&["jobs", id.as_str()], patch).await
    }

    /// Archive a posting (`DELETE /jobs/:id`). The backend soft-deletes.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self), fields(job_id = %id))]
    pub async fn delete_job(&self, id: &JobId) -> Result<Envelope<Value>, ApiError> {
        self.delete(&["jobs", id.as_str()]).await
    }

    /// Publish or unpublish a posting (`POST /jobs/:id/publish`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self), fields(job_id = %id))]
    pub async fn publish_job(
        &self,
        id: &JobId,
        publish: bool,
    ) -> Result<Envelope<JobPosting>, ApiError> {
        self.post(&["jobs", id.as_str(), "publish"], &PublishRequest { publish })
            .await
    }
}
