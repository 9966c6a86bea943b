//! Job application endpoints.
//!
//! The backend nests these under `/applications/applications`.

use tracing::instrument;

use selam_core::{ApplicationId, ApplicationStatus};

use super::{ApiClient, ApiError, Envelope, StatusRequest};
use crate::models::JobApplication;

const BASE: [&str; 2] = ["applications", "applications"];

impl ApiClient {
    /// List every application.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self))]
    pub async fn list_applications(&self) -> Result<Envelope<Vec<JobApplication>>, ApiError> {
        self.get(&BASE).await
    }

    /// Fetch one application.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self), fields(application_id = %id))]
    pub async fn get_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Envelope<JobApplication>, ApiError> {
        self.get(&[BASE[0], BASE[1], id.as_str()]).await
    }

    /// Move an application to `status` (`PATCH .../:id` with `{status}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self), fields(application_id = %id, %status))]
    pub async fn update_application_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Envelope<JobApplication>, ApiError> {
        let body = StatusRequest {
            status,
            handler_id: None,
        };
        self.patch(&[BASE[0], BASE[1], id.as_str()], &body).await
    }
}
