//! Job postings: create, edit, publish, archive.

use std::borrow::Cow;

use tracing::instrument;

use selam_core::JobId;

use super::{ListController, Resource};
use crate::api::{ApiClient, ApiError, Envelope};
use crate::error::AppError;
use crate::models::{JobDraft, JobPatch, JobPosting};

impl Resource for JobPosting {
    const NAME: &'static str = "job";
    const COLLECTION: &'static str = "jobs";
    const FACETS: &'static [&'static str] = &["status", "department", "type"];

    fn key(&self) -> &str {
        self.id.as_str()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.department.as_str(),
            self.location.as_str(),
        ]
    }

    fn facet(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "status" => Some(Cow::Borrowed(self.publication_state().as_str())),
            "department" => Some(Cow::Borrowed(self.department.as_str())),
            "type" => Some(Cow::Borrowed(self.employment_type.as_str())),
            _ => None,
        }
    }

    async fn fetch_all(client: &ApiClient) -> Result<Envelope<Vec<Self>>, ApiError> {
        client.list_jobs().await
    }
}

impl ListController<JobPosting> {
    /// Create a posting. Title, department and location are required.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request, or the request failure.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create(&mut self, draft: JobDraft) -> Result<(), AppError> {
        self.validate("create job", &draft)?;
        let result = self.client().create_job(&draft).await;
        self.accept("create job", result)?;

        self.succeed("Job created successfully");
        let _ = self.load().await;
        Ok(())
    }

    /// Partially update a posting (`PATCH`).
    ///
    /// # Errors
    ///
    /// Returns the request failure after notifying.
    #[instrument(skip(self, patch))]
    pub async fn update(&mut self, id: &JobId, patch: JobPatch) -> Result<(), AppError> {
        if let Some(title) = &patch.title {
            self.require("update job", &[("title", title.as_str())])?;
        }
        let result = self.client().patch_job(id, &patch).await;
        self.accept("update job", result)?;

        self.succeed("Job updated successfully");
        self.refresh_after(id.as_str()).await;
        Ok(())
    }

    /// Replace a posting wholesale (`PUT`).
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request, or the request failure.
    #[instrument(skip(self, draft))]
    pub async fn replace(&mut self, id: &JobId, draft: JobDraft) -> Result<(), AppError> {
        self.validate("update job", &draft)?;
        let result = self.client().update_job(id, &draft).await;
        self.accept("update job", result)?;

        self.succeed("Job updated successfully");
        self.refresh_after(id.as_str()).await;
        Ok(())
    }

    /// Publish or unpublish a posting.
    ///
    /// # Errors
    ///
    /// Returns the request failure after notifying.
    #[instrument(skip(self))]
    pub async fn publish(&mut self, id: &JobId, publish: bool) -> Result<(), AppError> {
        let action = if publish { "publish job" } else { "unpublish job" };
        let result = self.client().publish_job(id, publish).await;
        self.accept(action, result)?;

        self.succeed(if publish {
            "Job published successfully"
        } else {
            "Job unpublished successfully"
        });
        self.refresh_after(id.as_str()).await;
        Ok(())
    }

    /// Archive a posting and close its detail view. The backend keeps the
    /// record with `isArchived`.
    ///
    /// # Errors
    ///
    /// Returns the request failure after notifying; the collection is unchanged.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: &JobId) -> Result<(), AppError> {
        let result = self.client().delete_job(id).await;
        self.accept("archive job", result)?;

        self.succeed("Job archived successfully");
        self.deselect(id.as_str());
        let _ = self.load().await;
        Ok(())
    }

    /// Distinct departments, for the department facet.
    #[must_use]
    pub fn departments(&self) -> Vec<&str> {
        let mut departments: Vec<&str> = self
            .items()
            .iter()
            .map(|job| job.department.as_str())
            .filter(|d| !d.is_empty())
            .collect();
        departments.sort_unstable();
        departments.dedup();
        departments
    }

    fn validate(&self, action: &str, draft: &JobDraft) -> Result<(), AppError> {
        self.require(
            action,
            &[
                ("title", draft.title.as_str()),
                ("department", draft.department.as_str()),
                ("location", draft.location.as_str()),
            ],
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use selam_core::{PublicationState, TransitionPolicy};

    use super::super::ListFilter;
    use super::super::test_support::controller;
    use super::*;
    use crate::notifications::Variant;

    fn jobs_body() -> serde_json::Value {
        json!({"success": true, "data": [
            {"id": "j-1", "title": "Backend Engineer", "department": "Engineering",
             "location": "Remote", "employmentType": "Full-time", "isPublished": true},
            {"id": "j-2", "title": "Product Designer", "department": "Design",
             "location": "Addis Ababa", "employmentType": "Contract"},
            {"id": "j-3", "title": "Old Role", "department": "Engineering",
             "location": "Nairobi", "isPublished": true, "isArchived": true}
        ]})
    }

    #[tokio::test]
    async fn test_load_and_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jobs_body()))
            .mount(&server)
            .await;

        let mut jobs = controller::<JobPosting>(&server, TransitionPolicy::Permissive);
        assert_eq!(jobs.load().await.unwrap(), 3);

        let published = jobs.filter(&ListFilter::new().facet("status", "published"));
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].publication_state(), PublicationState::Published);

        let search = jobs.filter(&ListFilter::new().term("ADDIS"));
        assert_eq!(search.len(), 1);
        assert_eq!(search[0].id.as_str(), "j-2");

        let engineering = jobs.filter(
            &ListFilter::new()
                .facet("department", "Engineering")
                .facet("type", "all"),
        );
        assert_eq!(engineering.len(), 2);

        assert_eq!(jobs.departments(), vec!["Design", "Engineering"]);
    }

    #[tokio::test]
    async fn test_create_requires_fields_before_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut jobs = controller::<JobPosting>(&server, TransitionPolicy::Permissive);
        let draft = JobDraft {
            title: "Designer".to_string(),
            ..JobDraft::default()
        };
        let err = jobs.create(draft).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("department")));
        assert_eq!(jobs.notifier().count(Variant::Destructive), 1);
    }

    #[tokio::test]
    async fn test_publish_refreshes_selection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jobs_body()))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/jobs/j-2/publish"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": [
                {"id": "j-2", "title": "Product Designer", "department": "Design",
                 "location": "Addis Ababa", "isPublished": true}
            ]})))
            .mount(&server)
            .await;

        let mut jobs = controller::<JobPosting>(&server, TransitionPolicy::Permissive);
        jobs.load().await.unwrap();
        jobs.select("j-2").unwrap();
        assert_eq!(
            jobs.selected().unwrap().publication_state(),
            PublicationState::Draft
        );

        jobs.publish(&JobId::new("j-2"), true).await.unwrap();
        assert_eq!(
            jobs.selected().unwrap().publication_state(),
            PublicationState::Published
        );
        assert_eq!(jobs.items().len(), 1);
        assert_eq!(jobs.notifier().count(Variant::Success), 1);
    }

    #[tokio::test]
    async fn test_archive_closes_selection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jobs_body()))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/jobs/j-2"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let mut jobs = controller::<JobPosting>(&server, TransitionPolicy::Permissive);
        jobs.load().await.unwrap();
        jobs.select("j-2").unwrap();

        jobs.delete(&JobId::new("j-2")).await.unwrap();
        assert!(jobs.selected().is_none());
        assert_eq!(jobs.items().len(), 3);
    }
}
