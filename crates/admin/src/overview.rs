//! Summary statistics for the overview page.

use selam_core::{ApplicationStatus, ProductStatus, PublicationState, Workflow};

use crate::models::{ContactMessage, JobApplication, JobPosting, Product};

/// Counts derived from the loaded collections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverviewStats {
    pub active_jobs: usize,
    pub draft_jobs: usize,
    pub archived_jobs: usize,
    pub total_applicants: usize,
    /// Every application status in display order, zeros included.
    pub applicants_by_status: Vec<(ApplicationStatus, usize)>,
    pub total_products: usize,
    pub products_by_status: Vec<(ProductStatus, usize)>,
    pub open_messages: usize,
    pub total_messages: usize,
}

impl OverviewStats {
    #[must_use]
    pub fn compute(
        jobs: &[JobPosting],
        applications: &[JobApplication],
        products: &[Product],
        messages: &[ContactMessage],
    ) -> Self {
        let jobs_in = |state: PublicationState| {
            jobs.iter()
                .filter(|j| j.publication_state() == state)
                .count()
        };

        Self {
            active_jobs: jobs_in(PublicationState::Published),
            draft_jobs: jobs_in(PublicationState::Draft),
            archived_jobs: jobs_in(PublicationState::Archived),
            total_applicants: applications.len(),
            applicants_by_status: ApplicationStatus::all()
                .iter()
                .map(|&s| (s, applications.iter().filter(|a| a.status == s).count()))
                .collect(),
            total_products: products.iter().filter(|p| !p.is_archived).count(),
            products_by_status: ProductStatus::all()
                .iter()
                .map(|&s| {
                    let count = products
                        .iter()
                        .filter(|p| !p.is_archived && p.status == s)
                        .count();
                    (s, count)
                })
                .collect(),
            open_messages: messages.iter().filter(|m| m.is_open()).count(),
            total_messages: messages.len(),
        }
    }

    /// Applicants currently in `status`.
    #[must_use]
    pub fn applicants_in(&self, status: ApplicationStatus) -> usize {
        self.applicants_by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_compute() {
        let jobs: Vec<JobPosting> = serde_json::from_value(json!([
            {"id": "j-1", "title": "A", "isPublished": true},
            {"id": "j-2", "title": "B"},
            {"id": "j-3", "title": "C", "isPublished": true, "isArchived": true}
        ]))
        .unwrap();
        let apps: Vec<JobApplication> = serde_json::from_value(json!([
            {"id": "a-1", "jobId": "j-1", "status": "SUBMITTED"},
            {"id": "a-2", "jobId": "j-1", "status": "HIRED"},
            {"id": "a-3", "jobId": "j-1", "status": "SUBMITTED"}
        ]))
        .unwrap();
        let products: Vec<Product> = serde_json::from_value(json!([
            {"slug": "p", "name": "P", "status": "ACTIVE"},
            {"slug": "q", "name": "Q", "status": "ACTIVE", "isArchived": true}
        ]))
        .unwrap();
        let messages: Vec<ContactMessage> = serde_json::from_value(json!([
            {"id": "m-1", "status": "NEW"},
            {"id": "m-2", "status": "DISMISSED"}
        ]))
        .unwrap();

        let stats = OverviewStats::compute(&jobs, &apps, &products, &messages);
        assert_eq!(stats.active_jobs, 1);
        assert_eq!(stats.draft_jobs, 1);
        assert_eq!(stats.archived_jobs, 1);
        assert_eq!(stats.total_applicants, 3);
        assert_eq!(stats.applicants_in(ApplicationStatus::Submitted), 2);
        assert_eq!(stats.applicants_in(ApplicationStatus::Withdrawn), 0);
        assert_eq!(stats.total_products, 1);
        assert_eq!(stats.open_messages, 1);
        assert_eq!(stats.total_messages, 2);
    }
}
