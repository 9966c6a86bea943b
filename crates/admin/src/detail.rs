//! Read-only detail view of the selected record.
//!
//! The view borrows the record from its controller; mutations go through the
//! controller, which keeps the selection fresh.

use selam_core::{TransitionPolicy, Workflow};

use crate::controllers::{HasStatus, ListController, Resource};
use crate::models::{ContactMessage, JobApplication, JobPosting, Product};

/// A record that can be shown as a detail card.
pub trait Detail: Resource {
    /// Card heading.
    fn heading(&self) -> String;

    /// Labelled fields in display order. Empty values are kept so the card
    /// layout does not shift between records.
    fn fields(&self) -> Vec<(&'static str, String)>;
}

/// One entry of the status picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOption<S> {
    pub status: S,
    pub label: &'static str,
    /// The record is currently in this status.
    pub current: bool,
    /// The active policy allows moving here.
    pub available: bool,
}

/// The selected record of one controller.
#[derive(Debug, Clone, Copy)]
pub struct DetailView<'a, R> {
    record: &'a R,
    policy: TransitionPolicy,
}

impl<'a, R: Detail> DetailView<'a, R> {
    /// View of `controller`'s selection, if any.
    #[must_use]
    pub fn of(controller: &'a ListController<R>) -> Option<Self> {
        controller.selected().map(|record| Self {
            record,
            policy: controller.policy(),
        })
    }

    #[must_use]
    pub const fn record(&self) -> &'a R {
        self.record
    }

    #[must_use]
    pub fn heading(&self) -> String {
        self.record.heading()
    }

    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        self.record.fields()
    }
}

impl<R: Detail + HasStatus> DetailView<'_, R> {
    /// Display label of the current status.
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        self.record.status().label()
    }

    /// Every status of the record's family, marked current/available.
    #[must_use]
    pub fn status_options(&self) -> Vec<StatusOption<R::Status>> {
        let current = self.record.status();
        <R::Status as Workflow>::all()
            .iter()
            .map(|&status| StatusOption {
                status,
                label: status.label(),
                current: status == current,
                available: current.can_transition_to(status, self.policy),
            })
            .collect()
    }
}

fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_owned()
}

fn date(value: Option<chrono::DateTime<chrono::Utc>>) -> String {
    value.map_or_else(|| "-".to_owned(), |d| d.format("%Y-%m-%d %H:%M").to_string())
}

impl Detail for JobPosting {
    fn heading(&self) -> String {
        self.title.clone()
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Department", self.department.clone()),
            ("Location", self.location.clone()),
            ("Type", self.employment_type.clone()),
            ("Compensation", or_dash(Some(self.compensation_range.as_str()))),
            ("Status", self.publication_state().label().to_owned()),
            ("Publish at", date(self.publish_at)),
            ("Close at", date(self.close_at)),
            ("Description", self.description.clone()),
            ("Requirements", self.requirements.join("\n")),
            ("Responsibilities", self.responsibilities.join("\n")),
        ]
    }
}

impl Detail for JobApplication {
    fn heading(&self) -> String {
        self.candidate_name.clone()
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Job", self.job_id.to_string()),
            ("Email", self.candidate_email.clone()),
            ("Phone", or_dash(self.candidate_phone.as_deref())),
            ("Status", self.status.label().to_owned()),
            ("Resume", or_dash(self.resume_url.as_deref())),
            ("LinkedIn", or_dash(self.linkedin_url.as_deref())),
            ("Portfolio", or_dash(self.portfolio_url.as_deref())),
            ("Reviewed at", date(self.reviewed_at)),
            ("Cover letter", self.cover_letter.clone()),
        ]
    }
}

impl Detail for Product {
    fn heading(&self) -> String {
        self.name.clone()
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Slug", self.slug.to_string()),
            ("Category", self.category.clone()),
            ("Status", self.status.label().to_owned()),
            ("Price model", or_dash(Some(self.price_model.as_str()))),
            ("Rating", format!("{:.1}", self.display_rating())),
            ("Users", self.users_count.to_string()),
            ("Summary", self.short_description.clone()),
            ("Description", self.long_description.clone()),
            ("Features", self.features.join("\n")),
        ]
    }
}

impl Detail for ContactMessage {
    fn heading(&self) -> String {
        self.subject.clone()
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("From", format!("{} <{}>", self.name, self.email)),
            ("Status", self.status.label().to_owned()),
            ("Handled at", date(self.handled_at)),
            ("Message", self.message.clone()),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use selam_core::ApplicationStatus;

    use super::*;
    use crate::api::ApiClient;
    use crate::notifications::Notifier;

    #[tokio::test]
    async fn test_status_options_follow_policy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/applications/applications"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": [
                {"id": "app-1", "jobId": "j-1", "candidateName": "Liya", "status": "SUBMITTED"}
            ]})))
            .mount(&server)
            .await;

        let base = Url::parse(&format!("{}/api/v1", server.uri())).unwrap();
        let client = ApiClient::new(base, Duration::from_secs(5)).unwrap();
        let mut apps: ListController<JobApplication> =
            ListController::new(client, Notifier::new(), TransitionPolicy::Strict);
        apps.load().await.unwrap();
        assert!(DetailView::of(&apps).is_none());

        apps.select("app-1").unwrap();
        let view = DetailView::of(&apps).unwrap();
        assert_eq!(view.heading(), "Liya");
        assert_eq!(view.status_label(), "Submitted");

        let options = view.status_options();
        assert_eq!(options.len(), ApplicationStatus::all().len());
        let hired = options
            .iter()
            .find(|o| o.status == ApplicationStatus::Hired)
            .unwrap();
        assert!(!hired.available);
        assert!(options.iter().any(|o| o.current && o.available));
    }

    #[test]
    fn test_phone_placeholder() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some("+251")), "+251");
    }
}
