//! Contact message triage.

use std::borrow::Cow;

use tracing::instrument;

use selam_core::{AdminUserId, MessageId, MessageStatus, Workflow};

use super::{HasStatus, ListController, Resource};
use crate::api::{ApiClient, ApiError, Envelope};
use crate::error::AppError;
use crate::models::ContactMessage;

impl Resource for ContactMessage {
    const NAME: &'static str = "message";
    const COLLECTION: &'static str = "messages";
    const FACETS: &'static [&'static str] = &["status"];

    fn key(&self) -> &str {
        self.id.as_str()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.subject.as_str(),
            self.message.as_str(),
        ]
    }

    fn facet(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            _ => None,
        }
    }

    async fn fetch_all(client: &ApiClient) -> Result<Envelope<Vec<Self>>, ApiError> {
        client.list_contact_messages().await
    }
}

impl HasStatus for ContactMessage {
    type Status = MessageStatus;

    fn status(&self) -> MessageStatus {
        self.status
    }

    fn set_status(&mut self, status: MessageStatus) {
        self.status = status;
    }
}

impl ListController<ContactMessage> {
    /// Change a message's status, recording `handler` as the handler if given.
    ///
    /// # Errors
    ///
    /// Returns a validation error under a strict policy, or the request failure.
    #[instrument(skip(self))]
    pub async fn update_status(
        &mut self,
        id: &MessageId,
        status: MessageStatus,
        handler: Option<&AdminUserId>,
    ) -> Result<(), AppError> {
        self.check_transition(id.as_str(), status)?;
        let result = self
            .client()
            .update_contact_message_status(id, status, handler)
            .await;
        self.accept("update message status", result)?;

        self.succeed(format!("Message marked as {}", status.label()));
        self.refresh_status(id.as_str(), status).await;
        Ok(())
    }

    /// Messages still needing attention.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.items().iter().filter(|m| m.is_open()).count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use selam_core::TransitionPolicy;

    use super::super::ListFilter;
    use super::super::test_support::controller;
    use super::*;

    #[tokio::test]
    async fn test_resolve_with_handler() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/contact/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": [
                {"id": "m-1", "name": "Abebe", "email": "abebe@example.com",
                 "subject": "Pricing", "message": "Do you offer discounts?", "status": "NEW"},
                {"id": "m-2", "name": "Sara", "email": "sara@example.com",
                 "subject": "Bug", "message": "Login fails", "status": "RESOLVED"}
            ]})))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/v1/contact/messages/m-1/status"))
            .and(body_json(json!({"status": "RESOLVED", "handlerId": "adm-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let mut messages = controller::<ContactMessage>(&server, TransitionPolicy::Permissive);
        messages.load().await.unwrap();
        assert_eq!(messages.open_count(), 1);
        assert_eq!(messages.filter(&ListFilter::new().term("discount")).len(), 1);

        messages
            .update_status(
                &MessageId::new("m-1"),
                MessageStatus::Resolved,
                Some(&AdminUserId::new("adm-1")),
            )
            .await
            .unwrap();
    }
}
