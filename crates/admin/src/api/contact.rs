//! Contact message endpoints.

use tracing::instrument;

use selam_core::{AdminUserId, MessageId, MessageStatus};

use super::{ApiClient, ApiError, Envelope, StatusRequest};
use crate::models::ContactMessage;

impl ApiClient {
    /// List every contact message (`GET /contact/messages`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self))]
    pub async fn list_contact_messages(&self) -> Result<Envelope<Vec<ContactMessage>>, ApiError> {
        self.get(&["contact", "messages"]).await
    }

    /// Fetch one message (`GET /contact/messages/:id`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self), fields(message_id = %id))]
    pub async fn get_contact_message(
        &self,
        id: &MessageId,
    ) -> Result<Envelope<ContactMessage>, ApiError> {
        self.get(&["contact", "messages", id.as_str()]).await
    }

    /// Change a message's handling status, optionally recording who handled it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self), fields(message_id = %id, %status))]
    pub async fn update_contact_message_status(
        &self,
        id: &MessageId,
        status: MessageStatus,
        handler_id: Option<&AdminUserId>,
    ) -> Result<Envelope<ContactMessage>, ApiError> {
        let body = StatusRequest {
            status,
            handler_id: handler_id.map(|h| h.as_str().to_owned()),
        };
        self.patch(&["contact", "messages", id.as_str(), "status"], &body)
            .await
    }
}
