//! Contact message endpoints.

use serde::Serialize;
use tracing::{debug, instrument};

use storedesk_core::MessageId;

use super::types::decode_list;
use super::{ApiError, BackendClient};
use crate::models::Message;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_content: &'a str,
}

impl BackendClient {
    /// Fetch every contact message.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self))]
    pub async fn get_messages(&self) -> Result<Vec<Message>, ApiError> {
        let body = self.get_json("/api/messages").await?;
        let messages: Vec<Message> = decode_list(body, "messages");
        debug!(count = messages.len(), "Fetched messages");
        Ok(messages)
    }

    /// Send a reply to a message. The backend emails it to the sender.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self, reply), fields(message_id = %id, reply_len = reply.len()))]
    pub async fn post_reply(&self, id: MessageId, reply: &str) -> Result<(), ApiError> {
        let request = self
            .http()
            .post(self.url(&format!("/api/messages/{id}/reply"))?)
            .json(&ReplyRequest {
                reply_content: reply,
            });
        self.send_empty(request).await?;
        debug!("Reply sent");
        Ok(())
    }
}
