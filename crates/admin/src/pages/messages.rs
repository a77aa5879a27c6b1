//! Contact messages and the reply surface.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, instrument};

use storedesk_core::MessageId;

use crate::backend::AdminApi;
use crate::models::Message;
use crate::view::{
    DispatchError, ListController, LoadOutcome, NoFilter, ReplyState, ValidationError,
    ViewController, ViewState, project,
};

/// Messages page controller.
pub struct MessagesPage {
    api: Arc<dyn AdminApi>,
    messages: ListController<Message>,
    reply: RwLock<ReplyState>,
}

impl MessagesPage {
    #[must_use]
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            api,
            messages: ViewController::new("messages"),
            reply: RwLock::new(ReplyState::Closed),
        }
    }

    pub async fn mount(&self) -> LoadOutcome {
        self.messages.mount(self.api.list_messages()).await
    }

    pub async fn refresh(&self) -> LoadOutcome {
        self.messages.load(self.api.list_messages()).await
    }

    pub async fn detach(&self) {
        self.messages.detach().await;
    }

    pub async fn snapshot(&self) -> ViewState<Vec<Message>> {
        self.messages.snapshot().await
    }

    pub async fn visible(&self, search: &str) -> Vec<Message> {
        self.messages
            .with(|messages| {
                project(messages, search, NoFilter)
                    .into_iter()
                    .cloned()
                    .collect()
            })
            .await
    }

    pub async fn find(&self, id: MessageId) -> Option<Message> {
        self.messages.find(id).await
    }

    pub async fn reply_state(&self) -> ReplyState {
        self.reply.read().await.clone()
    }

    /// Open the reply surface for a message with an empty draft.
    pub async fn open_reply(&self, id: MessageId) {
        *self.reply.write().await = ReplyState::open(id);
    }

    /// Close the reply surface, discarding the draft.
    pub async fn cancel_reply(&self) {
        *self.reply.write().await = ReplyState::Closed;
    }

    /// Send a reply.
    ///
    /// Blank text is rejected without a request. On success the surface
    /// closes; the message list is never changed. On failure the surface
    /// stays open with `text` as the draft.
    ///
    /// # Errors
    ///
    /// Returns error if the text is blank or the backend request fails.
    #[instrument(skip(self, text), fields(message_id = %id))]
    pub async fn send_reply(&self, id: MessageId, text: &str) -> Result<(), DispatchError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyReply.into());
        }

        *self.reply.write().await = ReplyState::Open {
            message_id: id,
            draft: text.to_owned(),
        };

        self.api.reply_to_message(id, text).await?;

        let mut reply = self.reply.write().await;
        if reply.message_id() == Some(id) {
            *reply = ReplyState::Closed;
        }
        info!("Reply sent");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::pages::fake::{FakeApi, op};

    fn fake() -> FakeApi {
        FakeApi::new().with_messages(json!([
            {"id": 1, "subject": "Late order", "name": "Ana", "email": "ana@example.com", "message": "Where is it?"},
            {"id": 2, "subject": "Thanks", "name": "Ben", "email": "ben@example.com", "phoneNumber": "555-0100"}
        ]))
    }

    async fn mounted(api: &FakeApi) -> MessagesPage {
        let page = MessagesPage::new(Arc::new(api.clone()));
        page.mount().await;
        page
    }

    #[tokio::test]
    async fn test_blank_reply_never_dispatches() {
        let api = fake();
        let page = mounted(&api).await;
        page.open_reply(MessageId::new(1)).await;

        for text in ["", "   ", "\n\t"] {
            let err = page.send_reply(MessageId::new(1), text).await.unwrap_err();
            assert!(err.is_validation());
        }

        assert_eq!(api.call_count(op::REPLY), 0);
        assert_eq!(page.reply_state().await, ReplyState::open(MessageId::new(1)));
    }

    #[tokio::test]
    async fn test_reply_success_closes_surface_without_touching_list() {
        let api = fake();
        let page = mounted(&api).await;
        let before = page.snapshot().await;
        page.open_reply(MessageId::new(1)).await;

        page.send_reply(MessageId::new(1), "Shipped today").await.unwrap();

        assert_eq!(page.reply_state().await, ReplyState::Closed);
        assert_eq!(page.snapshot().await, before);
        assert_eq!(
            api.replies(),
            vec![(MessageId::new(1), "Shipped today".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failed_reply_keeps_draft() {
        let api = fake();
        let page = mounted(&api).await;
        page.open_reply(MessageId::new(2)).await;

        api.fail(op::REPLY);
        assert!(page.send_reply(MessageId::new(2), "You're welcome").await.is_err());

        assert_eq!(
            page.reply_state().await,
            ReplyState::Open {
                message_id: MessageId::new(2),
                draft: "You're welcome".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_reply_sent_without_opening_surface() {
        let api = fake();
        let page = mounted(&api).await;

        page.send_reply(MessageId::new(2), "Glad it arrived").await.unwrap();

        assert_eq!(page.reply_state().await, ReplyState::Closed);
        assert_eq!(api.call_count(op::REPLY), 1);
    }

    #[tokio::test]
    async fn test_search_over_sender_and_body() {
        let api = fake();
        let page = mounted(&api).await;
        assert_eq!(page.visible("where").await.len(), 1);
        assert_eq!(page.visible("EXAMPLE.COM").await.len(), 2);
        assert_eq!(page.find(MessageId::new(2)).await.unwrap().phone_number(), "555-0100");
    }
}
