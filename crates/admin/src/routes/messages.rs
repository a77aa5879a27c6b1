//! Contact message route handlers.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use storedesk_core::MessageId;

use crate::{
    error::AppError,
    filters,
    middleware::{set_flash, take_flash},
    models::Message,
    state::AppState,
    view::Notice,
};

use super::{ListQuery, LoadView, render};

/// Message card for templates.
#[derive(Debug, Clone)]
pub struct MessageView {
    pub id: MessageId,
    pub subject: String,
    pub reply_subject: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub body: String,
    pub received_on: String,
    /// The reply form is open for this message.
    pub replying: bool,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            subject: message.subject().to_owned(),
            reply_subject: message.reply_subject(),
            name: message.name().to_owned(),
            email: message.email().to_owned(),
            phone_number: message.phone_number().to_owned(),
            body: message.body().to_owned(),
            received_on: message.received_on(),
            replying: false,
        }
    }
}

/// Messages page template.
#[derive(Template)]
#[template(path = "messages/index.html")]
pub struct MessagesIndexTemplate {
    pub current_path: &'static str,
    pub notice: Option<Notice>,
    pub load: LoadView,
    pub messages: Vec<MessageView>,
    pub search: String,
    pub replying_to: Option<MessageId>,
}

/// Reply form template.
#[derive(Template)]
#[template(path = "messages/reply.html")]
pub struct MessageReplyTemplate {
    pub current_path: &'static str,
    pub notice: Option<Notice>,
    pub message: MessageView,
    pub draft: String,
}

/// Reply form body.
#[derive(Debug, Deserialize)]
pub struct ReplyForm {
    #[serde(default)]
    pub reply: String,
}

/// Build the messages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", get(index))
        .route("/messages/reply/cancel", post(cancel_reply))
        .route("/messages/{id}/reply", get(open_reply).post(send_reply))
}

/// Messages page handler.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let page = &state.pages().messages;
    if query.wants_refresh() {
        page.refresh().await;
    } else {
        page.mount().await;
    }

    let snapshot = page.snapshot().await;
    let replying_to = page.reply_state().await.message_id();
    let messages = page
        .visible(&query.search)
        .await
        .iter()
        .map(|message| MessageView {
            replying: replying_to == Some(message.id),
            ..MessageView::from(message)
        })
        .collect();

    render(&MessagesIndexTemplate {
        current_path: "/messages",
        notice: take_flash(&session).await,
        load: LoadView::new(snapshot.loading, snapshot.error),
        messages,
        search: query.search,
        replying_to,
    })
}

async fn find_message(state: &AppState, id: MessageId) -> Result<Message, AppError> {
    let page = &state.pages().messages;
    page.mount().await;
    page.find(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("message {id}")))
}

/// Open the reply form for a message.
#[instrument(skip(state, session))]
pub async fn open_reply(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<MessageId>,
) -> Result<Html<String>, AppError> {
    let message = find_message(&state, id).await?;
    let page = &state.pages().messages;

    // Reopening the same message keeps an unsent draft
    let current = page.reply_state().await;
    let draft = if current.message_id() == Some(id) {
        current.draft().to_owned()
    } else {
        page.open_reply(id).await;
        String::new()
    };

    Ok(render(&MessageReplyTemplate {
        current_path: "/messages",
        notice: take_flash(&session).await,
        message: MessageView::from(&message),
        draft,
    }))
}

/// Send a reply.
#[instrument(skip(state, session, form))]
pub async fn send_reply(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<MessageId>,
    Form(form): Form<ReplyForm>,
) -> Result<Response, AppError> {
    let message = find_message(&state, id).await?;
    let result = state.pages().messages.send_reply(id, &form.reply).await;
    let notice = Notice::from_outcome(&result, "Reply sent successfully", "Failed to send reply");

    if result.is_ok() {
        set_flash(&session, notice).await?;
        return Ok(Redirect::to("/messages").into_response());
    }

    // Stay on the form with the draft as typed
    Ok(render(&MessageReplyTemplate {
        current_path: "/messages",
        notice: Some(notice),
        message: MessageView::from(&message),
        draft: form.reply,
    })
    .into_response())
}

/// Close the reply form.
#[instrument(skip(state))]
pub async fn cancel_reply(State(state): State<AppState>) -> Redirect {
    state.pages().messages.cancel_reply().await;
    Redirect::to("/messages")
}
