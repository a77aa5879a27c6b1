//! Contact message commands.

use storedesk_admin::pages::Pages;
use storedesk_core::MessageId;

use super::{CommandError, ensure_loaded, report};

/// List messages matching `search`.
///
/// # Errors
///
/// Returns error if the messages fail to load.
pub async fn list(pages: &Pages, search: &str) -> Result<(), CommandError> {
    let page = &pages.messages;
    let outcome = page.mount().await;
    let snapshot = page.snapshot().await;
    ensure_loaded(outcome, "messages", snapshot.error)?;

    let messages = page.visible(search).await;
    tracing::info!("{} of {} messages", messages.len(), snapshot.data.len());
    for message in &messages {
        tracing::info!(
            "#{:<5} {}  from {} <{}> on {}",
            message.id,
            message.subject(),
            message.name(),
            message.email(),
            message.received_on()
        );
        tracing::info!("       {}", message.body());
    }
    Ok(())
}

/// Reply to a message.
///
/// # Errors
///
/// Returns error if `text` is blank or the backend rejects the reply.
pub async fn reply(pages: &Pages, id: MessageId, text: &str) -> Result<(), CommandError> {
    let page = &pages.messages;
    page.open_reply(id).await;
    report(
        page.send_reply(id, text).await,
        "Reply sent successfully",
        "Failed to send reply",
    )
}
