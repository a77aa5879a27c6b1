//! Contact-form messages.

use serde::{Deserialize, Serialize};

use storedesk_core::MessageId;

use super::timestamp::{date_or_blank, Timestamp};
use super::{Entity, non_empty};

/// A message submitted through the shop's contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Entity for Message {
    type Id = MessageId;

    fn id(&self) -> MessageId {
        self.id
    }
}

impl Message {
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or("")
    }

    /// Subject line for a reply (`Re: ...`).
    #[must_use]
    pub fn reply_subject(&self) -> String {
        format!("Re: {}", self.subject())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn phone_number(&self) -> &str {
        non_empty(self.phone_number.as_ref()).unwrap_or("Not provided")
    }

    #[must_use]
    pub fn body(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn received_on(&self) -> String {
        date_or_blank(self.created_at.as_ref())
    }
}
