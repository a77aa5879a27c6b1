//! Shop customers.

use serde::{Deserialize, Serialize};

use storedesk_core::{CustomerId, CustomerRole};

use super::timestamp::{date_or_blank, Timestamp};
use super::Entity;

/// A registered customer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<CustomerRole>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> CustomerId {
        self.id
    }
}

impl Customer {
    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        format!("{first} {last}").trim().to_string()
    }

    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn role(&self) -> CustomerRole {
        self.role.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn joined_on(&self) -> String {
        date_or_blank(self.created_at.as_ref())
    }
}
