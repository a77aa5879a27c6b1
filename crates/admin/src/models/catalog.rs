//! Reference data for the product form.

use serde::{Deserialize, Serialize};

use storedesk_core::{CategoryId, OccasionId};

use super::Entity;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(default)]
    pub name: Option<String>,
}

/// An occasion products can be tagged with (birthday, wedding, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occasion {
    pub id: OccasionId,
    #[serde(default)]
    pub name: Option<String>,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> CategoryId {
        self.id
    }
}

impl Entity for Occasion {
    type Id = OccasionId;

    fn id(&self) -> OccasionId {
        self.id
    }
}

impl Category {
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

impl Occasion {
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}
