//! Failures surfaced by the mutation dispatcher.

use thiserror::Error;

use storedesk_core::{PriceError, ProductId};

use crate::backend::ApiError;

/// A user action that could not be completed.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request never completed or the backend refused it.
    #[error(transparent)]
    Network(#[from] ApiError),

    /// The action was rejected before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DispatchError {
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Input rejected before dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Reply cannot be empty")]
    EmptyReply,

    #[error("Product {0} is not being edited")]
    NotEditing(ProductId),

    #[error("Product {0} not found")]
    UnknownProduct(ProductId),

    #[error("Name is required")]
    EmptyName,

    #[error("Invalid price: {0}")]
    Price(#[from] PriceError),

    #[error("Invalid stock: {0}")]
    Stock(String),
}
