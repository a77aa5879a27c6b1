//! Page controllers: one per admin section, all sharing one backend client.
//!
//! Each page owns its view-state controllers and implements the section's
//! mutations (the dispatcher): exactly one backend request per action,
//! local reconciliation on success, untouched state on failure.

mod comments;
mod customers;
mod dashboard;
mod messages;
mod products;

#[cfg(test)]
pub(crate) mod fake;

pub use comments::CommentsPage;
pub use customers::CustomersPage;
pub use dashboard::{CounterState, DashboardPage};
pub use messages::MessagesPage;
pub use products::{ProductEdit, ProductsPage, validate_draft};

use std::sync::Arc;

use crate::backend::AdminApi;

/// Every page controller, built over one client.
pub struct Pages {
    pub dashboard: DashboardPage,
    pub products: ProductsPage,
    pub comments: CommentsPage,
    pub messages: MessagesPage,
    pub customers: CustomersPage,
}

impl Pages {
    #[must_use]
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            dashboard: DashboardPage::new(Arc::clone(&api)),
            products: ProductsPage::new(Arc::clone(&api)),
            comments: CommentsPage::new(Arc::clone(&api)),
            messages: MessagesPage::new(Arc::clone(&api)),
            customers: CustomersPage::new(api),
        }
    }

    /// Stop applying every in-flight response (shutdown).
    pub async fn detach_all(&self) {
        tokio::join!(
            self.dashboard.detach(),
            self.products.detach(),
            self.comments.detach(),
            self.messages.detach(),
            self.customers.detach(),
        );
    }
}
