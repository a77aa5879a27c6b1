//! Customer table and export.

use std::sync::Arc;

use crate::backend::AdminApi;
use crate::export::CustomerExport;
use crate::models::Customer;
use crate::view::{ListController, LoadOutcome, NoFilter, ViewController, ViewState, project};

/// Customers page controller.
pub struct CustomersPage {
    api: Arc<dyn AdminApi>,
    customers: ListController<Customer>,
}

impl CustomersPage {
    #[must_use]
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            api,
            customers: ViewController::new("customers"),
        }
    }

    pub async fn mount(&self) -> LoadOutcome {
        self.customers.mount(self.api.list_customers()).await
    }

    pub async fn refresh(&self) -> LoadOutcome {
        self.customers.load(self.api.list_customers()).await
    }

    pub async fn detach(&self) {
        self.customers.detach().await;
    }

    pub async fn snapshot(&self) -> ViewState<Vec<Customer>> {
        self.customers.snapshot().await
    }

    pub async fn visible(&self, search: &str) -> Vec<Customer> {
        self.customers
            .with(|customers| {
                project(customers, search, NoFilter)
                    .into_iter()
                    .cloned()
                    .collect()
            })
            .await
    }

    /// Export every loaded customer. No request is made.
    pub async fn export(&self) -> CustomerExport {
        self.customers.with(|customers| CustomerExport::new(customers)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::pages::fake::{FakeApi, op};

    #[tokio::test]
    async fn test_export_uses_loaded_rows_without_fetching() {
        let api = FakeApi::new().with_customers(json!([
            {"id": 1, "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com"},
            {"id": 2, "firstName": "Alan", "lastName": "Turing", "role": "admin"}
        ]));
        let page = CustomersPage::new(Arc::new(api.clone()));
        page.mount().await;

        let export = page.export().await;

        assert_eq!(export.rows().len(), 2);
        assert_eq!(export.rows()[1].role, "admin");
        assert_eq!(api.call_count(op::LIST_CUSTOMERS), 1);
    }

    #[tokio::test]
    async fn test_export_before_load_is_empty() {
        let page = CustomersPage::new(Arc::new(FakeApi::new()));
        assert!(page.export().await.rows().is_empty());
    }
}
