//! Customer endpoints.

use tracing::{debug, instrument};

use super::types::decode_list;
use super::{ApiError, BackendClient};
use crate::models::Customer;

impl BackendClient {
    /// Fetch every customer account.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self))]
    pub async fn get_customers(&self) -> Result<Vec<Customer>, ApiError> {
        let body = self.get_json("/api/customers-users").await?;
        let customers: Vec<Customer> = decode_list(body, "customers");
        debug!(count = customers.len(), "Fetched customers");
        Ok(customers)
    }
}
