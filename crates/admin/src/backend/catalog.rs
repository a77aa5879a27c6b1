//! Reference data for the product form.

use tracing::{debug, instrument};

use super::types::{decode_list, decode_list_field};
use super::{ApiError, BackendClient};
use crate::models::{Category, Occasion};

impl BackendClient {
    /// Fetch product categories.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        let body = self.get_json("/categories/get-all-categories").await?;
        let categories: Vec<Category> = decode_list(body, "categories");
        debug!(count = categories.len(), "Fetched categories");
        Ok(categories)
    }

    /// Fetch occasions.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self))]
    pub async fn get_occasions(&self) -> Result<Vec<Occasion>, ApiError> {
        let body = self.get_json("/api/occasion/get-all").await?;
        let occasions: Vec<Occasion> = decode_list_field(body, "data", "occasions");
        debug!(count = occasions.len(), "Fetched occasions");
        Ok(occasions)
    }
}
