//! Dashboard counters.

use std::fmt;

use tracing::{debug, instrument, warn};

use super::types::CountResponse;
use super::{ApiError, BackendClient};

/// A scalar count shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    Customers,
    Products,
    Orders,
}

impl Counter {
    /// Every counter, in dashboard order.
    pub const ALL: [Self; 3] = [Self::Customers, Self::Products, Self::Orders];

    /// Endpoint path returning `{ "count": n }`.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Customers => "/api/customers/count",
            Self::Products => "/api/count-products",
            Self::Orders => "/api/orders/count",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Customers => "Customers",
            Self::Products => "Products",
            Self::Orders => "Orders",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl BackendClient {
    /// Fetch one dashboard counter. A body without a usable `count` reads as 0.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self))]
    pub async fn get_count(&self, counter: Counter) -> Result<u64, ApiError> {
        let body = self.get_json(counter.path()).await?;
        let count = serde_json::from_value::<CountResponse>(body)
            .unwrap_or_else(|e| {
                warn!(%counter, error = %e, "Unexpected count response, treating as 0");
                CountResponse::default()
            })
            .value();
        debug!(%counter, count, "Fetched count");
        Ok(count)
    }
}
