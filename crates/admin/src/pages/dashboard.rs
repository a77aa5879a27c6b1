//! Dashboard counters.

use std::sync::Arc;

use crate::backend::{AdminApi, Counter};
use crate::view::{LoadOutcome, ViewController, ViewState};

/// Current value of one counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterState {
    pub counter: Counter,
    pub state: ViewState<Option<u64>>,
}

impl CounterState {
    /// Value for display: the count, `…` while loading, `-` when unavailable.
    #[must_use]
    pub fn display(&self) -> String {
        match (self.state.data, self.state.loading) {
            (Some(n), _) => n.to_string(),
            (None, true) => "…".to_string(),
            (None, false) => "-".to_string(),
        }
    }
}

/// Dashboard controller: one independent view per counter.
pub struct DashboardPage {
    api: Arc<dyn AdminApi>,
    customers: ViewController<Option<u64>>,
    products: ViewController<Option<u64>>,
    orders: ViewController<Option<u64>>,
}

impl DashboardPage {
    #[must_use]
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            api,
            customers: ViewController::new("customer count"),
            products: ViewController::new("product count"),
            orders: ViewController::new("order count"),
        }
    }

    const fn controller(&self, counter: Counter) -> &ViewController<Option<u64>> {
        match counter {
            Counter::Customers => &self.customers,
            Counter::Products => &self.products,
            Counter::Orders => &self.orders,
        }
    }

    async fn load_counter(&self, counter: Counter, only_once: bool) -> LoadOutcome {
        let controller = self.controller(counter);
        let api = Arc::clone(&self.api);
        let fetch = async move { api.count(counter).await.map(Some) };
        if only_once {
            controller.mount(fetch).await
        } else {
            controller.load(fetch).await
        }
    }

    /// Fetch all counters concurrently the first time the dashboard is shown.
    pub async fn mount(&self) {
        tokio::join!(
            self.load_counter(Counter::Customers, true),
            self.load_counter(Counter::Products, true),
            self.load_counter(Counter::Orders, true),
        );
    }

    /// Refetch all counters.
    pub async fn refresh(&self) {
        tokio::join!(
            self.load_counter(Counter::Customers, false),
            self.load_counter(Counter::Products, false),
            self.load_counter(Counter::Orders, false),
        );
    }

    pub async fn detach(&self) {
        tokio::join!(
            self.customers.detach(),
            self.products.detach(),
            self.orders.detach(),
        );
    }

    /// Counters in dashboard order.
    pub async fn counters(&self) -> Vec<CounterState> {
        let mut counters = Vec::with_capacity(Counter::ALL.len());
        for counter in Counter::ALL {
            counters.push(CounterState {
                counter,
                state: self.controller(counter).snapshot().await,
            });
        }
        counters
    }
}
