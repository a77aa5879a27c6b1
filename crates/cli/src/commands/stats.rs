//! Dashboard counters.

use storedesk_admin::pages::Pages;

/// Fetch and show every counter. A failed counter shows `-`.
pub async fn show(pages: &Pages) {
    pages.dashboard.mount().await;

    for counter in pages.dashboard.counters().await {
        match &counter.state.error {
            Some(error) => tracing::warn!("{:<10} {}  ({error})", counter.counter.label(), counter.display()),
            None => tracing::info!("{:<10} {}", counter.counter.label(), counter.display()),
        }
    }
}
