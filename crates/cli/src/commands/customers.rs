//! Customer commands.

use std::path::Path;

use storedesk_admin::pages::Pages;

use super::{CommandError, ensure_loaded};

/// List customers matching `search`.
///
/// # Errors
///
/// Returns error if the customers fail to load.
pub async fn list(pages: &Pages, search: &str) -> Result<(), CommandError> {
    let page = &pages.customers;
    let outcome = page.mount().await;
    let snapshot = page.snapshot().await;
    ensure_loaded(outcome, "customers", snapshot.error)?;

    let customers = page.visible(search).await;
    tracing::info!("{} of {} customers", customers.len(), snapshot.data.len());
    for customer in &customers {
        tracing::info!(
            "#{:<5} {:<24} {:<32} {:<9} {}",
            customer.id,
            customer.full_name(),
            customer.email(),
            customer.role(),
            customer.joined_on()
        );
    }
    Ok(())
}

/// Write the customer list PDF to `output`.
///
/// # Errors
///
/// Returns error if the customers fail to load, rendering fails, or the
/// file cannot be written.
pub async fn export(pages: &Pages, output: &Path) -> Result<(), CommandError> {
    let page = &pages.customers;
    let outcome = page.mount().await;
    ensure_loaded(outcome, "customers", page.snapshot().await.error)?;

    let export = page.export().await;
    let document = export.to_pdf()?;
    tokio::fs::write(output, document).await?;

    tracing::info!(
        "Exported {} customers to {}",
        export.rows().len(),
        output.display()
    );
    Ok(())
}
