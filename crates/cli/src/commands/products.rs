//! Product commands.

use std::path::Path;

use clap::Args;
use storedesk_admin::models::{DraftImage, ImageUpload, ProductDraft};
use storedesk_admin::pages::Pages;
use storedesk_admin::view::ProductFilter;
use storedesk_core::{CategoryId, OccasionId, ProductId, ProductStatus};

use super::{CommandError, ensure_loaded, report};

/// Product fields settable from the command line.
///
/// On update, omitted fields keep the product's current value.
#[derive(Debug, Args)]
pub struct ProductFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Decimal price, e.g. `12.50`
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    stock: Option<String>,
    /// `active` or `inactive`
    #[arg(long)]
    status: Option<String>,
    /// Image file to upload
    #[arg(long)]
    image: Option<std::path::PathBuf>,
    #[arg(long)]
    category: Option<i32>,
    #[arg(long)]
    occasion: Option<i32>,
}

impl ProductFields {
    async fn apply(self, draft: &mut ProductDraft) -> Result<(), CommandError> {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(stock) = self.stock {
            draft.stock = stock;
        }
        if let Some(status) = self.status {
            draft.status = status.parse::<ProductStatus>().map_err(CommandError::Usage)?;
        }
        if let Some(path) = self.image {
            draft.image = DraftImage::Replace(read_image(&path).await?);
        }
        if let Some(category) = self.category {
            draft.category_id = Some(CategoryId::new(category));
        }
        if let Some(occasion) = self.occasion {
            draft.occasion_id = Some(OccasionId::new(occasion));
        }
        Ok(())
    }
}

async fn read_image(path: &Path) -> Result<ImageUpload, CommandError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
    let content_type = path
        .extension()
        .and_then(|ext| image_mime(&ext.to_string_lossy()))
        .map(str::to_owned);

    Ok(ImageUpload {
        file_name,
        content_type,
        bytes,
    })
}

fn image_mime(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// List products matching `search` and `status`.
///
/// # Errors
///
/// Returns error if `status` is unknown or the products fail to load.
pub async fn list(pages: &Pages, search: &str, status: &str) -> Result<(), CommandError> {
    let filter: ProductFilter = status.parse().map_err(CommandError::usage)?;

    let page = &pages.products;
    let outcome = page.mount().await;
    let snapshot = page.snapshot().await;
    ensure_loaded(outcome, "products", snapshot.error)?;

    let products = page.visible(search, filter).await;
    tracing::info!("{} of {} products", products.len(), snapshot.data.len());
    for product in &products {
        tracing::info!(
            "#{:<5} {:<8} {:>10} stock {:>4}  {}",
            product.id,
            product.status().label(),
            product.price().display(),
            product.stock(),
            product.name()
        );
    }
    Ok(())
}

/// Create a product.
///
/// # Errors
///
/// Returns error if the image cannot be read, the fields are invalid, or
/// the backend rejects the product.
pub async fn create(pages: &Pages, fields: ProductFields) -> Result<(), CommandError> {
    let mut draft = ProductDraft::default();
    fields.apply(&mut draft).await?;

    let product = report(
        pages.products.create(&draft).await,
        "Product created successfully",
        "Failed to create product",
    )?;
    tracing::info!("Created product #{}", product.id);
    Ok(())
}

/// Update a product, starting from its current values.
///
/// # Errors
///
/// Returns error if the product is unknown, the fields are invalid, or the
/// backend rejects the update.
pub async fn update(pages: &Pages, id: ProductId, fields: ProductFields) -> Result<(), CommandError> {
    let page = &pages.products;
    let outcome = page.mount().await;
    ensure_loaded(outcome, "products", page.snapshot().await.error)?;

    let mut draft = page.begin_edit(id).await?;
    fields.apply(&mut draft).await?;

    report(
        page.save(id, draft).await,
        "Product updated successfully",
        "Failed to update product",
    )?;
    Ok(())
}

/// Delete a product.
///
/// # Errors
///
/// Returns error if the backend rejects the delete.
pub async fn delete(pages: &Pages, id: ProductId) -> Result<(), CommandError> {
    report(
        pages.products.delete(id).await,
        "Product deleted successfully",
        "Failed to delete product",
    )
}
