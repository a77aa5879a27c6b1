//! Product endpoints.

use reqwest::multipart::{Form, Part};
use tracing::{debug, instrument};

use storedesk_core::ProductId;

use super::types::{ProductEnvelope, decode_list_field};
use super::{ApiError, BackendClient};
use crate::models::{Product, ProductForm};

impl BackendClient {
    /// Fetch every product.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, ApiError> {
        let body = self.get_json("/api/getAllProducts").await?;
        let products: Vec<Product> = decode_list_field(body, "products", "products");
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Create a product from validated form fields.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the backend answers non-2xx, or
    /// the response has no `product`.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn post_product(&self, form: &ProductForm) -> Result<Product, ApiError> {
        let request = self
            .http()
            .post(self.url("/api/create-products")?)
            .multipart(product_multipart(form)?);
        let envelope: ProductEnvelope<Product> = self.send_json(request).await?;
        debug!(product_id = %envelope.product.id, "Product created");
        Ok(envelope.product)
    }

    /// Replace a product's fields (and optionally its image).
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the backend answers non-2xx, or
    /// the response has no `product`.
    #[instrument(skip(self, form), fields(product_id = %id))]
    pub async fn put_product(&self, id: ProductId, form: &ProductForm) -> Result<Product, ApiError> {
        let request = self
            .http()
            .put(self.url(&format!("/api/update-products/{id}"))?)
            .multipart(product_multipart(form)?);
        let envelope: ProductEnvelope<Product> = self.send_json(request).await?;
        debug!("Product updated");
        Ok(envelope.product)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove_product(&self, id: ProductId) -> Result<(), ApiError> {
        let request = self
            .http()
            .delete(self.url(&format!("/api/products-delete/{id}"))?);
        self.send_empty(request).await?;
        debug!("Product deleted");
        Ok(())
    }
}

/// Multipart body for create/update. The image part is only present when a
/// new file was picked.
fn product_multipart(form: &ProductForm) -> Result<Form, ApiError> {
    let mut multipart = Form::new()
        .text("name", form.name.clone())
        .text("description", form.description.clone())
        .text("price", form.price.to_string())
        .text("stock", form.stock.to_string())
        .text("status", form.status.as_str());

    if let Some(category_id) = form.category_id {
        multipart = multipart.text("categoryId", category_id.to_string());
    }
    if let Some(occasion_id) = form.occasion_id {
        multipart = multipart.text("occasionId", occasion_id.to_string());
    }

    if let Some(image) = &form.image {
        let mut part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        if let Some(content_type) = &image.content_type {
            part = part.mime_str(content_type)?;
        }
        multipart = multipart.part("image", part);
    }

    Ok(multipart)
}
