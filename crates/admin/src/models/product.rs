//! Products and the product edit draft.

use serde::{Deserialize, Serialize};
use url::Url;

use storedesk_core::{CategoryId, OccasionId, Price, ProductId, ProductStatus};

use super::{Entity, lenient, non_empty};

/// A product as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub stock: Option<i64>,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    /// Image path relative to the backend origin, or an absolute URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

impl Product {
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn price(&self) -> Price {
        self.price.unwrap_or_default()
    }

    #[must_use]
    pub fn stock(&self) -> i64 {
        self.stock.unwrap_or(0)
    }

    #[must_use]
    pub fn status(&self) -> ProductStatus {
        self.status.unwrap_or_default()
    }

    /// Absolute image URL, resolving backend-relative paths against `origin`.
    #[must_use]
    pub fn image_url(&self, origin: &Url) -> Option<String> {
        resolve_image_url(origin, non_empty(self.image.as_ref())?)
    }
}

/// Resolve a backend image reference: absolute URLs pass through, paths are
/// joined onto `origin`.
#[must_use]
pub fn resolve_image_url(origin: &Url, image: &str) -> Option<String> {
    if image.starts_with("http://") || image.starts_with("https://") {
        return Some(image.to_owned());
    }
    origin.join(image).ok().map(String::from)
}

/// An image file picked for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Image slot of a draft: keep whatever the product has, or replace it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftImage {
    /// Keep the current image (path shown as preview, never re-uploaded).
    Keep(Option<String>),
    /// Upload a new file.
    Replace(ImageUpload),
}

impl Default for DraftImage {
    fn default() -> Self {
        Self::Keep(None)
    }
}

/// Editable copy of a product's fields, held as entered until save or cancel.
///
/// Numeric fields stay as text so a half-typed value survives a failed save.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub status: ProductStatus,
    pub image: DraftImage,
    pub category_id: Option<CategoryId>,
    pub occasion_id: Option<OccasionId>,
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name().to_owned(),
            description: product.description().to_owned(),
            price: product.price.map(|p| p.to_string()).unwrap_or_default(),
            stock: product.stock.map(|s| s.to_string()).unwrap_or_default(),
            status: product.status(),
            image: DraftImage::Keep(product.image.clone()),
            category_id: None,
            occasion_id: None,
        }
    }
}

/// Validated product fields, ready to be sent as multipart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub stock: i64,
    pub status: ProductStatus,
    pub image: Option<ImageUpload>,
    pub category_id: Option<CategoryId>,
    pub occasion_id: Option<OccasionId>,
}
