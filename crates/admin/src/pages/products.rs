//! Product management: list, inline edit, create and delete.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, instrument};

use storedesk_core::{Price, ProductId};

use crate::backend::AdminApi;
use crate::models::{Category, DraftImage, Occasion, Product, ProductDraft, ProductForm};
use crate::view::{
    DispatchError, EditState, ListController, LoadOutcome, ProductFilter, ValidationError,
    ViewController, ViewState, project,
};

/// Edit state of the products table.
pub type ProductEdit = EditState<ProductId, ProductDraft>;

/// Validate a draft into multipart-ready fields.
///
/// # Errors
///
/// Returns error if the name is blank, the price is not a non-negative
/// decimal, or the stock is not a non-negative whole number.
pub fn validate_draft(draft: &ProductDraft) -> Result<ProductForm, ValidationError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let price: Price = draft.price.parse()?;

    let stock_input = draft.stock.trim();
    let stock: i64 = stock_input
        .parse()
        .map_err(|_| ValidationError::Stock(format!("'{stock_input}' is not a whole number")))?;
    if stock < 0 {
        return Err(ValidationError::Stock("cannot be negative".to_string()));
    }

    let image = match &draft.image {
        DraftImage::Keep(_) => None,
        DraftImage::Replace(upload) => Some(upload.clone()),
    };

    Ok(ProductForm {
        name: name.to_owned(),
        description: draft.description.trim().to_owned(),
        price,
        stock,
        status: draft.status,
        image,
        category_id: draft.category_id,
        occasion_id: draft.occasion_id,
    })
}

/// Products page controller.
pub struct ProductsPage {
    api: Arc<dyn AdminApi>,
    products: ListController<Product>,
    categories: ListController<Category>,
    occasions: ListController<Occasion>,
    edit: RwLock<ProductEdit>,
}

impl ProductsPage {
    #[must_use]
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            api,
            products: ViewController::new("products"),
            categories: ViewController::new("categories"),
            occasions: ViewController::new("occasions"),
            edit: RwLock::new(EditState::NotEditing),
        }
    }

    /// Fetch products the first time the page is shown.
    pub async fn mount(&self) -> LoadOutcome {
        self.products.mount(self.api.list_products()).await
    }

    /// Refetch products unconditionally.
    pub async fn refresh(&self) -> LoadOutcome {
        self.products.load(self.api.list_products()).await
    }

    /// Fetch the create form's reference data the first time it is shown.
    pub async fn mount_reference_data(&self) {
        tokio::join!(
            self.categories.mount(self.api.list_categories()),
            self.occasions.mount(self.api.list_occasions()),
        );
    }

    /// Stop applying in-flight responses.
    pub async fn detach(&self) {
        tokio::join!(
            self.products.detach(),
            self.categories.detach(),
            self.occasions.detach(),
        );
    }

    pub async fn snapshot(&self) -> ViewState<Vec<Product>> {
        self.products.snapshot().await
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.categories.snapshot().await.data
    }

    pub async fn occasions(&self) -> Vec<Occasion> {
        self.occasions.snapshot().await.data
    }

    /// Rows matching the search term and status filter, in list order.
    pub async fn visible(&self, search: &str, filter: ProductFilter) -> Vec<Product> {
        self.products
            .with(|products| {
                project(products, search, filter)
                    .into_iter()
                    .cloned()
                    .collect()
            })
            .await
    }

    pub async fn edit_state(&self) -> ProductEdit {
        self.edit.read().await.clone()
    }

    /// Enter edit mode for `id` with a draft copied from the product.
    ///
    /// Replaces any other row's draft.
    ///
    /// # Errors
    ///
    /// Returns error if no loaded product has `id`.
    pub async fn begin_edit(&self, id: ProductId) -> Result<ProductDraft, ValidationError> {
        let product = self
            .products
            .find(id)
            .await
            .ok_or(ValidationError::UnknownProduct(id))?;
        let draft = ProductDraft::from(&product);
        *self.edit.write().await = EditState::Editing {
            id,
            draft: draft.clone(),
        };
        Ok(draft)
    }

    /// Leave edit mode, discarding the draft.
    pub async fn cancel_edit(&self) {
        *self.edit.write().await = EditState::NotEditing;
    }

    /// Submit the draft for the product in edit mode.
    ///
    /// On success the row is replaced with the backend's copy and edit mode
    /// ends. On failure edit mode stays on with `draft` as entered.
    ///
    /// # Errors
    ///
    /// Returns error if `id` is not in edit mode, the draft is invalid, or
    /// the backend request fails.
    #[instrument(skip(self, draft), fields(product_id = %id))]
    pub async fn save(&self, id: ProductId, draft: ProductDraft) -> Result<Product, DispatchError> {
        let form = {
            let mut edit = self.edit.write().await;
            if !edit.is_editing(id) {
                return Err(ValidationError::NotEditing(id).into());
            }
            let form = validate_draft(&draft);
            *edit = EditState::Editing { id, draft };
            form?
        };

        let product = self.api.update_product(id, &form).await?;

        self.products.replace(product.clone()).await;
        let mut edit = self.edit.write().await;
        if edit.is_editing(id) {
            *edit = EditState::NotEditing;
        }
        info!("Product updated");
        Ok(product)
    }

    /// Delete a product and drop it from the list.
    ///
    /// # Errors
    ///
    /// Returns error if the backend request fails; the list is untouched.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: ProductId) -> Result<(), DispatchError> {
        self.api.delete_product(id).await?;

        self.products.remove(id).await;
        let mut edit = self.edit.write().await;
        if edit.is_editing(id) {
            *edit = EditState::NotEditing;
        }
        info!("Product deleted");
        Ok(())
    }

    /// Create a product and append it to the list.
    ///
    /// # Errors
    ///
    /// Returns error if the draft is invalid or the backend request fails.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product, DispatchError> {
        let form = validate_draft(draft)?;
        let product = self.api.create_product(&form).await?;
        self.products.append(product.clone()).await;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use storedesk_core::ProductStatus;

    use super::*;
    use crate::models::ImageUpload;
    use crate::pages::fake::{FakeApi, op};

    fn fake() -> FakeApi {
        FakeApi::new().with_products(json!([
            {"id": 1, "name": "Candle", "price": "12.00", "stock": 4, "status": "active", "image": "/c.png"},
            {"id": 2, "name": "Card", "price": "3.50", "stock": 40, "status": "inactive"},
            {"id": 3, "name": "Vase", "price": "30", "stock": 1, "status": "active"}
        ]))
    }

    async fn mounted(api: &FakeApi) -> ProductsPage {
        let page = ProductsPage::new(Arc::new(api.clone()));
        assert_eq!(page.mount().await, LoadOutcome::Loaded);
        page
    }

    fn ids(products: &[Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[tokio::test]
    async fn test_delete_removes_only_matching_row() {
        let api = fake();
        let page = mounted(&api).await;

        page.delete(ProductId::new(2)).await.unwrap();

        assert_eq!(ids(&page.snapshot().await.data), vec![1, 3]);
        assert_eq!(api.call_count(op::LIST_PRODUCTS), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_state_identical() {
        let api = fake();
        let page = mounted(&api).await;
        let before = page.snapshot().await;

        api.fail(op::DELETE_PRODUCT);
        let err = page.delete(ProductId::new(2)).await.unwrap_err();

        assert!(matches!(err, DispatchError::Network(_)));
        assert_eq!(page.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_save_replaces_row_in_place_and_exits_edit_mode() {
        let api = fake();
        let page = mounted(&api).await;

        let mut draft = page.begin_edit(ProductId::new(2)).await.unwrap();
        draft.name = "Greeting card".to_string();
        draft.price = "4.25".to_string();
        draft.status = ProductStatus::Active;

        let saved = page.save(ProductId::new(2), draft).await.unwrap();

        let products = page.snapshot().await.data;
        assert_eq!(ids(&products), vec![1, 2, 3]);
        assert_eq!(products[1], saved);
        assert_eq!(products[1].name(), "Greeting card");
        assert_eq!(products[1].price(), Price::from_cents(425));
        assert_eq!(products[0].name(), "Candle");
        assert_eq!(page.edit_state().await, EditState::NotEditing);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_edit_mode_and_draft() {
        let api = fake();
        let page = mounted(&api).await;
        let before = page.snapshot().await;

        let mut draft = page.begin_edit(ProductId::new(1)).await.unwrap();
        draft.name = "Soy candle".to_string();

        api.fail(op::UPDATE_PRODUCT);
        let err = page.save(ProductId::new(1), draft.clone()).await.unwrap_err();

        assert!(matches!(err, DispatchError::Network(_)));
        assert_eq!(
            page.edit_state().await,
            EditState::Editing {
                id: ProductId::new(1),
                draft
            }
        );
        assert_eq!(page.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_invalid_draft_is_rejected_before_dispatch() {
        let api = fake();
        let page = mounted(&api).await;

        let mut draft = page.begin_edit(ProductId::new(1)).await.unwrap();
        draft.stock = "four".to_string();

        let err = page.save(ProductId::new(1), draft.clone()).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(api.call_count(op::UPDATE_PRODUCT), 0);
        assert_eq!(
            page.edit_state().await.draft_for(ProductId::new(1)),
            Some(&draft)
        );
    }

    #[tokio::test]
    async fn test_save_requires_matching_edit_mode() {
        let api = fake();
        let page = mounted(&api).await;
        page.begin_edit(ProductId::new(1)).await.unwrap();

        let draft = ProductDraft::from(&page.snapshot().await.data[2]);
        let err = page.save(ProductId::new(3), draft).await.unwrap_err();

        assert!(matches!(
            err,
            DispatchError::Validation(ValidationError::NotEditing(_))
        ));
        assert!(page.edit_state().await.is_editing(ProductId::new(1)));
    }

    #[tokio::test]
    async fn test_only_one_row_in_edit_mode() {
        let api = fake();
        let page = mounted(&api).await;

        page.begin_edit(ProductId::new(1)).await.unwrap();
        page.begin_edit(ProductId::new(3)).await.unwrap();

        assert_eq!(page.edit_state().await.editing_id(), Some(ProductId::new(3)));
        page.cancel_edit().await;
        assert_eq!(page.edit_state().await, EditState::NotEditing);
    }

    #[tokio::test]
    async fn test_save_keeps_image_unless_replaced() {
        let api = fake();
        let page = mounted(&api).await;

        let draft = page.begin_edit(ProductId::new(1)).await.unwrap();
        let saved = page.save(ProductId::new(1), draft).await.unwrap();
        assert_eq!(saved.image.as_deref(), Some("/c.png"));

        let mut draft = page.begin_edit(ProductId::new(1)).await.unwrap();
        draft.image = DraftImage::Replace(ImageUpload {
            file_name: "new.jpg".to_string(),
            content_type: Some("image/jpeg".to_string()),
            bytes: vec![0xFF, 0xD8],
        });
        let saved = page.save(ProductId::new(1), draft).await.unwrap();
        assert_eq!(saved.image.as_deref(), Some("/uploads/new.jpg"));
    }

    #[tokio::test]
    async fn test_create_appends() {
        let api = fake();
        let page = mounted(&api).await;

        let draft = ProductDraft {
            name: "Balloon".to_string(),
            price: "2".to_string(),
            stock: "50".to_string(),
            ..ProductDraft::default()
        };
        let created = page.create(&draft).await.unwrap();

        let products = page.snapshot().await.data;
        assert_eq!(products.len(), 4);
        assert_eq!(products.last(), Some(&created));
    }

    #[tokio::test]
    async fn test_visible_projection() {
        let api = fake();
        let page = mounted(&api).await;

        assert_eq!(ids(&page.visible("", ProductFilter::Active).await), vec![1, 3]);
        assert_eq!(ids(&page.visible("CA", ProductFilter::All).await), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_reference_data_loads_once() {
        let api = fake().with_catalog(
            json!([{"id": 1, "name": "Home"}]),
            json!([{"id": 2, "name": "Birthday"}]),
        );
        let page = mounted(&api).await;

        page.mount_reference_data().await;
        page.mount_reference_data().await;

        assert_eq!(page.categories().await.len(), 1);
        assert_eq!(page.occasions().await[0].name(), "Birthday");
        assert_eq!(api.call_count(op::LIST_CATEGORIES), 1);
    }

    #[test]
    fn test_validate_draft() {
        let mut draft = ProductDraft {
            name: "  Mug ".to_string(),
            price: "8.5".to_string(),
            stock: " 3".to_string(),
            ..ProductDraft::default()
        };
        let form = validate_draft(&draft).unwrap();
        assert_eq!(form.name, "Mug");
        assert_eq!(form.stock, 3);
        assert!(form.image.is_none());

        draft.price = "-1".to_string();
        assert!(matches!(validate_draft(&draft), Err(ValidationError::Price(_))));

        draft.price = "1".to_string();
        draft.stock = "-2".to_string();
        assert!(matches!(validate_draft(&draft), Err(ValidationError::Stock(_))));

        draft.name = " ".to_string();
        assert_eq!(validate_draft(&draft), Err(ValidationError::EmptyName));
    }
}
