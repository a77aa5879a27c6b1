//! Scripted in-memory [`AdminApi`] for page tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use storedesk_core::{CommentId, MessageId, ProductId};

use crate::backend::{AdminApi, ApiError, Counter};
use crate::models::{Category, Comment, Customer, Message, Occasion, Product, ProductForm};

/// Backend operation names, used to script failures and assert calls.
pub mod op {
    pub const LIST_PRODUCTS: &str = "list_products";
    pub const CREATE_PRODUCT: &str = "create_product";
    pub const UPDATE_PRODUCT: &str = "update_product";
    pub const DELETE_PRODUCT: &str = "delete_product";
    pub const LIST_COMMENTS: &str = "list_comments";
    pub const DELETE_COMMENT: &str = "delete_comment";
    pub const LIST_MESSAGES: &str = "list_messages";
    pub const REPLY: &str = "reply_to_message";
    pub const LIST_CUSTOMERS: &str = "list_customers";
    pub const COUNT: &str = "count";
    pub const LIST_CATEGORIES: &str = "list_categories";
    pub const LIST_OCCASIONS: &str = "list_occasions";
}

#[derive(Default)]
struct FakeState {
    products: Vec<Product>,
    comments: Vec<Comment>,
    messages: Vec<Message>,
    customers: Vec<Customer>,
    categories: Vec<Category>,
    occasions: Vec<Occasion>,
    next_product_id: i32,
    failing: HashSet<&'static str>,
    calls: Vec<String>,
    replies: Vec<(MessageId, String)>,
}

/// Fake backend holding its own records.
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

#[allow(clippy::unwrap_used)]
impl FakeApi {
    pub fn new() -> Self {
        let fake = Self::default();
        fake.state.lock().unwrap().next_product_id = 100;
        fake
    }

    pub fn with_products(self, products: serde_json::Value) -> Self {
        self.state.lock().unwrap().products = serde_json::from_value(products).unwrap();
        self
    }

    pub fn with_comments(self, comments: serde_json::Value) -> Self {
        self.state.lock().unwrap().comments = serde_json::from_value(comments).unwrap();
        self
    }

    pub fn with_messages(self, messages: serde_json::Value) -> Self {
        self.state.lock().unwrap().messages = serde_json::from_value(messages).unwrap();
        self
    }

    pub fn with_customers(self, customers: serde_json::Value) -> Self {
        self.state.lock().unwrap().customers = serde_json::from_value(customers).unwrap();
        self
    }

    pub fn with_catalog(self, categories: serde_json::Value, occasions: serde_json::Value) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.categories = serde_json::from_value(categories).unwrap();
            state.occasions = serde_json::from_value(occasions).unwrap();
        }
        self
    }

    /// Make `operation` answer 500 until [`FakeApi::recover`].
    pub fn fail(&self, operation: &'static str) {
        self.state.lock().unwrap().failing.insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.state.lock().unwrap().failing.remove(operation);
    }

    /// Backend-side change not made through the panel.
    pub fn set_report_count(&self, id: i32, count: u32) {
        let mut state = self.state.lock().unwrap();
        if let Some(comment) = state.comments.iter_mut().find(|c| c.id.as_i32() == id) {
            comment.report_count = Some(count);
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == operation).count()
    }

    pub fn replies(&self) -> Vec<(MessageId, String)> {
        self.state.lock().unwrap().replies.clone()
    }

    fn record(&self, operation: &'static str) -> Result<std::sync::MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(operation.to_string());
        if state.failing.contains(operation) {
            return Err(ApiError::Status {
                status: 500,
                message: format!("{operation} failed"),
            });
        }
        Ok(state)
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        message: format!("{what} not found"),
    }
}

#[allow(clippy::unwrap_used)]
fn product_from_form(id: ProductId, form: &ProductForm) -> Product {
    let image = form
        .image
        .as_ref()
        .map(|upload| format!("/uploads/{}", upload.file_name));
    serde_json::from_value(json!({
        "id": id,
        "name": form.name,
        "description": form.description,
        "price": form.price.to_string(),
        "stock": form.stock,
        "status": form.status.as_str(),
        "image": image,
    }))
    .unwrap()
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self.record(op::LIST_PRODUCTS)?.products.clone())
    }

    async fn create_product(&self, form: &ProductForm) -> Result<Product, ApiError> {
        let mut state = self.record(op::CREATE_PRODUCT)?;
        let id = ProductId::new(state.next_product_id);
        state.next_product_id += 1;
        let product = product_from_form(id, form);
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: ProductId, form: &ProductForm) -> Result<Product, ApiError> {
        let mut state = self.record(op::UPDATE_PRODUCT)?;
        let slot = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found("product"))?;
        let mut updated = product_from_form(id, form);
        if updated.image.is_none() {
            updated.image.clone_from(&slot.image);
        }
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let mut state = self.record(op::DELETE_PRODUCT)?;
        state.products.retain(|p| p.id != id);
        Ok(())
    }

    async fn list_comments(&self) -> Result<Vec<Comment>, ApiError> {
        Ok(self.record(op::LIST_COMMENTS)?.comments.clone())
    }

    async fn delete_comment(&self, id: CommentId) -> Result<(), ApiError> {
        let mut state = self.record(op::DELETE_COMMENT)?;
        state.comments.retain(|c| c.id != id);
        Ok(())
    }

    async fn list_messages(&self) -> Result<Vec<Message>, ApiError> {
        Ok(self.record(op::LIST_MESSAGES)?.messages.clone())
    }

    async fn reply_to_message(&self, id: MessageId, reply: &str) -> Result<(), ApiError> {
        let mut state = self.record(op::REPLY)?;
        state.replies.push((id, reply.to_string()));
        Ok(())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        Ok(self.record(op::LIST_CUSTOMERS)?.customers.clone())
    }

    async fn count(&self, counter: Counter) -> Result<u64, ApiError> {
        let state = self.record(op::COUNT)?;
        let count = match counter {
            Counter::Customers => state.customers.len(),
            Counter::Products => state.products.len(),
            Counter::Orders => 7,
        };
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.record(op::LIST_CATEGORIES)?.categories.clone())
    }

    async fn list_occasions(&self) -> Result<Vec<Occasion>, ApiError> {
        Ok(self.record(op::LIST_OCCASIONS)?.occasions.clone())
    }
}
