//! REST client for the shop backend.
//!
//! This module provides:
//! - [`BackendClient`], a reqwest-based client for every endpoint the panel uses
//! - [`AdminApi`], the trait the view-state controllers are written against,
//!   so they can be driven by a scripted fake in tests
//!
//! # Endpoints
//!
//! ```text
//! GET    /api/getAllProducts                          { products: [Product] }
//! POST   /api/create-products                         multipart -> { product }
//! PUT    /api/update-products/:id                     multipart -> { product }
//! DELETE /api/products-delete/:id
//! GET    /api/comment-reports/comments-with-reports   [Comment]
//! DELETE /api/comment-reports/comment/:id
//! GET    /api/messages                                [Message]
//! POST   /api/messages/:id/reply                      { replyContent }
//! GET    /api/customers-users                         [Customer]
//! GET    /api/customers/count                         { count }
//! GET    /api/count-products                          { count }
//! GET    /api/orders/count                            { count }
//! GET    /categories/get-all-categories               [Category]
//! GET    /api/occasion/get-all                        { data: [Occasion] }
//! ```

mod catalog;
mod comments;
mod customers;
mod error;
mod messages;
mod products;
mod stats;
pub mod types;

pub use error::ApiError;
pub use stats::Counter;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::Value;
use url::Url;

use storedesk_core::{CommentId, MessageId, ProductId};

use crate::config::BackendConfig;
use crate::models::{Category, Comment, Customer, Message, Occasion, Product, ProductForm};

/// Operations the admin panel performs against the backend.
///
/// Each method issues exactly one request.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;
    async fn create_product(&self, form: &ProductForm) -> Result<Product, ApiError>;
    async fn update_product(&self, id: ProductId, form: &ProductForm)
    -> Result<Product, ApiError>;
    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError>;

    async fn list_comments(&self) -> Result<Vec<Comment>, ApiError>;
    async fn delete_comment(&self, id: CommentId) -> Result<(), ApiError>;

    async fn list_messages(&self) -> Result<Vec<Message>, ApiError>;
    async fn reply_to_message(&self, id: MessageId, reply: &str) -> Result<(), ApiError>;

    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError>;
    async fn count(&self, counter: Counter) -> Result<u64, ApiError>;

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;
    async fn list_occasions(&self) -> Result<Vec<Occasion>, ApiError>;
}

/// Shop backend API client.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.api_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| ApiError::Decode(format!("Invalid API token format: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// The backend origin (used to resolve relative image paths).
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build the absolute URL of an endpoint path.
    fn url(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    /// GET a path and return the raw JSON body.
    pub(crate) async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let response = self.inner.client.get(self.url(path)?).send().await?;
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))
    }

    /// Send a prepared request and parse the JSON body as `T`.
    pub(crate) async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = Self::check_status(request.send().await?).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))
    }

    /// Send a prepared request, ignoring any body on success.
    pub(crate) async fn send_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ApiError> {
        Self::check_status(request.send().await?).await?;
        Ok(())
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    /// Map non-2xx responses to [`ApiError::Status`].
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .ok()
            .filter(|body| !body.trim().is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AdminApi for BackendClient {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_products().await
    }

    async fn create_product(&self, form: &ProductForm) -> Result<Product, ApiError> {
        self.post_product(form).await
    }

    async fn update_product(
        &self,
        id: ProductId,
        form: &ProductForm,
    ) -> Result<Product, ApiError> {
        self.put_product(id, form).await
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.remove_product(id).await
    }

    async fn list_comments(&self) -> Result<Vec<Comment>, ApiError> {
        self.get_comments_with_reports().await
    }

    async fn delete_comment(&self, id: CommentId) -> Result<(), ApiError> {
        self.remove_comment(id).await
    }

    async fn list_messages(&self) -> Result<Vec<Message>, ApiError> {
        self.get_messages().await
    }

    async fn reply_to_message(&self, id: MessageId, reply: &str) -> Result<(), ApiError> {
        self.post_reply(id, reply).await
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.get_customers().await
    }

    async fn count(&self, counter: Counter) -> Result<u64, ApiError> {
        self.get_count(counter).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_categories().await
    }

    async fn list_occasions(&self) -> Result<Vec<Occasion>, ApiError> {
        self.get_occasions().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::parse_backend_url;

    #[test]
    fn test_url_joins_paths_onto_origin() {
        let config = BackendConfig::new(parse_backend_url("http://localhost:5000/").unwrap());
        let client = BackendClient::new(&config).unwrap();
        assert_eq!(
            client.url("/api/messages").unwrap().as_str(),
            "http://localhost:5000/api/messages"
        );
    }

    #[test]
    fn test_url_keeps_path_prefix() {
        let config = BackendConfig::new(parse_backend_url("http://gateway.local/shop").unwrap());
        let client = BackendClient::new(&config).unwrap();
        assert_eq!(
            client.url("/api/getAllProducts").unwrap().as_str(),
            "http://gateway.local/shop/api/getAllProducts"
        );
    }
}
