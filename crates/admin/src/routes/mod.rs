//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//!
//! # Dashboard
//! GET  /                            - Customer, product and order counts
//!
//! # Auth
//! GET  /auth/sign-in                - Sign-in page
//!
//! # Products
//! GET  /products                    - Product table (?search=&status=&refresh=1)
//! GET  /products/new                - Create form
//! POST /products                    - Create (multipart)
//! POST /products/{id}/edit          - Enter edit mode
//! POST /products/{id}               - Save draft (multipart)
//! POST /products/edit/cancel        - Discard draft
//! POST /products/{id}/delete        - Delete
//!
//! # Comments
//! GET  /comments                    - Moderation table (?search=&status=&refresh=1)
//! GET  /comments/{id}/reports       - Reports filed against a comment
//! POST /comments/{id}/delete        - Delete, then refetch
//!
//! # Messages
//! GET  /messages                    - Message cards (?search=&refresh=1)
//! GET  /messages/{id}/reply         - Reply form
//! POST /messages/{id}/reply         - Send reply
//! POST /messages/reply/cancel       - Close reply form
//!
//! # Customers
//! GET  /customers                   - Customer table (?search=&refresh=1)
//! GET  /customers/export            - Download the customer list as PDF
//! ```
//!
//! Mutations answer with a redirect and leave a flash notice in the session.

pub mod auth;
pub mod comments;
pub mod customers;
pub mod dashboard;
pub mod messages;
pub mod products;

use askama::Template;
use axum::{Router, response::Html, routing::get};
use serde::Deserialize;

use crate::state::AppState;

/// Build the full admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(dashboard::router())
        .merge(auth::router())
        .merge(products::router())
        .merge(comments::router())
        .merge(messages::router())
        .merge(customers::router())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backend.
async fn health() -> &'static str {
    "ok"
}

/// Query parameters shared by the list pages.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Search box contents.
    #[serde(default)]
    pub search: String,
    /// Status filter value (`all` when missing or unknown).
    pub status: Option<String>,
    /// Refetch instead of reusing loaded data.
    pub refresh: Option<String>,
}

impl ListQuery {
    /// Whether the page should refetch its data.
    #[must_use]
    pub fn wants_refresh(&self) -> bool {
        self.refresh
            .as_deref()
            .is_some_and(|v| matches!(v, "1" | "true" | "yes"))
    }

    /// Parsed status filter, falling back to the filter's default.
    #[must_use]
    pub fn filter<F: std::str::FromStr + Default>(&self) -> F {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

/// Loading/error banner state for a page.
#[derive(Debug, Clone, Default)]
pub struct LoadView {
    pub loading: bool,
    pub error: Option<String>,
}

impl LoadView {
    #[must_use]
    pub const fn new(loading: bool, error: Option<String>) -> Self {
        Self { loading, error }
    }
}

/// Render a template, logging failures.
fn render(template: &impl Template) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::CommentFilter;

    #[test]
    fn test_list_query_filter_fallback() {
        let query = ListQuery {
            status: Some("reported".to_string()),
            ..ListQuery::default()
        };
        assert_eq!(query.filter::<CommentFilter>(), CommentFilter::Reported);

        let query = ListQuery {
            status: Some("bogus".to_string()),
            ..ListQuery::default()
        };
        assert_eq!(query.filter::<CommentFilter>(), CommentFilter::All);
    }

    #[test]
    fn test_refresh_flag() {
        let query = ListQuery {
            refresh: Some("1".to_string()),
            ..ListQuery::default()
        };
        assert!(query.wants_refresh());
        assert!(!ListQuery::default().wants_refresh());
    }
}
