//! Customer route handlers.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    routing::get,
};
use tower_sessions::Session;
use tracing::instrument;

use storedesk_core::CustomerId;

use crate::{
    error::AppError,
    export::{EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME},
    filters,
    middleware::take_flash,
    models::Customer,
    state::AppState,
    view::Notice,
};

use super::{ListQuery, LoadView, render};

/// Customer row for templates.
#[derive(Debug, Clone)]
pub struct CustomerView {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_customer: bool,
    pub joined_on: String,
}

impl From<&Customer> for CustomerView {
    fn from(customer: &Customer) -> Self {
        let role = customer.role();
        Self {
            id: customer.id,
            name: customer.full_name(),
            email: customer.email().to_owned(),
            is_customer: role.is_customer(),
            role: role.to_string(),
            joined_on: customer.joined_on(),
        }
    }
}

/// Customers list page template.
#[derive(Template)]
#[template(path = "customers/index.html")]
pub struct CustomersIndexTemplate {
    pub current_path: &'static str,
    pub notice: Option<Notice>,
    pub load: LoadView,
    pub customers: Vec<CustomerView>,
    pub search: String,
}

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(index))
        .route("/customers/export", get(export))
}

/// Customers list page handler.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let page = &state.pages().customers;
    if query.wants_refresh() {
        page.refresh().await;
    } else {
        page.mount().await;
    }

    let snapshot = page.snapshot().await;
    let customers = page
        .visible(&query.search)
        .await
        .iter()
        .map(CustomerView::from)
        .collect();

    render(&CustomersIndexTemplate {
        current_path: "/customers",
        notice: take_flash(&session).await,
        load: LoadView::new(snapshot.loading, snapshot.error),
        customers,
        search: query.search,
    })
}

/// Download the loaded customers as a PDF.
#[instrument(skip(state))]
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let page = &state.pages().customers;
    page.mount().await;

    let document = page.export().await.to_pdf()?;
    Ok((
        [
            (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        document,
    ))
}
