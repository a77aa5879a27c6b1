//! Product route handlers: table with inline edit, create form, delete.

use askama::Template;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;
use url::Url;

use storedesk_core::{CategoryId, OccasionId, ProductId, ProductStatus};

use crate::{
    error::AppError,
    filters,
    middleware::{set_flash, take_flash},
    models::{
        Category, DraftImage, ImageUpload, Occasion, Product, ProductDraft, resolve_image_url,
    },
    state::AppState,
    view::{Notice, ProductFilter},
};

use super::{ListQuery, LoadView, render};

/// Largest accepted create/update body (image included).
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Product row for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: i64,
    pub status: &'static str,
    pub status_class: &'static str,
    pub image_url: Option<String>,
    /// Inline edit form values when this row is in edit mode.
    pub draft: Option<DraftView>,
}

impl ProductView {
    fn new(product: &Product, origin: &Url) -> Self {
        let status = product.status();
        Self {
            id: product.id,
            name: product.name().to_owned(),
            description: product.description().to_owned(),
            price: product.price().display(),
            stock: product.stock(),
            status: status.label(),
            status_class: match status {
                ProductStatus::Active => "chip-active",
                ProductStatus::Inactive => "chip-inactive",
            },
            image_url: product.image_url(origin),
            draft: None,
        }
    }
}

/// Draft fields for the edit row and create form.
#[derive(Debug, Clone, Default)]
pub struct DraftView {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub status: &'static str,
    pub current_image: Option<String>,
    pub category_id: Option<CategoryId>,
    pub occasion_id: Option<OccasionId>,
}

impl DraftView {
    fn new(draft: &ProductDraft, origin: &Url) -> Self {
        let current_image = match &draft.image {
            DraftImage::Keep(Some(path)) => resolve_image_url(origin, path),
            DraftImage::Keep(None) | DraftImage::Replace(_) => None,
        };
        Self {
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price.clone(),
            stock: draft.stock.clone(),
            status: draft.status.as_str(),
            current_image,
            category_id: draft.category_id,
            occasion_id: draft.occasion_id,
        }
    }

    #[must_use]
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn has_category(&self, id: &CategoryId) -> bool {
        self.category_id == Some(*id)
    }

    #[must_use]
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn has_occasion(&self, id: &OccasionId) -> bool {
        self.occasion_id == Some(*id)
    }
}

/// Filter tab for templates.
#[derive(Debug, Clone)]
pub struct FilterTab {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Products list page template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub current_path: &'static str,
    pub notice: Option<Notice>,
    pub load: LoadView,
    pub products: Vec<ProductView>,
    pub total: usize,
    pub search: String,
    pub filter: &'static str,
    pub tabs: Vec<FilterTab>,
}

/// Create product page template.
#[derive(Template)]
#[template(path = "products/new.html")]
pub struct ProductsNewTemplate {
    pub current_path: &'static str,
    pub notice: Option<Notice>,
    pub draft: DraftView,
    pub categories: Vec<Category>,
    pub occasions: Vec<Occasion>,
}

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(index).post(create))
        .route("/products/new", get(new))
        .route("/products/edit/cancel", post(cancel_edit))
        .route("/products/{id}", post(save))
        .route("/products/{id}/edit", post(begin_edit))
        .route("/products/{id}/delete", post(delete))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// Products list page handler.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let page = &state.pages().products;
    if query.wants_refresh() {
        page.refresh().await;
    } else {
        page.mount().await;
    }

    let filter: ProductFilter = query.filter();
    let origin = state.backend_origin();
    let snapshot = page.snapshot().await;
    let edit = page.edit_state().await;
    let products = page
        .visible(&query.search, filter)
        .await
        .iter()
        .map(|product| {
            let mut view = ProductView::new(product, origin);
            view.draft = edit
                .draft_for(product.id)
                .map(|draft| DraftView::new(draft, origin));
            view
        })
        .collect();

    render(&ProductsIndexTemplate {
        current_path: "/products",
        notice: take_flash(&session).await,
        load: LoadView::new(snapshot.loading, snapshot.error),
        products,
        total: snapshot.data.len(),
        search: query.search,
        filter: filter.as_str(),
        tabs: ProductFilter::ALL
            .iter()
            .map(|f| FilterTab {
                value: f.as_str(),
                label: f.label(),
                selected: *f == filter,
            })
            .collect(),
    })
}

/// Create form handler.
#[instrument(skip(state, session))]
pub async fn new(State(state): State<AppState>, session: Session) -> Html<String> {
    render_new(&state, take_flash(&session).await, &ProductDraft::default()).await
}

async fn render_new(state: &AppState, notice: Option<Notice>, draft: &ProductDraft) -> Html<String> {
    let page = &state.pages().products;
    page.mount_reference_data().await;

    render(&ProductsNewTemplate {
        current_path: "/products",
        notice,
        draft: DraftView::new(draft, state.backend_origin()),
        categories: page.categories().await,
        occasions: page.occasions().await,
    })
}

/// Create a product from the multipart form.
#[instrument(skip(state, session, multipart))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let draft = read_draft(multipart, DraftImage::default()).await?;
    let result = state.pages().products.create(&draft).await;
    let notice = Notice::from_outcome(&result, "Product created successfully", "Failed to create product");

    if result.is_ok() {
        set_flash(&session, notice).await?;
        Ok(Redirect::to("/products").into_response())
    } else {
        // Re-render with what was entered
        Ok(render_new(&state, Some(notice), &draft).await.into_response())
    }
}

/// Enter edit mode for a product.
#[instrument(skip(state, session))]
pub async fn begin_edit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Redirect, AppError> {
    let page = &state.pages().products;
    page.mount().await;
    if let Err(e) = page.begin_edit(id).await {
        set_flash(&session, Notice::error(e.to_string())).await?;
    }
    Ok(Redirect::to("/products"))
}

/// Discard the current draft.
#[instrument(skip(state, session))]
pub async fn cancel_edit(
    State(state): State<AppState>,
    session: Session,
) -> Result<Redirect, AppError> {
    state.pages().products.cancel_edit().await;
    set_flash(&session, Notice::info("Changes discarded")).await?;
    Ok(Redirect::to("/products"))
}

/// Save the draft of the product in edit mode.
#[instrument(skip(state, session, multipart))]
pub async fn save(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let page = &state.pages().products;
    let current_image = page
        .edit_state()
        .await
        .draft_for(id)
        .map(|draft| draft.image.clone())
        .unwrap_or_default();

    let draft = read_draft(multipart, current_image).await?;
    let result = page.save(id, draft).await;
    let notice = Notice::from_outcome(&result, "Product updated successfully", "Failed to update product");
    set_flash(&session, notice).await?;
    Ok(Redirect::to("/products"))
}

/// Delete a product.
#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Redirect, AppError> {
    let result = state.pages().products.delete(id).await;
    let notice = Notice::from_outcome(&result, "Product deleted successfully", "Failed to delete product");
    set_flash(&session, notice).await?;
    Ok(Redirect::to("/products"))
}

/// Read product fields from a multipart body.
///
/// An image part with no bytes means no file was picked; `image` is kept.
async fn read_draft(mut multipart: Multipart, image: DraftImage) -> Result<ProductDraft, AppError> {
    let mut draft = ProductDraft {
        image,
        ..ProductDraft::default()
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid form data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_owned();

        if name == "image" {
            let file_name = field.file_name().unwrap_or("upload").to_owned();
            let content_type = field.content_type().map(str::to_owned);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid image upload: {e}")))?;
            if !bytes.is_empty() {
                draft.image = DraftImage::Replace(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid form field {name}: {e}")))?;

        match name.as_str() {
            "name" => draft.name = value,
            "description" => draft.description = value,
            "price" => draft.price = value,
            "stock" => draft.stock = value,
            "status" => draft.status = value.parse().unwrap_or_default(),
            "categoryId" => draft.category_id = value.parse().ok(),
            "occasionId" => draft.occasion_id = value.parse().ok(),
            _ => {}
        }
    }

    Ok(draft)
}
