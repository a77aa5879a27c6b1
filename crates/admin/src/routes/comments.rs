//! Comment moderation route handlers.

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use storedesk_core::{CommentId, ModerationStatus, ReportStatus};

use crate::{
    error::AppError,
    filters,
    middleware::{set_flash, take_flash},
    models::{Comment, Report},
    state::AppState,
    view::{CommentFilter, Notice},
};

use super::{ListQuery, LoadView, products::FilterTab, render};

/// Comment row for templates.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub id: CommentId,
    pub text: String,
    pub author: String,
    pub created_at: String,
    pub report_count: u32,
    pub moderation: ModerationStatus,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            text: comment.text().to_owned(),
            author: comment.author_name().to_owned(),
            created_at: comment.created_at(),
            report_count: comment.report_count(),
            moderation: comment.moderation(),
        }
    }
}

/// Report row for templates.
#[derive(Debug, Clone)]
pub struct ReportView {
    pub reason: String,
    pub status: ReportStatus,
    pub moderator_notes: Option<String>,
    pub reporter: String,
    pub created_at: String,
}

impl From<&Report> for ReportView {
    fn from(report: &Report) -> Self {
        Self {
            reason: report.reason().to_owned(),
            status: report.status(),
            moderator_notes: report.moderator_notes().map(str::to_owned),
            reporter: report.reporter_name().to_owned(),
            created_at: report.created_at(),
        }
    }
}

/// Comments list page template.
#[derive(Template)]
#[template(path = "comments/index.html")]
pub struct CommentsIndexTemplate {
    pub current_path: &'static str,
    pub notice: Option<Notice>,
    pub load: LoadView,
    pub comments: Vec<CommentView>,
    pub total: usize,
    pub reported: usize,
    pub search: String,
    pub filter: &'static str,
    pub tabs: Vec<FilterTab>,
}

/// Reports dialog template.
#[derive(Template)]
#[template(path = "comments/reports.html")]
pub struct CommentReportsTemplate {
    pub current_path: &'static str,
    pub notice: Option<Notice>,
    pub comment: CommentView,
    pub reports: Vec<ReportView>,
}

/// Build the comments router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/comments", get(index))
        .route("/comments/{id}/reports", get(reports))
        .route("/comments/{id}/delete", post(delete))
}

/// Comments list page handler.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let page = &state.pages().comments;
    if query.wants_refresh() {
        page.refresh().await;
    } else {
        page.mount().await;
    }

    let filter: CommentFilter = query.filter();
    let snapshot = page.snapshot().await;
    let reported = snapshot
        .data
        .iter()
        .filter(|c| c.moderation() != ModerationStatus::Clean)
        .count();
    let comments = page
        .visible(&query.search, filter)
        .await
        .iter()
        .map(CommentView::from)
        .collect();

    render(&CommentsIndexTemplate {
        current_path: "/comments",
        notice: take_flash(&session).await,
        load: LoadView::new(snapshot.loading, snapshot.error),
        comments,
        total: snapshot.data.len(),
        reported,
        search: query.search,
        filter: filter.as_str(),
        tabs: CommentFilter::ALL
            .iter()
            .map(|f| FilterTab {
                value: f.as_str(),
                label: f.label(),
                selected: *f == filter,
            })
            .collect(),
    })
}

/// Reports filed against one comment.
#[instrument(skip(state, session))]
pub async fn reports(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<CommentId>,
) -> Result<Html<String>, AppError> {
    let page = &state.pages().comments;
    page.mount().await;

    let comment = page
        .reports(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("comment {id}")))?;

    Ok(render(&CommentReportsTemplate {
        current_path: "/comments",
        notice: take_flash(&session).await,
        reports: comment.reports().iter().map(ReportView::from).collect(),
        comment: CommentView::from(&comment),
    }))
}

/// Delete a comment and refetch the table.
#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<CommentId>,
) -> Result<Redirect, AppError> {
    let result = state.pages().comments.delete(id).await;
    let notice = Notice::from_outcome(&result, "Comment deleted successfully", "Failed to delete comment");
    set_flash(&session, notice).await?;
    Ok(Redirect::to("/comments"))
}
