//! Comment moderation commands.

use storedesk_admin::pages::Pages;
use storedesk_admin::view::{CommentFilter, LoadOutcome};
use storedesk_core::CommentId;

use super::{CommandError, ensure_loaded, report};

/// List comments matching `search` and `status`.
///
/// # Errors
///
/// Returns error if `status` is unknown or the comments fail to load.
pub async fn list(pages: &Pages, search: &str, status: &str) -> Result<(), CommandError> {
    let filter: CommentFilter = status.parse().map_err(CommandError::usage)?;

    let page = &pages.comments;
    let outcome = page.mount().await;
    let snapshot = page.snapshot().await;
    ensure_loaded(outcome, "comments", snapshot.error)?;

    let comments = page.visible(search, filter).await;
    tracing::info!("{} of {} comments", comments.len(), snapshot.data.len());
    for comment in &comments {
        tracing::info!(
            "#{:<5} {:<9} {:>2} reports  {}: {}",
            comment.id,
            comment.moderation().label(),
            comment.report_count(),
            comment.author_name(),
            comment.text()
        );
    }
    Ok(())
}

/// Show the reports filed against one comment.
///
/// # Errors
///
/// Returns error if the comments fail to load or `id` is not among them.
pub async fn reports(pages: &Pages, id: CommentId) -> Result<(), CommandError> {
    let page = &pages.comments;
    let outcome = page.mount().await;
    ensure_loaded(outcome, "comments", page.snapshot().await.error)?;

    let comment = page
        .reports(id)
        .await
        .ok_or_else(|| CommandError::NotFound(format!("comment #{id}")))?;

    tracing::info!("{}: {}", comment.author_name(), comment.text());
    tracing::info!("Status: {}", comment.moderation());
    if comment.reports().is_empty() {
        tracing::info!("No reports");
    }
    for report in comment.reports() {
        tracing::info!(
            "  [{}] {} by {} on {}",
            report.status(),
            report.reason(),
            report.reporter_name(),
            report.created_at()
        );
        if let Some(notes) = report.moderator_notes() {
            tracing::info!("      notes: {notes}");
        }
    }
    Ok(())
}

/// Delete a comment.
///
/// # Errors
///
/// Returns error if the backend rejects the delete.
pub async fn delete(pages: &Pages, id: CommentId) -> Result<(), CommandError> {
    let refetch = report(
        pages.comments.delete(id).await,
        "Comment deleted successfully",
        "Failed to delete comment",
    )?;
    if refetch != LoadOutcome::Loaded {
        tracing::warn!("Report counts could not be refreshed");
    }
    Ok(())
}
