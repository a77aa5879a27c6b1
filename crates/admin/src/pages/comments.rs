//! Comment moderation: list with report counts, reports dialog, delete.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use storedesk_core::CommentId;

use crate::backend::AdminApi;
use crate::models::Comment;
use crate::view::{
    CommentFilter, DispatchError, ListController, LoadOutcome, ViewController, ViewState, project,
};

/// Comments page controller.
pub struct CommentsPage {
    api: Arc<dyn AdminApi>,
    comments: ListController<Comment>,
}

impl CommentsPage {
    #[must_use]
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            api,
            comments: ViewController::new("comments"),
        }
    }

    pub async fn mount(&self) -> LoadOutcome {
        self.comments.mount(self.api.list_comments()).await
    }

    pub async fn refresh(&self) -> LoadOutcome {
        self.comments.load(self.api.list_comments()).await
    }

    pub async fn detach(&self) {
        self.comments.detach().await;
    }

    pub async fn snapshot(&self) -> ViewState<Vec<Comment>> {
        self.comments.snapshot().await
    }

    /// Rows matching the search term and moderation filter, in list order.
    pub async fn visible(&self, search: &str, filter: CommentFilter) -> Vec<Comment> {
        self.comments
            .with(|comments| {
                project(comments, search, filter)
                    .into_iter()
                    .cloned()
                    .collect()
            })
            .await
    }

    /// The comment whose reports dialog is opened.
    pub async fn reports(&self, id: CommentId) -> Option<Comment> {
        self.comments.find(id).await
    }

    /// Delete a comment, then refetch so report counts match the backend.
    ///
    /// The row is removed locally as soon as the delete succeeds. The
    /// returned outcome is the refetch's: anything but
    /// [`LoadOutcome::Loaded`] means the counts shown may be out of date.
    ///
    /// # Errors
    ///
    /// Returns error if the delete request fails; the list is untouched.
    #[instrument(skip(self), fields(comment_id = %id))]
    pub async fn delete(&self, id: CommentId) -> Result<LoadOutcome, DispatchError> {
        self.api.delete_comment(id).await?;

        self.comments.remove(id).await;
        info!("Comment deleted");

        let outcome = self.refresh().await;
        if outcome != LoadOutcome::Loaded {
            warn!(?outcome, "Report counts not refreshed after delete");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use storedesk_core::ModerationStatus;

    use super::*;
    use crate::pages::fake::{FakeApi, op};

    fn fake() -> FakeApi {
        FakeApi::new().with_comments(json!([
            {"id": 1, "comment": "Lovely", "reportCount": 0},
            {"id": 2, "comment": "Spam spam", "reportCount": 4, "reports": [
                {"id": 10, "reason": "spam", "status": "pending"},
                {"id": 11, "status": "resolved", "moderatorNotes": "warned"}
            ]},
            {"id": 3, "comment": "Rude", "reportCount": 2}
        ]))
    }

    async fn mounted(api: &FakeApi) -> CommentsPage {
        let page = CommentsPage::new(Arc::new(api.clone()));
        page.mount().await;
        page
    }

    fn ids(comments: &[Comment]) -> Vec<i32> {
        comments.iter().map(|c| c.id.as_i32()).collect()
    }

    #[tokio::test]
    async fn test_delete_refetches_counts() {
        let api = fake();
        let page = mounted(&api).await;

        api.set_report_count(3, 5);
        assert_eq!(page.delete(CommentId::new(2)).await.unwrap(), LoadOutcome::Loaded);

        let comments = page.snapshot().await.data;
        assert_eq!(ids(&comments), vec![1, 3]);
        assert_eq!(comments[1].moderation(), ModerationStatus::Critical);
        assert_eq!(api.call_count(op::LIST_COMMENTS), 2);
    }

    #[tokio::test]
    async fn test_delete_survives_failed_refetch() {
        let api = fake();
        let page = mounted(&api).await;

        api.fail(op::LIST_COMMENTS);
        assert_eq!(page.delete(CommentId::new(1)).await.unwrap(), LoadOutcome::Failed);

        let state = page.snapshot().await;
        assert_eq!(ids(&state.data), vec![2, 3]);
        assert!(state.error.is_some());
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_state_identical() {
        let api = fake();
        let page = mounted(&api).await;
        let before = page.snapshot().await;

        api.fail(op::DELETE_COMMENT);
        assert!(page.delete(CommentId::new(2)).await.is_err());

        assert_eq!(page.snapshot().await, before);
        assert_eq!(api.call_count(op::LIST_COMMENTS), 1);
    }

    #[tokio::test]
    async fn test_reports_dialog() {
        let api = fake();
        let page = mounted(&api).await;

        let comment = page.reports(CommentId::new(2)).await.unwrap();
        let reasons: Vec<&str> = comment.reports().iter().map(|r| r.reason()).collect();
        assert_eq!(reasons, vec!["spam", "No reason provided"]);
        assert!(page.reports(CommentId::new(99)).await.is_none());
    }

    #[tokio::test]
    async fn test_visible_by_moderation() {
        let api = fake();
        let page = mounted(&api).await;

        assert_eq!(ids(&page.visible("", CommentFilter::Reported).await), vec![2, 3]);
        assert_eq!(ids(&page.visible("", CommentFilter::Clean).await), vec![1]);
        assert_eq!(ids(&page.visible("SPAM", CommentFilter::All).await), vec![2]);
    }

    #[tokio::test]
    async fn test_failed_load_exposes_error_with_empty_data() {
        let api = fake();
        api.fail(op::LIST_COMMENTS);
        let page = CommentsPage::new(Arc::new(api.clone()));

        assert_eq!(page.mount().await, LoadOutcome::Failed);
        let state = page.snapshot().await;
        assert!(state.data.is_empty());
        assert!(!state.loading);
        assert!(state.error.unwrap().contains("500"));
    }
}
