//! Comment moderation endpoints.

use tracing::{debug, instrument};

use storedesk_core::CommentId;

use super::types::decode_list;
use super::{ApiError, BackendClient};
use crate::models::Comment;

impl BackendClient {
    /// Fetch every comment with its reports embedded.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self))]
    pub async fn get_comments_with_reports(&self) -> Result<Vec<Comment>, ApiError> {
        let body = self
            .get_json("/api/comment-reports/comments-with-reports")
            .await?;
        let comments: Vec<Comment> = decode_list(body, "comments");
        debug!(count = comments.len(), "Fetched comments");
        Ok(comments)
    }

    /// Delete a comment (and its reports).
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend answers non-2xx.
    #[instrument(skip(self), fields(comment_id = %id))]
    pub async fn remove_comment(&self, id: CommentId) -> Result<(), ApiError> {
        let request = self
            .http()
            .delete(self.url(&format!("/api/comment-reports/comment/{id}"))?);
        self.send_empty(request).await?;
        debug!("Comment deleted");
        Ok(())
    }
}
