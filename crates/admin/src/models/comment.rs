//! Comments and the abuse reports filed against them.

use serde::{Deserialize, Serialize};

use storedesk_core::{CommentId, ModerationStatus, ReportId, ReportStatus};

use super::timestamp::{date_time_or_blank, Timestamp};
use super::{Entity, lenient, non_empty};

const ANONYMOUS: &str = "Anonymous";
const NO_REASON: &str = "No reason provided";

/// The user attached to a comment or report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Author {
    /// Username, else email, if either is set.
    #[must_use]
    pub fn handle(&self) -> Option<&str> {
        non_empty(self.username.as_ref()).or_else(|| non_empty(self.email.as_ref()))
    }
}

/// Display name for an optional author.
fn display_name(author: Option<&Author>) -> &str {
    author.and_then(Author::handle).unwrap_or(ANONYMOUS)
}

/// A single abuse report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: Option<ReportStatus>,
    #[serde(default)]
    pub moderator_notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default, rename = "User")]
    pub reporter: Option<Author>,
}

impl Report {
    #[must_use]
    pub fn reason(&self) -> &str {
        non_empty(self.reason.as_ref()).unwrap_or(NO_REASON)
    }

    #[must_use]
    pub fn status(&self) -> ReportStatus {
        self.status.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn moderator_notes(&self) -> Option<&str> {
        non_empty(self.moderator_notes.as_ref())
    }

    #[must_use]
    pub fn reporter_name(&self) -> &str {
        display_name(self.reporter.as_ref())
    }

    #[must_use]
    pub fn created_at(&self) -> String {
        date_time_or_blank(self.created_at.as_ref())
    }
}

/// A user comment with its embedded reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, rename = "User")]
    pub author: Option<Author>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "lenient::count_u32")]
    pub report_count: Option<u32>,
    #[serde(default)]
    pub reports: Option<Vec<Report>>,
}

impl Entity for Comment {
    type Id = CommentId;

    fn id(&self) -> CommentId {
        self.id
    }
}

impl Comment {
    #[must_use]
    pub fn text(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn author_name(&self) -> &str {
        display_name(self.author.as_ref())
    }

    /// Author handle used for search (no "Anonymous" placeholder).
    #[must_use]
    pub fn author_handle(&self) -> &str {
        self.author.as_ref().and_then(Author::handle).unwrap_or("")
    }

    #[must_use]
    pub fn report_count(&self) -> u32 {
        self.report_count.unwrap_or(0)
    }

    #[must_use]
    pub fn reports(&self) -> &[Report] {
        self.reports.as_deref().unwrap_or(&[])
    }

    #[must_use]
    pub fn moderation(&self) -> ModerationStatus {
        ModerationStatus::classify(self.report_count())
    }

    #[must_use]
    pub fn created_at(&self) -> String {
        date_time_or_blank(self.created_at.as_ref())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_backend_shape() {
        let comment: Comment = serde_json::from_str(
            r#"{
                "id": 11,
                "comment": "Great mug",
                "createdAt": "2024-05-01T10:00:00Z",
                "reportCount": "2",
                "User": {"username": "", "email": "a@b.co"},
                "reports": [
                    {"id": 1, "reason": "spam", "status": "resolved", "moderatorNotes": "ok"},
                    {"id": 2, "User": null}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(comment.text(), "Great mug");
        assert_eq!(comment.author_name(), "a@b.co");
        assert_eq!(comment.report_count(), 2);
        assert_eq!(comment.moderation(), ModerationStatus::Reported);
        assert_eq!(comment.reports().len(), 2);

        let second = &comment.reports()[1];
        assert_eq!(second.reason(), "No reason provided");
        assert_eq!(second.status(), ReportStatus::Pending);
        assert_eq!(second.reporter_name(), "Anonymous");
        assert!(second.moderator_notes().is_none());
    }

    #[test]
    fn test_missing_fields_resolve_to_defaults() {
        let comment: Comment = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(comment.text(), "");
        assert_eq!(comment.author_name(), "Anonymous");
        assert_eq!(comment.author_handle(), "");
        assert_eq!(comment.report_count(), 0);
        assert_eq!(comment.moderation(), ModerationStatus::Clean);
        assert!(comment.reports().is_empty());
        assert_eq!(comment.created_at(), "");
    }
}
