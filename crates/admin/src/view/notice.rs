//! Transient notifications shown after an action.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::DispatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

impl NoticeLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// A one-shot message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    /// Notice for a dispatched action.
    ///
    /// Validation failures show their own message. Network failures show
    /// `failure` and are logged with the underlying error.
    pub fn from_outcome<T>(
        result: &Result<T, DispatchError>,
        success: &str,
        failure: &str,
    ) -> Self {
        match result {
            Ok(_) => Self::success(success),
            Err(DispatchError::Validation(e)) => Self::error(e.to_string()),
            Err(DispatchError::Network(e)) => {
                warn!(error = %e, "{failure}");
                Self::error(failure)
            }
        }
    }
}
