//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Catalog status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
}

impl ProductStatus {
    /// Wire value sent in multipart forms.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

/// Review state of a single abuse report against a comment.
///
/// The backend's set of states is open-ended; anything other than
/// `pending` and `resolved` is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportStatus {
    #[default]
    Pending,
    Resolved,
    Other(String),
}

impl ReportStatus {
    /// Wire value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ReportStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "resolved" => Self::Resolved,
            _ => Self::Other(s),
        }
    }
}

impl From<ReportStatus> for String {
    fn from(status: ReportStatus) -> Self {
        match status {
            ReportStatus::Pending => "pending".to_string(),
            ReportStatus::Resolved => "resolved".to_string(),
            ReportStatus::Other(s) => s,
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation severity of a comment, derived from its report count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    /// No reports.
    Clean,
    /// Between one and [`ModerationStatus::CRITICAL_ABOVE`] reports.
    Reported,
    /// More than [`ModerationStatus::CRITICAL_ABOVE`] reports.
    Critical,
}

impl ModerationStatus {
    /// A comment with strictly more reports than this is critical.
    pub const CRITICAL_ABOVE: u32 = 3;

    /// Classify a comment by its report count.
    ///
    /// ```
    /// use storedesk_core::ModerationStatus;
    ///
    /// assert_eq!(ModerationStatus::classify(0), ModerationStatus::Clean);
    /// assert_eq!(ModerationStatus::classify(3), ModerationStatus::Reported);
    /// assert_eq!(ModerationStatus::classify(4), ModerationStatus::Critical);
    /// ```
    #[must_use]
    pub const fn classify(report_count: u32) -> Self {
        if report_count == 0 {
            Self::Clean
        } else if report_count > Self::CRITICAL_ABOVE {
            Self::Critical
        } else {
            Self::Reported
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clean => "Clean",
            Self::Reported => "Reported",
            Self::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Account role of a shop customer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CustomerRole {
    #[default]
    Customer,
    Admin,
    Other(String),
}

impl CustomerRole {
    /// Wire value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
            Self::Other(s) => s,
        }
    }

    /// Whether this is a regular shopping account.
    #[must_use]
    pub const fn is_customer(&self) -> bool {
        matches!(self, Self::Customer)
    }
}

impl From<String> for CustomerRole {
    fn from(s: String) -> Self {
        match s.as_str() {
            "customer" => Self::Customer,
            "admin" => Self::Admin,
            _ => Self::Other(s),
        }
    }
}

impl From<CustomerRole> for String {
    fn from(role: CustomerRole) -> Self {
        role.as_str().to_owned()
    }
}

impl std::fmt::Display for CustomerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
