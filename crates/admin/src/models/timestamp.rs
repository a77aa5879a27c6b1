//! Backend timestamps.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A timestamp exactly as the backend sent it.
///
/// Parsing is deferred to display time; a value that is not RFC 3339 is
/// shown verbatim instead of failing the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Wrap a raw timestamp string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parsed value, if the backend sent RFC 3339.
    #[must_use]
    pub fn parsed(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(self.0.trim()).ok()
    }

    /// Calendar date for tables and exports (e.g. `2024-03-09`).
    #[must_use]
    pub fn date(&self) -> String {
        self.parsed()
            .map_or_else(|| self.0.clone(), |dt| dt.format("%Y-%m-%d").to_string())
    }

    /// Date and time for detail views (e.g. `2024-03-09 14:05`).
    #[must_use]
    pub fn date_time(&self) -> String {
        self.parsed().map_or_else(
            || self.0.clone(),
            |dt| dt.format("%Y-%m-%d %H:%M").to_string(),
        )
    }
}

/// Date of an optional timestamp, empty when missing.
#[must_use]
pub fn date_or_blank(ts: Option<&Timestamp>) -> String {
    ts.map(Timestamp::date).unwrap_or_default()
}

/// Date and time of an optional timestamp, empty when missing.
#[must_use]
pub fn date_time_or_blank(ts: Option<&Timestamp>) -> String {
    ts.map(Timestamp::date_time).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_rfc3339() {
        let ts = Timestamp::new("2024-03-09T14:05:00.000Z");
        assert_eq!(ts.date(), "2024-03-09");
        assert_eq!(ts.date_time(), "2024-03-09 14:05");
    }

    #[test]
    fn test_falls_back_to_raw_string() {
        let ts = Timestamp::new("last tuesday");
        assert!(ts.parsed().is_none());
        assert_eq!(ts.date(), "last tuesday");
        assert_eq!(date_or_blank(None), "");
    }
}
