//! Search and status projection.
//!
//! [`project`] derives the visible rows from loaded data plus the transient
//! search term and status filter. It is pure and preserves source order.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use storedesk_core::{ModerationStatus, ProductStatus};

use crate::models::{Comment, Customer, Message, Product};

/// A record with text fields matched by the search box.
pub trait Searchable {
    /// Fields compared against the search term.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;
}

/// A closed set of status filters for `T`.
pub trait StatusFilter<T>: Copy {
    fn matches(self, item: &T) -> bool;
}

/// Filter rows by search term and status, preserving order.
///
/// Matching is a case-insensitive substring test against any searchable
/// field; an empty term matches everything.
pub fn project<'a, T, F>(items: &'a [T], search: &str, filter: F) -> Vec<&'a T>
where
    T: Searchable,
    F: StatusFilter<T>,
{
    let needle = search.to_lowercase();
    items
        .iter()
        .filter(|item| filter.matches(item))
        .filter(|item| {
            needle.is_empty()
                || item
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Error for an unrecognized filter value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter: {0}")]
pub struct UnknownFilter(String);

/// Comment moderation filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentFilter {
    #[default]
    All,
    /// At least one report.
    Reported,
    /// No reports.
    Clean,
}

impl CommentFilter {
    pub const ALL: [Self; 3] = [Self::All, Self::Reported, Self::Clean];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Reported => "reported",
            Self::Clean => "clean",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Reported => "Reported",
            Self::Clean => "Clean",
        }
    }
}

impl StatusFilter<Comment> for CommentFilter {
    fn matches(self, comment: &Comment) -> bool {
        match self {
            Self::All => true,
            Self::Reported => comment.moderation() != ModerationStatus::Clean,
            Self::Clean => comment.moderation() == ModerationStatus::Clean,
        }
    }
}

impl FromStr for CommentFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "reported" => Ok(Self::Reported),
            "clean" => Ok(Self::Clean),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

impl fmt::Display for CommentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product availability filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl ProductFilter {
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Inactive];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl StatusFilter<Product> for ProductFilter {
    fn matches(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Active => product.status() == ProductStatus::Active,
            Self::Inactive => product.status() == ProductStatus::Inactive,
        }
    }
}

impl FromStr for ProductFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

impl fmt::Display for ProductFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts everything; used where a page only has a search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoFilter;

impl<T> StatusFilter<T> for NoFilter {
    fn matches(self, _item: &T) -> bool {
        true
    }
}

impl Searchable for Comment {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.text()), Cow::Borrowed(self.author_handle())]
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.name()), Cow::Borrowed(self.description())]
    }
}

impl Searchable for Message {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.subject()),
            Cow::Borrowed(self.name()),
            Cow::Borrowed(self.email()),
            Cow::Borrowed(self.body()),
        ]
    }
}

impl Searchable for Customer {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Owned(self.full_name()),
            Cow::Borrowed(self.email()),
            Cow::Owned(self.role().to_string()),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn comments() -> Vec<Comment> {
        serde_json::from_value(json!([
            {"id": 1, "comment": "Lovely MUG", "reportCount": 0, "User": {"username": "ana"}},
            {"id": 2, "comment": "buy cheap pills", "reportCount": 5, "User": {"email": "spam@bot.io"}},
            {"id": 3, "comment": "Arrived broken", "reportCount": 1},
            {"id": 4, "comment": "great mug, would buy", "User": {"username": "Mugfan"}}
        ]))
        .unwrap()
    }

    fn ids(rows: &[&Comment]) -> Vec<i32> {
        rows.iter().map(|c| c.id.as_i32()).collect()
    }

    #[test]
    fn test_empty_search_returns_all_in_order() {
        let all = comments();
        assert_eq!(ids(&project(&all, "", CommentFilter::All)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_text_and_author() {
        let all = comments();
        assert_eq!(ids(&project(&all, "mug", CommentFilter::All)), vec![1, 4]);
        assert_eq!(ids(&project(&all, "BOT.IO", CommentFilter::All)), vec![2]);
        assert!(project(&all, "anonymous", CommentFilter::All).is_empty());
    }

    #[test]
    fn test_status_filter_partitions_by_report_count() {
        let all = comments();
        let clean = project(&all, "", CommentFilter::Clean);
        let reported = project(&all, "", CommentFilter::Reported);
        assert!(clean.iter().all(|c| c.report_count() == 0));
        assert!(reported.iter().all(|c| c.report_count() > 0));
        assert_eq!(clean.len() + reported.len(), all.len());
        assert_eq!(ids(&clean), vec![1, 4]);
    }

    #[test]
    fn test_search_and_filter_combine() {
        let all = comments();
        assert_eq!(ids(&project(&all, "mug", CommentFilter::Reported)), Vec::<i32>::new());
        assert_eq!(ids(&project(&all, "o", CommentFilter::Reported)), vec![2, 3]);
    }

    #[test]
    fn test_product_filter() {
        let products: Vec<Product> = serde_json::from_value(json!([
            {"id": 1, "name": "Candle", "status": "active"},
            {"id": 2, "name": "Card", "description": "birthday candle", "status": "inactive"},
            {"id": 3, "name": "Vase"}
        ]))
        .unwrap();
        let names = |rows: Vec<&Product>| rows.iter().map(|p| p.name().to_string()).collect::<Vec<_>>();
        assert_eq!(names(project(&products, "candle", ProductFilter::All)), vec!["Candle", "Card"]);
        assert_eq!(names(project(&products, "", ProductFilter::Active)), vec!["Candle", "Vase"]);
        assert_eq!(names(project(&products, "", ProductFilter::Inactive)), vec!["Card"]);
    }

    #[test]
    fn test_customer_search_matches_full_name() {
        let customers: Vec<Customer> = serde_json::from_value(json!([
            {"id": 1, "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com"},
            {"id": 2, "firstName": "Alan", "lastName": "Turing", "role": "admin"}
        ]))
        .unwrap();
        assert_eq!(project(&customers, "ada love", NoFilter).len(), 1);
        assert_eq!(project(&customers, "ADMIN", NoFilter).len(), 1);
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("Reported".parse::<CommentFilter>(), Ok(CommentFilter::Reported));
        assert_eq!("".parse::<ProductFilter>(), Ok(ProductFilter::All));
        assert!("flagged".parse::<CommentFilter>().is_err());
    }
}
