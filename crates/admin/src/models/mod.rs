//! Domain models for the shop backend's resources.
//!
//! Records are passed through from the backend with every field optional
//! except the id. Each model exposes resolution methods that apply the
//! display default for a missing field, so templates and the CLI never
//! chain fallbacks themselves.

mod catalog;
mod comment;
mod customer;
mod message;
mod product;
mod timestamp;

pub use catalog::{Category, Occasion};
pub use comment::{Author, Comment, Report};
pub use customer::Customer;
pub use message::Message;
pub use product::{
    DraftImage, ImageUpload, Product, ProductDraft, ProductForm, resolve_image_url,
};
pub use timestamp::Timestamp;

/// A record that lives in a list and is reconciled by id.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Identifier compared during reconciliation.
    type Id: Copy + Eq + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static;

    /// The record's id.
    fn id(&self) -> Self::Id;
}

/// Deserializers for numbers the backend may send as JSON numbers or as
/// numeric strings (aggregate counts come back as strings from some
/// databases).
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Text(String),
    }

    fn resolve(repr: Repr) -> Option<u64> {
        match repr {
            Repr::Unsigned(n) => Some(n),
            Repr::Signed(n) => Some(u64::try_from(n).unwrap_or(0)),
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Repr::Float(f) => (f.is_finite() && f >= 0.0).then(|| f.trunc() as u64),
            Repr::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Optional count as `u64`.
    pub fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Repr>::deserialize(deserializer)?.and_then(resolve))
    }

    /// Optional count as `u32`, saturating.
    pub fn count_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(count(deserializer)?.map(|n| u32::try_from(n).unwrap_or(u32::MAX)))
    }

    /// Optional signed quantity (stock), accepting numeric strings.
    pub fn quantity<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(
            Option::<Repr>::deserialize(deserializer)?.and_then(|repr| match repr {
                Repr::Unsigned(n) => i64::try_from(n).ok(),
                Repr::Signed(n) => Some(n),
                #[allow(clippy::cast_possible_truncation)]
                Repr::Float(f) => f.is_finite().then(|| f.trunc() as i64),
                Repr::Text(s) => s.trim().parse().ok(),
            }),
        )
    }
}

/// Returns `value` when it is present and not blank.
pub(crate) fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Counted {
        #[serde(default, deserialize_with = "super::lenient::count")]
        count: Option<u64>,
    }

    #[test]
    fn test_lenient_count_accepts_numbers_and_strings() {
        let n: Counted = serde_json::from_str(r#"{"count": 12}"#).unwrap();
        assert_eq!(n.count, Some(12));

        let s: Counted = serde_json::from_str(r#"{"count": "7"}"#).unwrap();
        assert_eq!(s.count, Some(7));

        let missing: Counted = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.count, None);

        let null: Counted = serde_json::from_str(r#"{"count": null}"#).unwrap();
        assert_eq!(null.count, None);

        let junk: Counted = serde_json::from_str(r#"{"count": "lots"}"#).unwrap();
        assert_eq!(junk.count, None);

        let negative: Counted = serde_json::from_str(r#"{"count": -3}"#).unwrap();
        assert_eq!(negative.count, Some(0));
    }
}
