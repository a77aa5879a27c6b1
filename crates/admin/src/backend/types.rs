//! Response envelopes and list decoding.
//!
//! List endpoints are decoded leniently: a body that is not the expected
//! container (array, or object holding an array under a known key) becomes
//! an empty list, and individual records that fail to decode are skipped.
//! Both cases are logged and never surfaced as errors, so a page always has
//! something renderable.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::models::lenient;

/// `{ "count": n }` returned by the counter endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountResponse {
    #[serde(default, deserialize_with = "lenient::count")]
    pub count: Option<u64>,
}

impl CountResponse {
    /// Count with a missing value treated as zero.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.count.unwrap_or(0)
    }
}

/// `{ "product": {...} }` returned by create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductEnvelope<T> {
    pub product: T,
}

/// JSON type name for log messages.
const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode a top-level JSON array of records.
pub fn decode_list<T: DeserializeOwned>(value: Value, resource: &'static str) -> Vec<T> {
    let Value::Array(items) = value else {
        warn!(
            resource,
            received = kind(&value),
            "Expected a JSON array, treating as empty"
        );
        return Vec::new();
    };

    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(resource, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect();

    if records.len() < total {
        warn!(
            resource,
            kept = records.len(),
            total,
            "Some records could not be decoded"
        );
    }

    records
}

/// Decode an array nested under `field` in a JSON object.
pub fn decode_list_field<T: DeserializeOwned>(
    value: Value,
    field: &str,
    resource: &'static str,
) -> Vec<T> {
    match value {
        Value::Object(mut map) => decode_list(map.remove(field).unwrap_or(Value::Null), resource),
        other => {
            warn!(
                resource,
                field,
                received = kind(&other),
                "Expected a JSON object, treating as empty"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::{Comment, Product};

    #[test]
    fn test_non_array_becomes_empty() {
        let comments: Vec<Comment> = decode_list(json!({"error": "nope"}), "comments");
        assert!(comments.is_empty());

        let comments: Vec<Comment> = decode_list(Value::Null, "comments");
        assert!(comments.is_empty());
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let comments: Vec<Comment> = decode_list(
            json!([{"id": 1, "comment": "fine"}, {"comment": "no id"}, "junk", {"id": 2}]),
            "comments",
        );
        let ids: Vec<i32> = comments.iter().map(|c| c.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_nested_field() {
        let products: Vec<Product> =
            decode_list_field(json!({"products": [{"id": 4}]}), "products", "products");
        assert_eq!(products.len(), 1);

        let products: Vec<Product> =
            decode_list_field(json!({"items": [{"id": 4}]}), "products", "products");
        assert!(products.is_empty());

        let products: Vec<Product> = decode_list_field(json!([{"id": 4}]), "products", "products");
        assert!(products.is_empty());
    }

    #[test]
    fn test_count_response_defaults_to_zero() {
        let count: CountResponse = serde_json::from_value(json!({})).unwrap_or_default();
        assert_eq!(count.value(), 0);
        let count: CountResponse = serde_json::from_value(json!({"count": "41"})).unwrap_or_default();
        assert_eq!(count.value(), 41);
    }
}
