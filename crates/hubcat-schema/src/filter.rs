//! # Base Field Filtering
//!
//! Variant schemas are closed but do not re-declare the base fields every
//! item carries (`_id`, `position`, `type`, `id`, `note`, `gallery`). Those
//! fields must be removed before variant validation, otherwise every
//! well-formed item would be reported as carrying unexpected properties.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Shallow copy of `item` with every base-declared key removed.
///
/// Non-object items yield an empty object: the base layer has already
/// reported their type.
pub fn strip_base_properties(item: &Value, base_properties: &BTreeSet<String>) -> Value {
    let filtered: Map<String, Value> = item
        .as_object()
        .map(|obj| {
            obj.iter()
                .filter(|(key, _)| !base_properties.contains(key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default();
    Value::Object(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> BTreeSet<String> {
        ["_id", "position", "type", "id", "note", "gallery"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_strips_only_base_keys() {
        let item = json!({
            "_id": "1",
            "position": 0,
            "type": "paper",
            "id": "2401.00001",
            "note": {"html": "", "text": ""},
            "title": "A paper",
            "upvotes": 3
        });
        let filtered = strip_base_properties(&item, &base());
        assert_eq!(filtered, json!({"title": "A paper", "upvotes": 3}));
    }

    #[test]
    fn test_leaves_input_untouched() {
        let item = json!({"id": "x", "extra": true});
        let _ = strip_base_properties(&item, &base());
        assert_eq!(item, json!({"id": "x", "extra": true}));
    }

    #[test]
    fn test_non_object_yields_empty_object() {
        assert_eq!(strip_base_properties(&json!([1, 2]), &base()), json!({}));
        assert_eq!(strip_base_properties(&json!("model"), &base()), json!({}));
    }

    #[test]
    fn test_nested_values_are_kept_whole() {
        let item = json!({"id": "x", "authorData": {"type": "user", "name": "n"}});
        let filtered = strip_base_properties(&item, &base());
        assert_eq!(filtered["authorData"]["type"], "user");
    }
}
