//! Per-variant highlights shown under each item in detailed text reports.

use hubcat_core::{Discriminant, VariantTag};
use serde_json::Value;

const NA: &str = "N/A";

/// Label/value pairs worth showing for an item, chosen by its variant.
/// Missing values render as `N/A`. Items of no known variant have none.
pub fn highlights(item: &Value) -> Vec<(&'static str, String)> {
    let Some(tag) = Discriminant::of(item).tag() else {
        return Vec::new();
    };
    match tag {
        VariantTag::Model => vec![
            ("author", text(item, "/author")),
            ("downloads", text(item, "/downloads")),
            ("likes", text(item, "/likes")),
            ("gated", text(item, "/gated")),
            ("pipeline tag", text(item, "/pipeline_tag")),
            ("inference providers", count(item, "/availableInferenceProviders")),
        ],
        VariantTag::Dataset => {
            let mut lines = vec![
                ("author", text(item, "/author")),
                ("downloads", text(item, "/downloads")),
                ("likes", text(item, "/likes")),
                ("gated", text(item, "/gated")),
            ];
            if item.get("datasetsServerInfo").is_some() {
                lines.extend([
                    ("viewer", text(item, "/datasetsServerInfo/viewer")),
                    ("rows", text(item, "/datasetsServerInfo/numRows")),
                    ("libraries", list(item, "/datasetsServerInfo/libraries")),
                    ("formats", list(item, "/datasetsServerInfo/formats")),
                    ("modalities", list(item, "/datasetsServerInfo/modalities")),
                ]);
            } else {
                lines.push(("datasets server info", "missing".to_string()));
            }
            lines
        }
        VariantTag::Space => {
            let mut lines = vec![
                ("author", text(item, "/author")),
                ("likes", text(item, "/likes")),
                ("private", text(item, "/private")),
                ("sdk", text(item, "/sdk")),
                ("tags", list(item, "/tags")),
                ("pinned", text(item, "/pinned")),
                ("emoji", text(item, "/emoji")),
                ("title", text(item, "/title")),
                ("short description", text(item, "/shortDescription")),
            ];
            if item.get("runtime").is_some() {
                lines.extend([
                    ("runtime stage", text(item, "/runtime/stage")),
                    (
                        "hardware",
                        format!(
                            "{} (requested: {})",
                            text(item, "/runtime/hardware/current"),
                            text(item, "/runtime/hardware/requested")
                        ),
                    ),
                    ("storage", text(item, "/runtime/storage")),
                ]);
            } else {
                lines.push(("runtime", "missing".to_string()));
            }
            lines
        }
        VariantTag::Paper => vec![
            ("title", text(item, "/title")),
            ("thumbnail url", text(item, "/thumbnailUrl")),
            ("upvotes", text(item, "/upvotes")),
            ("published at", text(item, "/publishedAt")),
        ],
        VariantTag::Collection => vec![
            ("slug", text(item, "/slug")),
            ("title", text(item, "/title")),
            ("description", text(item, "/description")),
            ("last updated", text(item, "/lastUpdated")),
            ("number of items", text(item, "/numberItems")),
            ("owner", text(item, "/owner/fullname")),
            ("theme", text(item, "/theme")),
            ("share url", text(item, "/shareUrl")),
            ("upvotes", text(item, "/upvotes")),
        ],
    }
}

fn text(item: &Value, pointer: &str) -> String {
    match item.pointer(pointer) {
        None | Some(Value::Null) => NA.to_string(),
        Some(Value::String(s)) if s.is_empty() => NA.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn list(item: &Value, pointer: &str) -> String {
    match item.pointer(pointer).and_then(Value::as_array) {
        Some(values) if !values.is_empty() => {
            let parts: Vec<String> = values
                .iter()
                .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string))
                .collect();
            format!("[{}]", parts.join(", "))
        }
        _ => format!("[{NA}]"),
    }
}

fn count(item: &Value, pointer: &str) -> String {
    item.pointer(pointer)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lookup<'a>(lines: &'a [(&'static str, String)], label: &str) -> &'a str {
        lines
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
            .unwrap_or_else(|| panic!("no {label} line"))
    }

    #[test]
    fn test_model_highlights() {
        let lines = highlights(&json!({
            "type": "model",
            "author": "org",
            "downloads": 10,
            "gated": false,
            "availableInferenceProviders": [{}, {}]
        }));
        assert_eq!(lookup(&lines, "author"), "org");
        assert_eq!(lookup(&lines, "downloads"), "10");
        assert_eq!(lookup(&lines, "gated"), "false");
        assert_eq!(lookup(&lines, "pipeline tag"), NA);
        assert_eq!(lookup(&lines, "inference providers"), "2");
    }

    #[test]
    fn test_dataset_without_server_info() {
        let lines = highlights(&json!({"type": "dataset"}));
        assert_eq!(lookup(&lines, "datasets server info"), "missing");
    }

    #[test]
    fn test_dataset_lists() {
        let lines = highlights(&json!({
            "type": "dataset",
            "datasetsServerInfo": {"libraries": ["datasets", "dask"], "formats": []}
        }));
        assert_eq!(lookup(&lines, "libraries"), "[datasets, dask]");
        assert_eq!(lookup(&lines, "formats"), "[N/A]");
    }

    #[test]
    fn test_space_hardware() {
        let lines = highlights(&json!({
            "type": "space",
            "runtime": {"stage": "RUNNING", "hardware": {"current": "cpu-basic", "requested": null}}
        }));
        assert_eq!(lookup(&lines, "hardware"), "cpu-basic (requested: N/A)");
        assert_eq!(lookup(&lines, "storage"), NA);
    }

    #[test]
    fn test_collection_owner_name() {
        let lines = highlights(&json!({"type": "collection", "owner": {"fullname": "Org"}}));
        assert_eq!(lookup(&lines, "owner"), "Org");
    }

    #[test]
    fn test_unknown_variant_has_none() {
        assert!(highlights(&json!({"type": "widget"})).is_empty());
        assert!(highlights(&json!(null)).is_empty());
    }
}
