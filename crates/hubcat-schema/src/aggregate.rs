//! # Catalog Aggregation
//!
//! Walks an ordered list of collection records, validates each item in
//! order and folds the per-item results into a [`CatalogSummary`].
//!
//! Items are labelled `collections[i].items[j]`. Output order is
//! deterministic: collection index, then item index, then the item's own
//! diagnostic order. Presentation is left to the caller.

use std::collections::BTreeMap;

use hubcat_core::{Discriminant, VariantTag};
use serde::Serialize;
use serde_json::Value;

use crate::diagnostic::Diagnostic;
use crate::validate::{ItemValidator, ValidationResult};

/// Seen/valid counts for one tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TagTally {
    /// Items carrying this tag.
    pub seen: usize,
    /// Of those, items that validated cleanly.
    pub valid: usize,
}

/// Totals over a whole catalog pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    /// Collection records in the input.
    pub total_collections: usize,
    /// Items across all collections.
    pub total_items: usize,
    /// Items with no diagnostics.
    pub valid_items: usize,
    /// Diagnostics across all items.
    pub total_error_count: usize,
    /// Per-tag breakdown, keyed by the item's `type` (or `unknown`).
    pub by_tag: BTreeMap<String, TagTally>,
}

impl CatalogSummary {
    /// Fold one item outcome into the totals.
    pub fn record(mut self, outcome: &ItemOutcome) -> Self {
        let valid = outcome.result.is_valid;
        self.total_items += 1;
        self.total_error_count += outcome.result.error_count();
        let tally = self.by_tag.entry(outcome.tag_key.clone()).or_default();
        tally.seen += 1;
        if valid {
            self.valid_items += 1;
            tally.valid += 1;
        }
        self
    }

    /// `true` when the pass produced no diagnostics at all.
    pub fn all_conform(&self) -> bool {
        self.total_error_count == 0
    }
}

/// Result of validating one item, with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOutcome {
    /// Index of the owning collection.
    pub collection_index: usize,
    /// Index of the item inside its collection.
    pub item_index: usize,
    /// Path label used in diagnostics.
    pub path: String,
    /// Tally key: the item's tag, or `unknown`.
    pub tag_key: String,
    /// The validation result.
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// Items of one collection record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionOutcome {
    /// Index of the collection in the input.
    pub index: usize,
    /// The collection's slug, when present.
    pub slug: Option<String>,
    /// Whether the record carries an `items` array.
    pub has_items: bool,
    /// One outcome per item, in order.
    pub items: Vec<ItemOutcome>,
}

/// Full result of a catalog pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogReport {
    /// Totals.
    pub summary: CatalogSummary,
    /// Per-collection outcomes, in input order.
    pub collections: Vec<CollectionOutcome>,
}

impl CatalogReport {
    /// Every item outcome, in input order.
    pub fn items(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.collections.iter().flat_map(|c| c.items.iter())
    }

    /// Every diagnostic, in input order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items().flat_map(|i| i.result.diagnostics.iter())
    }
}

/// Path label of an item.
pub fn item_path(collection_index: usize, item_index: usize) -> String {
    format!("collections[{collection_index}].items[{item_index}]")
}

/// The `items` array of a collection record, if it has one.
pub(crate) fn collection_items(collection: &Value) -> Option<&Vec<Value>> {
    collection.get("items").and_then(Value::as_array)
}

/// Validate every item of every collection.
pub fn aggregate(validator: &ItemValidator<'_>, collections: &[Value]) -> CatalogReport {
    aggregate_expecting(validator, collections, None)
}

/// Validate every item of every collection, requiring each to carry
/// `expected` when given.
pub fn aggregate_expecting(
    validator: &ItemValidator<'_>,
    collections: &[Value],
    expected: Option<VariantTag>,
) -> CatalogReport {
    let outcomes: Vec<CollectionOutcome> = collections
        .iter()
        .enumerate()
        .map(|(index, collection)| validate_collection(validator, index, collection, expected))
        .collect();

    let summary = outcomes
        .iter()
        .flat_map(|c| c.items.iter())
        .fold(
            CatalogSummary {
                total_collections: collections.len(),
                ..CatalogSummary::default()
            },
            CatalogSummary::record,
        );

    tracing::info!(
        collections = summary.total_collections,
        items = summary.total_items,
        valid = summary.valid_items,
        errors = summary.total_error_count,
        "catalog pass complete"
    );

    CatalogReport {
        summary,
        collections: outcomes,
    }
}

fn validate_collection(
    validator: &ItemValidator<'_>,
    index: usize,
    collection: &Value,
    expected: Option<VariantTag>,
) -> CollectionOutcome {
    let slug = collection
        .get("slug")
        .and_then(Value::as_str)
        .map(str::to_string);
    let items = collection_items(collection);

    let outcomes = items
        .map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(item_index, item)| {
                    let path = item_path(index, item_index);
                    let result = validator.validate(item, &path, expected.map(|t| t.as_str()));
                    let tag_key = Discriminant::of(item).tally_key();
                    tracing::debug!(%path, tag = %tag_key, valid = result.is_valid, "validated item");
                    ItemOutcome {
                        collection_index: index,
                        item_index,
                        path,
                        tag_key,
                        result,
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    CollectionOutcome {
        index,
        slug,
        has_items: items.is_some(),
        items: outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paper(id: &str) -> Value {
        json!({
            "_id": id,
            "position": 0,
            "type": "paper",
            "id": id,
            "title": "t",
            "thumbnailUrl": "u",
            "upvotes": 1,
            "isUpvotedByUser": false,
            "publishedAt": "2024"
        })
    }

    #[test]
    fn test_empty_input() {
        let report = aggregate(&ItemValidator::global().unwrap(), &[]);
        assert_eq!(report.summary, CatalogSummary::default());
        assert!(report.summary.all_conform());
    }

    #[test]
    fn test_counts_and_breakdown() {
        let mut broken = paper("b");
        broken["foo"] = json!(1);
        let collections = vec![
            json!({"slug": "first", "items": [paper("a"), broken]}),
            json!({"slug": "no-items"}),
            json!({"items": [{"type": "widget"}]}),
        ];
        let report = aggregate(&ItemValidator::global().unwrap(), &collections);
        let s = &report.summary;
        assert_eq!(s.total_collections, 3);
        assert_eq!(s.total_items, 3);
        assert_eq!(s.valid_items, 1);
        assert_eq!(s.by_tag["paper"], TagTally { seen: 2, valid: 1 });
        assert_eq!(s.by_tag["widget"], TagTally { seen: 1, valid: 0 });
        assert_eq!(s.total_error_count, report.diagnostics().count());
        assert!(!s.all_conform());

        assert!(!report.collections[1].has_items);
        assert_eq!(report.collections[0].slug.as_deref(), Some("first"));
        assert_eq!(report.collections[2].items[0].path, "collections[2].items[0]");
    }

    #[test]
    fn test_diagnostics_follow_input_order() {
        let mut first = paper("a");
        first["x"] = json!(1);
        let mut second = paper("b");
        second["y"] = json!(1);
        let collections = vec![json!({"items": [first]}), json!({"items": [second]})];
        let report = aggregate(&ItemValidator::global().unwrap(), &collections);
        let messages: Vec<&str> = report.diagnostics().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "collections[0].items[0] has unexpected property: x (Paper)",
                "collections[1].items[0] has unexpected property: y (Paper)",
            ]
        );
    }

    #[test]
    fn test_expected_tag_applies_to_every_item() {
        let collections = vec![json!({"items": [paper("a"), paper("b")]})];
        let report = aggregate_expecting(
            &ItemValidator::global().unwrap(),
            &collections,
            Some(VariantTag::Model),
        );
        assert_eq!(report.summary.valid_items, 0);
        assert_eq!(report.summary.total_error_count, 2);
        assert_eq!(
            report.diagnostics().next().unwrap().message,
            "collections[0].items[0].type should be \"model\", got \"paper\""
        );
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let report = aggregate(
            &ItemValidator::global().unwrap(),
            &[json!({"items": [paper("a")]})],
        );
        let value = serde_json::to_value(&report.summary).unwrap();
        assert_eq!(value["totalCollections"], 1);
        assert_eq!(value["validItems"], 1);
        assert_eq!(value["byTag"]["paper"]["seen"], 1);
    }
}
