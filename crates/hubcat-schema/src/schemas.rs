//! # Catalog Schema Definitions
//!
//! The six fixed schemas of the catalog contract, expressed as Draft-07
//! JSON Schema values (the registry compiles them with the draft pinned): the base schema every item satisfies and one
//! extension schema per [`VariantTag`].
//!
//! Variant schemas are closed (`additionalProperties: false`) and do not
//! re-declare base fields. Base fields are stripped before variant
//! validation (see [`crate::filter`]). The base schema itself stays open so
//! that variant fields do not trip it.
//!
//! Nested shapes reused by several variants (the owner descriptor) are
//! defined once and embedded by value.

use std::collections::BTreeSet;

use hubcat_core::VariantTag;
use serde_json::{json, Value};

/// Schema for a nullable string field.
fn nullable_string() -> Value {
    json!({ "type": ["string", "null"] })
}

fn string_list() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

/// `false`, or one of the two gating modes.
fn gated() -> Value {
    json!({
        "oneOf": [
            { "type": "boolean", "const": false },
            { "type": "string", "enum": ["auto", "manual"] }
        ]
    })
}

/// Owner/author descriptor: embedded in model `authorData`, space
/// `authorData` and collection `owner`, and validated standalone by the
/// owner audit.
pub fn owner_schema() -> Value {
    json!({
        "type": "object",
        "required": ["avatarUrl", "fullname", "type", "name", "isHf", "isHfAdmin", "isMod"],
        "additionalProperties": false,
        "properties": {
            "_id": { "type": "string" },
            "avatarUrl": { "type": "string" },
            "fullname": { "type": "string" },
            "type": { "type": "string", "enum": ["user", "org"] },
            "name": { "type": "string" },
            "isPro": { "type": "boolean" },
            "isEnterprise": { "type": "boolean" },
            "isHf": { "type": "boolean" },
            "isHfAdmin": { "type": "boolean" },
            "isMod": { "type": "boolean" },
            "followerCount": { "type": "number" }
        }
    })
}

fn inference_provider_schema() -> Value {
    json!({
        "type": "object",
        "required": ["provider", "modelStatus", "providerStatus", "providerId", "task"],
        "additionalProperties": false,
        "properties": {
            "provider": { "type": "string" },
            "modelStatus": { "type": "string" },
            "providerStatus": { "type": "string" },
            "providerId": { "type": "string" },
            "task": { "type": "string" },
            "adapterWeightsPath": { "type": "string" },
            "adapterType": { "type": "string" }
        }
    })
}

fn space_runtime_schema() -> Value {
    json!({
        "type": "object",
        "required": ["stage", "hardware", "storage", "replicas"],
        "additionalProperties": false,
        "properties": {
            "stage": { "type": "string" },
            "hardware": {
                "type": "object",
                "required": ["current", "requested"],
                "additionalProperties": false,
                "properties": {
                    "current": nullable_string(),
                    "requested": nullable_string()
                }
            },
            "storage": nullable_string(),
            "gcTimeout": { "type": ["number", "null"] },
            "replicas": {
                "type": "object",
                "required": ["requested"],
                "additionalProperties": false,
                "properties": {
                    "current": { "type": "number" },
                    "requested": {
                        "oneOf": [
                            { "type": "number" },
                            { "type": "string", "enum": ["auto"] }
                        ]
                    }
                }
            },
            "devMode": { "type": "boolean" },
            "domains": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["domain", "stage"],
                    "additionalProperties": false,
                    "properties": {
                        "domain": { "type": "string" },
                        "stage": { "type": "string" }
                    }
                }
            },
            "sha": { "type": "string" },
            "errorMessage": nullable_string()
        }
    })
}

/// The base layer. Required on every item regardless of tag.
pub fn base_schema() -> Value {
    json!({
        "type": "object",
        "required": ["_id", "position", "type", "id"],
        "additionalProperties": true,
        "properties": {
            "_id": { "type": "string" },
            "position": { "type": "number" },
            "type": {
                "type": "string",
                "enum": ["model", "dataset", "space", "paper", "collection"]
            },
            "id": { "type": "string" },
            "note": {
                "type": "object",
                "required": ["html", "text"],
                "additionalProperties": false,
                "properties": {
                    "html": { "type": "string" },
                    "text": { "type": "string" }
                }
            },
            "gallery": string_list()
        }
    })
}

fn model_schema() -> Value {
    json!({
        "type": "object",
        "required": [
            "author", "authorData", "downloads", "gated", "availableInferenceProviders",
            "lastModified", "likes", "isLikedByUser", "private", "repoType"
        ],
        "additionalProperties": false,
        "properties": {
            "type": { "type": "string", "const": "model" },
            "author": { "type": "string" },
            "authorData": owner_schema(),
            "downloads": { "type": "number" },
            "gated": gated(),
            "availableInferenceProviders": {
                "type": "array",
                "items": inference_provider_schema()
            },
            "lastModified": { "type": "string" },
            "likes": { "type": "number" },
            "isLikedByUser": { "type": "boolean" },
            "pipeline_tag": { "type": "string" },
            "private": { "type": "boolean" },
            "repoType": { "type": "string" },
            "widgetOutputUrls": string_list(),
            "numParameters": { "type": "number" }
        }
    })
}

fn dataset_schema() -> Value {
    json!({
        "type": "object",
        "required": [
            "author", "downloads", "gated", "lastModified", "likes",
            "isLikedByUser", "private", "repoType"
        ],
        "additionalProperties": false,
        "properties": {
            "type": { "type": "string", "const": "dataset" },
            "author": { "type": "string" },
            "downloads": { "type": "number" },
            "gated": gated(),
            "lastModified": { "type": "string" },
            "likes": { "type": "number" },
            "isLikedByUser": { "type": "boolean" },
            "private": { "type": "boolean" },
            "repoType": { "type": "string" },
            "datasetsServerInfo": {
                "type": "object",
                "required": ["viewer", "numRows", "libraries"],
                "additionalProperties": false,
                "properties": {
                    "viewer": { "type": "string" },
                    "numRows": { "type": "number" },
                    "libraries": string_list(),
                    "formats": string_list(),
                    "modalities": string_list(),
                    "tags": string_list()
                }
            }
        }
    })
}

fn space_schema() -> Value {
    json!({
        "type": "object",
        "required": [
            "author", "authorData", "createdAt", "lastModified", "likes", "isLikedByUser",
            "private", "repoType", "tags", "pinned", "emoji", "runtime", "title", "trendingScore"
        ],
        "additionalProperties": false,
        "properties": {
            "type": { "type": "string", "const": "space" },
            "author": { "type": "string" },
            "authorData": owner_schema(),
            "createdAt": { "type": "string" },
            "lastModified": { "type": "string" },
            "likes": { "type": "number" },
            "isLikedByUser": { "type": "boolean" },
            "private": { "type": "boolean" },
            "repoType": { "type": "string" },
            "sdk": { "type": "string" },
            "tags": string_list(),
            "pinned": { "type": "boolean" },
            "emoji": { "type": "string" },
            "colorFrom": { "type": "string" },
            "colorTo": { "type": "string" },
            "runtime": space_runtime_schema(),
            "shortDescription": { "type": "string" },
            "title": { "type": "string" },
            "ai_short_description": { "type": "string" },
            "ai_category": { "type": "string" },
            "trendingScore": { "type": "number" }
        }
    })
}

fn paper_schema() -> Value {
    json!({
        "type": "object",
        "required": ["title", "thumbnailUrl", "upvotes", "isUpvotedByUser", "publishedAt"],
        "additionalProperties": false,
        "properties": {
            "type": { "type": "string", "const": "paper" },
            "title": { "type": "string" },
            "thumbnailUrl": { "type": "string" },
            "upvotes": { "type": "number" },
            "isUpvotedByUser": { "type": "boolean" },
            "publishedAt": { "type": "string" }
        }
    })
}

fn collection_schema() -> Value {
    json!({
        "type": "object",
        "required": [
            "slug", "title", "lastUpdated", "numberItems", "owner",
            "theme", "shareUrl", "upvotes", "isUpvotedByUser"
        ],
        "additionalProperties": false,
        "properties": {
            "type": { "type": "string", "const": "collection" },
            "slug": { "type": "string" },
            "title": { "type": "string" },
            "description": { "type": "string" },
            "lastUpdated": { "type": "string" },
            "numberItems": { "type": "number" },
            "owner": owner_schema(),
            "theme": { "type": "string" },
            "shareUrl": { "type": "string" },
            "upvotes": { "type": "number" },
            "isUpvotedByUser": { "type": "boolean" }
        }
    })
}

/// The extension schema for one variant.
pub fn variant_schema(tag: VariantTag) -> Value {
    match tag {
        VariantTag::Model => model_schema(),
        VariantTag::Dataset => dataset_schema(),
        VariantTag::Space => space_schema(),
        VariantTag::Paper => paper_schema(),
        VariantTag::Collection => collection_schema(),
    }
}

/// Names of the top-level properties a schema declares.
pub fn declared_properties(schema: &Value) -> BTreeSet<String> {
    schema
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| props.keys().cloned().collect())
        .unwrap_or_default()
}

/// Every `oneOf` keyword in `schema` with its branches, keyed by the JSON
/// Pointer of the keyword. Branches themselves are not searched.
pub fn one_of_sites(schema: &Value) -> Vec<(String, Vec<Value>)> {
    let mut sites = Vec::new();
    collect_one_of(schema, "", &mut sites);
    sites
}

fn collect_one_of(node: &Value, pointer: &str, sites: &mut Vec<(String, Vec<Value>)>) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                let escaped = key.replace('~', "~0").replace('/', "~1");
                let child_pointer = format!("{pointer}/{escaped}");
                match (key.as_str(), child) {
                    ("oneOf", Value::Array(branches)) => {
                        sites.push((child_pointer, branches.clone()));
                    }
                    _ => collect_one_of(child, &child_pointer, sites),
                }
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                collect_one_of(child, &format!("{pointer}/{i}"), sites);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_of_sites() {
        let sites = one_of_sites(&variant_schema(VariantTag::Space));
        let pointers: Vec<&str> = sites.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            pointers,
            vec!["/properties/runtime/properties/replicas/properties/requested/oneOf"]
        );
        assert_eq!(sites[0].1.len(), 2);

        let dataset = one_of_sites(&variant_schema(VariantTag::Dataset));
        assert!(dataset.iter().any(|(p, _)| p == "/properties/gated/oneOf"));
        assert!(one_of_sites(&base_schema()).is_empty());
    }

    #[test]
    fn test_base_properties() {
        let props = declared_properties(&base_schema());
        let expected: BTreeSet<String> = ["_id", "position", "type", "id", "note", "gallery"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(props, expected);
    }

    #[test]
    fn test_variant_schemas_are_closed() {
        for tag in VariantTag::all() {
            let schema = variant_schema(*tag);
            assert_eq!(
                schema["additionalProperties"],
                Value::Bool(false),
                "{tag} schema must reject unlisted properties"
            );
        }
    }

    #[test]
    fn test_variant_required_fields_are_declared() {
        for tag in VariantTag::all() {
            let schema = variant_schema(*tag);
            let props = declared_properties(&schema);
            for required in schema["required"].as_array().unwrap() {
                let name = required.as_str().unwrap();
                assert!(props.contains(name), "{tag}: required {name} is not declared");
            }
        }
    }

    #[test]
    fn test_variant_const_matches_tag() {
        for tag in VariantTag::all() {
            let schema = variant_schema(*tag);
            assert_eq!(schema["properties"]["type"]["const"], tag.as_str());
        }
    }

    #[test]
    fn test_base_tag_enum_lists_every_variant() {
        let schema = base_schema();
        let allowed: Vec<&str> = schema["properties"]["type"]["enum"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        let wire: Vec<&str> = VariantTag::all().iter().map(|t| t.as_str()).collect();
        assert_eq!(allowed, wire);
    }

    #[test]
    fn test_owner_embedded_once_by_value() {
        let owner = owner_schema();
        assert_eq!(variant_schema(VariantTag::Model)["properties"]["authorData"], owner);
        assert_eq!(variant_schema(VariantTag::Space)["properties"]["authorData"], owner);
        assert_eq!(variant_schema(VariantTag::Collection)["properties"]["owner"], owner);
    }
}
