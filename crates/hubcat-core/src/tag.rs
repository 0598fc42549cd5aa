//! # Variant Tags — Single Source of Truth
//!
//! Defines the `VariantTag` enum with the five catalog variants and the
//! [`Discriminant`] read from a raw record item. Every `match` on
//! `VariantTag` must be exhaustive, so a new variant cannot be silently
//! skipped by the registry, the aggregator or the reporter.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HubcatError;

/// Name of the discriminant field carried by every catalog item.
pub const TAG_FIELD: &str = "type";

/// Total number of catalog variants.
pub const VARIANT_TAG_COUNT: usize = 5;

/// The catalog variants an item can declare in its `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantTag {
    /// A model repository.
    Model,
    /// A dataset repository.
    Dataset,
    /// A space (hosted application).
    Space,
    /// A paper page.
    Paper,
    /// A nested collection.
    Collection,
}

impl VariantTag {
    /// Returns all variants in canonical order.
    pub fn all() -> &'static [VariantTag] {
        &[
            Self::Model,
            Self::Dataset,
            Self::Space,
            Self::Paper,
            Self::Collection,
        ]
    }

    /// Returns the wire value of this tag, as it appears in `type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Dataset => "dataset",
            Self::Space => "space",
            Self::Paper => "paper",
            Self::Collection => "collection",
        }
    }

    /// Returns the capitalized name used to label variant-layer diagnostics.
    pub fn schema_name(&self) -> &'static str {
        match self {
            Self::Model => "Model",
            Self::Dataset => "Dataset",
            Self::Space => "Space",
            Self::Paper => "Paper",
            Self::Collection => "Collection",
        }
    }
}

impl std::fmt::Display for VariantTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantTag {
    type Err = HubcatError;

    /// Parse a tag from its wire value. Matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "model" => Ok(Self::Model),
            "dataset" => Ok(Self::Dataset),
            "space" => Ok(Self::Space),
            "paper" => Ok(Self::Paper),
            "collection" => Ok(Self::Collection),
            other => Err(HubcatError::UnknownTag(other.to_string())),
        }
    }
}

/// The discriminant an item carries, resolved against the known variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discriminant {
    /// The item declares one of the five known variants.
    Known(VariantTag),
    /// The item declares a string `type` that is not a known variant.
    Unrecognized(String),
    /// The item's `type` is not a string, kept in its compact JSON form.
    NonString(String),
    /// The item is not an object or has no `type` field.
    Missing,
}

impl Discriminant {
    /// Read the discriminant of a raw item.
    pub fn of(item: &Value) -> Self {
        match item.get(TAG_FIELD) {
            None => Self::Missing,
            Some(Value::String(s)) => match s.parse::<VariantTag>() {
                Ok(tag) => Self::Known(tag),
                Err(_) => Self::Unrecognized(s.clone()),
            },
            Some(other) => Self::NonString(other.to_string()),
        }
    }

    /// Returns the known tag, if any.
    pub fn tag(&self) -> Option<VariantTag> {
        match self {
            Self::Known(tag) => Some(*tag),
            Self::Unrecognized(_) | Self::NonString(_) | Self::Missing => None,
        }
    }

    /// Key under which an item is tallied in per-tag breakdowns.
    ///
    /// Unrecognized string tags are tallied under their own value; empty,
    /// missing or non-string tags fall under `unknown`.
    pub fn tally_key(&self) -> String {
        match self {
            Self::Known(tag) => tag.as_str().to_string(),
            Self::Unrecognized(s) if !s.is_empty() => s.clone(),
            Self::Unrecognized(_) | Self::NonString(_) | Self::Missing => "unknown".to_string(),
        }
    }
}
