//! # Discriminant Resolution
//!
//! Decides which variant schema applies to an item and whether the item's
//! own tag disagrees with a tag the caller expected from context.
//!
//! A missing or out-of-set tag is not reported here: the base schema
//! already requires `type` and constrains it to the five wire values, so
//! those cases surface as base-layer diagnostics.

use hubcat_core::{Discriminant, VariantTag, TAG_FIELD};
use serde_json::Value;

use crate::diagnostic::Diagnostic;

/// The item's tag disagrees with the tag the caller expected.
#[derive(Debug, Clone, PartialEq)]
pub struct TagMismatch {
    /// Tag the caller expected.
    pub expected: String,
    /// Value the item actually carries in `type`.
    pub actual: Value,
}

impl TagMismatch {
    /// Render as a diagnostic rooted at `path`.
    pub fn diagnostic(&self, path: &str) -> Diagnostic {
        Diagnostic::tag_mismatch(path, &self.expected, &self.actual)
    }
}

/// Outcome of resolving an item's discriminant.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// What the item declares.
    pub discriminant: Discriminant,
    /// Set when an expected tag was supplied and the item carries a
    /// different one.
    pub mismatch: Option<TagMismatch>,
}

impl Resolution {
    /// The variant whose schema applies, if the item declares a known one.
    pub fn tag(&self) -> Option<VariantTag> {
        self.discriminant.tag()
    }
}

/// Resolve `item` against an optional expected tag.
///
/// A mismatch is only flagged when the item carries a `type` field at all;
/// an item with no tag is left to the base schema's `required` rule.
pub fn resolve(item: &Value, expected: Option<&str>) -> Resolution {
    let mismatch = expected.and_then(|expected| match item.get(TAG_FIELD) {
        Some(actual) if actual.as_str() != Some(expected) => Some(TagMismatch {
            expected: expected.to_string(),
            actual: actual.clone(),
        }),
        _ => None,
    });
    Resolution {
        discriminant: Discriminant::of(item),
        mismatch,
    }
}
