//! # Schema Layers
//!
//! Every diagnostic names the schema layer it came from: the shared base
//! layer, the standalone owner-descriptor layer, or one variant layer.

use serde::{Serialize, Serializer};

use crate::tag::VariantTag;

/// The schema layer a violation was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaLayer {
    /// The base schema every item must satisfy.
    Base,
    /// The owner-descriptor schema, when validated on its own.
    Owner,
    /// The extension schema selected by the item's tag.
    Variant(VariantTag),
}

impl SchemaLayer {
    /// Label printed in parentheses at the end of a diagnostic.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Owner => "owner",
            Self::Variant(tag) => tag.schema_name(),
        }
    }
}

impl std::fmt::Display for SchemaLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SchemaLayer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
