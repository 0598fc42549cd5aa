//! # Item Validation
//!
//! Validates one catalog item against the two-layer contract:
//!
//! 1. A null item fails at once with a single diagnostic.
//! 2. If the caller expected a tag and the item declares another, the item
//!    fails at once with a single mismatch diagnostic. Schema checks are
//!    skipped on this path: the mismatch is treated as definitive.
//! 3. The base schema runs against the raw item.
//! 4. If the item declares a known variant, base fields are stripped and
//!    the variant schema runs against what is left.
//!
//! Base diagnostics always precede variant diagnostics. An item is valid
//! exactly when it produced no diagnostics. Items whose tag matches no
//! variant are judged by the base layer alone.

use serde::Serialize;
use serde_json::Value;

use crate::diagnostic::{translate, Diagnostic};
use crate::filter::strip_base_properties;
use crate::registry::{CompiledSchema, RegistryError, SchemaRegistry};
use crate::resolve::resolve;

/// Outcome of validating one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// `true` iff `diagnostics` is empty.
    pub is_valid: bool,
    /// Diagnostics in discovery order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Build a result from its diagnostics.
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            is_valid: diagnostics.is_empty(),
            diagnostics,
        }
    }

    /// Number of diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }
}

/// Every violation of `schema` by `instance`, rendered against `path`.
pub fn check(schema: &CompiledSchema, instance: &Value, path: &str) -> Vec<Diagnostic> {
    schema
        .violations(instance)
        .iter()
        .map(|v| translate(v, path, schema.layer()))
        .collect()
}

/// Validates items and owner descriptors against a [`SchemaRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct ItemValidator<'r> {
    registry: &'r SchemaRegistry,
}

impl<'r> ItemValidator<'r> {
    /// Validator backed by `registry`.
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self { registry }
    }

    /// The registry this validator reads from.
    pub fn registry(&self) -> &'r SchemaRegistry {
        self.registry
    }

    /// Validate one catalog item.
    ///
    /// `path` labels the item in diagnostics (e.g. `collections[0].items[2]`).
    /// `expected` is the tag the caller knows the item must carry, if any.
    pub fn validate(&self, item: &Value, path: &str, expected: Option<&str>) -> ValidationResult {
        if item.is_null() {
            return ValidationResult::from_diagnostics(vec![Diagnostic::absent(path)]);
        }

        let resolution = resolve(item, expected);
        if let Some(mismatch) = &resolution.mismatch {
            return ValidationResult::from_diagnostics(vec![mismatch.diagnostic(path)]);
        }

        let mut diagnostics = check(self.registry.base(), item, path);

        if let Some(variant) = resolution.tag().and_then(|tag| self.registry.variant(tag)) {
            let filtered = strip_base_properties(item, self.registry.base_properties());
            diagnostics.extend(check(variant, &filtered, path));
        }

        ValidationResult::from_diagnostics(diagnostics)
    }

    /// Validate an owner/author descriptor on its own.
    pub fn validate_owner(&self, owner: &Value, path: &str) -> ValidationResult {
        if owner.is_null() {
            return ValidationResult::from_diagnostics(vec![Diagnostic::absent(path)]);
        }
        ValidationResult::from_diagnostics(check(self.registry.owner(), owner, path))
    }
}

impl ItemValidator<'static> {
    /// Validator backed by the process-wide registry.
    pub fn global() -> Result<Self, RegistryError> {
        SchemaRegistry::global().map(Self::new)
    }
}
