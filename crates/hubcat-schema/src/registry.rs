//! # Schema Registry
//!
//! Owns the compiled base schema, the compiled owner-descriptor schema and
//! the five compiled variant schemas. Every schema is compiled exactly once,
//! when the registry is built. The process-wide instance returned by
//! [`SchemaRegistry::global`] is built lazily on first use and reused by
//! every validation call after that.
//!
//! ## Thread Safety
//!
//! `SchemaRegistry` is `Send + Sync`: compiled validators hold no mutable
//! state, so one registry can serve any number of concurrent validations.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::OnceLock;

use hubcat_core::{SchemaLayer, VariantTag};
use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, Validator};
use serde_json::Value;
use thiserror::Error;

use crate::diagnostic::{violations_from_error, Violation};
use crate::schemas;

/// Errors raised while building the registry.
///
/// The schemas are fixed at compile time, so this only fires on a
/// programming error in [`crate::schemas`].
#[derive(Error, Debug, Clone)]
pub enum RegistryError {
    /// A schema could not be compiled into a validator.
    #[error("failed to compile {schema} schema: {reason}")]
    Compile {
        /// Layer label of the schema.
        schema: String,
        /// Reason reported by the schema compiler.
        reason: String,
    },
}

/// A schema together with its compiled validator.
///
/// The branches of every `oneOf` are compiled alongside, so that a value
/// matching none of them can be reported with each branch's own
/// violations.
pub struct CompiledSchema {
    layer: SchemaLayer,
    schema: Value,
    validator: Validator,
    alternatives: HashMap<String, Vec<CompiledSchema>>,
}

impl CompiledSchema {
    /// Compile `schema` for `layer` against Draft 7.
    pub fn compile(layer: SchemaLayer, schema: Value) -> Result<Self, RegistryError> {
        let mut opts = jsonschema::options();
        opts.with_draft(Draft::Draft7);
        let validator = opts.build(&schema).map_err(|e| RegistryError::Compile {
            schema: layer.to_string(),
            reason: e.to_string(),
        })?;
        let mut alternatives = HashMap::new();
        for (pointer, branches) in schemas::one_of_sites(&schema) {
            let compiled = branches
                .into_iter()
                .map(|branch| CompiledSchema::compile(layer, branch))
                .collect::<Result<Vec<_>, _>>()?;
            alternatives.insert(pointer, compiled);
        }
        Ok(Self {
            layer,
            schema,
            validator,
            alternatives,
        })
    }

    /// The layer diagnostics from this schema are labelled with.
    pub fn layer(&self) -> SchemaLayer {
        self.layer
    }

    /// The uncompiled schema value.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Whether `instance` satisfies the schema.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Every violation of the schema by `instance`, in discovery order.
    ///
    /// A value matching no `oneOf` branch yields the violations of each
    /// branch, in branch order, followed by the `oneOf` violation itself.
    pub fn violations(&self, instance: &Value) -> Vec<Violation> {
        let mut out = Vec::new();
        self.collect_violations(instance, instance, "", &mut out);
        out
    }

    fn collect_violations(
        &self,
        root: &Value,
        instance: &Value,
        prefix: &str,
        out: &mut Vec<Violation>,
    ) {
        for error in self.validator.iter_errors(instance) {
            if matches!(error.kind, ValidationErrorKind::OneOfNotValid { .. }) {
                if let Some(branches) = self.alternatives.get(&error.schema_path.to_string()) {
                    let at = format!("{prefix}{}", error.instance_path);
                    for branch in branches {
                        branch.collect_violations(root, &error.instance, &at, out);
                    }
                }
            }
            out.extend(violations_from_error(&error, &self.schema, root, prefix));
        }
    }
}

impl fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("layer", &self.layer)
            .field("one_of_sites", &self.alternatives.len())
            .finish_non_exhaustive()
    }
}

/// The compiled catalog contract.
#[derive(Debug)]
pub struct SchemaRegistry {
    base: CompiledSchema,
    owner: CompiledSchema,
    variants: HashMap<VariantTag, CompiledSchema>,
    base_properties: BTreeSet<String>,
}

static GLOBAL: OnceLock<Result<SchemaRegistry, RegistryError>> = OnceLock::new();

impl SchemaRegistry {
    /// Compile all schemas.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Compile`] if any schema fails to compile.
    pub fn new() -> Result<Self, RegistryError> {
        let base_schema = schemas::base_schema();
        let base_properties = schemas::declared_properties(&base_schema);
        let base = CompiledSchema::compile(SchemaLayer::Base, base_schema)?;
        let owner = CompiledSchema::compile(SchemaLayer::Owner, schemas::owner_schema())?;

        let mut variants = HashMap::with_capacity(VariantTag::all().len());
        for tag in VariantTag::all() {
            let compiled =
                CompiledSchema::compile(SchemaLayer::Variant(*tag), schemas::variant_schema(*tag))?;
            variants.insert(*tag, compiled);
        }

        tracing::debug!(
            variants = variants.len(),
            base_properties = base_properties.len(),
            "compiled catalog schemas"
        );

        Ok(Self {
            base,
            owner,
            variants,
            base_properties,
        })
    }

    /// The process-wide registry, compiled on first call.
    pub fn global() -> Result<&'static SchemaRegistry, RegistryError> {
        GLOBAL
            .get_or_init(SchemaRegistry::new)
            .as_ref()
            .map_err(Clone::clone)
    }

    /// The base schema.
    pub fn base(&self) -> &CompiledSchema {
        &self.base
    }

    /// The standalone owner-descriptor schema.
    pub fn owner(&self) -> &CompiledSchema {
        &self.owner
    }

    /// The variant schema for a known tag.
    pub fn variant(&self, tag: VariantTag) -> Option<&CompiledSchema> {
        self.variants.get(&tag)
    }

    /// Look a variant schema up by its wire tag. Unknown tags yield `None`.
    pub fn lookup(&self, tag: &str) -> Option<&CompiledSchema> {
        tag.parse::<VariantTag>()
            .ok()
            .and_then(|tag| self.variant(tag))
    }

    /// Names of the properties the base schema declares.
    pub fn base_properties(&self) -> &BTreeSet<String> {
        &self.base_properties
    }
}
