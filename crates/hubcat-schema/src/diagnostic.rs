//! # Diagnostic Translation
//!
//! Turns low-level schema violations reported by the `jsonschema` crate into
//! stable, human-actionable diagnostic strings. Each diagnostic names the
//! full path of the offending field, what was expected, what was found and
//! the schema layer the rule belongs to.
//!
//! Translation is two steps:
//!
//! 1. [`violations_from_error`] lowers one `jsonschema` error into one or
//!    more [`Violation`]s: keyword plus the keyword-specific parameters.
//!    A single `additionalProperties` error naming several properties
//!    becomes one violation per property.
//!    [`crate::registry::CompiledSchema::violations`] also lowers the errors
//!    of each `oneOf` branch ahead of a failed `oneOf`.
//! 2. [`translate`] renders a violation against a caller-supplied path label
//!    and a [`SchemaLayer`].
//!
//! | keyword | template |
//! |---|---|
//! | required | `<path>.<missing> is required (<layer>)` |
//! | type | `<path> should be <expected>, got <actual type> (<layer>)` |
//! | enum | `<path> should be one of [<allowed>], got <actual> (<layer>)` |
//! | const | `<path> should be "<expected>", got "<actual>" (<layer>)` |
//! | additionalProperties | `<path> has unexpected property: <name> (<layer>)` |
//! | oneOf | `<path> should match one of the allowed alternative shapes (<layer>)` |
//! | other | `<path> <message> (<layer>)` |

use std::fmt;

use hubcat_core::SchemaLayer;
use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::ValidationError;
use serde::Serialize;
use serde_json::Value;

/// Keyword class of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Keyword {
    /// The item itself was null.
    Absent,
    /// The item's tag disagreed with the tag expected by the caller.
    TagMismatch,
    /// A required property is missing.
    Required,
    /// A value has the wrong JSON type.
    Type,
    /// A value is outside its enumerated set.
    Enum,
    /// A value differs from its single allowed constant.
    Const,
    /// A closed object carries a property its schema does not declare.
    AdditionalProperties,
    /// A value matched none (or more than one) of its alternative shapes.
    OneOf,
    /// Any other schema keyword.
    Other,
}

/// One raw schema violation, independent of any path label or layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Dotted path of the violating value inside the validated instance,
    /// e.g. `.runtime.domains[0]`. Empty for the instance itself.
    pub sub_path: String,
    /// The violating value.
    pub actual: Value,
    /// Keyword and keyword-specific parameters.
    pub kind: ViolationKind,
}

/// Keyword-specific parameters of a [`Violation`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// `required`: the missing property.
    Required { property: String },
    /// `type`: the expected type name(s).
    Type { expected: String },
    /// `enum`: the allowed values.
    Enum { allowed: Vec<Value> },
    /// `const`: the single allowed value.
    Const { expected: Value },
    /// `additionalProperties`: one undeclared property.
    AdditionalProperty { property: String },
    /// `oneOf`: no alternative (or several) matched.
    OneOf,
    /// Anything else, with the validator's own message.
    Other { message: String },
}

impl ViolationKind {
    /// Keyword class of this violation.
    pub fn keyword(&self) -> Keyword {
        match self {
            Self::Required { .. } => Keyword::Required,
            Self::Type { .. } => Keyword::Type,
            Self::Enum { .. } => Keyword::Enum,
            Self::Const { .. } => Keyword::Const,
            Self::AdditionalProperty { .. } => Keyword::AdditionalProperties,
            Self::OneOf => Keyword::OneOf,
            Self::Other { .. } => Keyword::Other,
        }
    }
}

/// A rendered diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Keyword class.
    pub keyword: Keyword,
    /// Full dotted path of the field the diagnostic is about.
    pub path: String,
    /// Schema layer the violated rule belongs to. `None` for diagnostics
    /// raised before any schema runs (absent item, tag mismatch).
    pub layer: Option<SchemaLayer>,
    /// The human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Diagnostic for an item that is null.
    pub fn absent(path: &str) -> Self {
        Self {
            keyword: Keyword::Absent,
            path: path.to_string(),
            layer: None,
            message: format!("{path} is null or undefined"),
        }
    }

    /// Diagnostic for an item whose tag disagrees with the expected one.
    pub fn tag_mismatch(path: &str, expected: &str, actual: &Value) -> Self {
        let field = format!("{path}.type");
        Self {
            keyword: Keyword::TagMismatch,
            message: format!("{field} should be \"{expected}\", got \"{}\"", display_value(actual)),
            path: field,
            layer: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Render one violation as a diagnostic.
///
/// `label` is the caller's path for the validated instance, e.g.
/// `collections[0].items[3]`.
pub fn translate(violation: &Violation, label: &str, layer: SchemaLayer) -> Diagnostic {
    let field = format!("{label}{}", violation.sub_path);
    let (path, message) = match &violation.kind {
        ViolationKind::Required { property } => {
            let path = format!("{field}.{property}");
            let message = format!("{path} is required ({layer})");
            (path, message)
        }
        ViolationKind::Type { expected } => {
            let message = format!(
                "{field} should be {expected}, got {} ({layer})",
                json_type_name(&violation.actual)
            );
            (field, message)
        }
        ViolationKind::Enum { allowed } => {
            let allowed: Vec<String> = allowed.iter().map(display_value).collect();
            let message = format!(
                "{field} should be one of [{}], got {} ({layer})",
                allowed.join(", "),
                display_value(&violation.actual)
            );
            (field, message)
        }
        ViolationKind::Const { expected } => {
            let message = format!(
                "{field} should be \"{}\", got \"{}\" ({layer})",
                display_value(expected),
                display_value(&violation.actual)
            );
            (field, message)
        }
        ViolationKind::AdditionalProperty { property } => {
            let message = format!("{field} has unexpected property: {property} ({layer})");
            (field, message)
        }
        ViolationKind::OneOf => {
            let message =
                format!("{field} should match one of the allowed alternative shapes ({layer})");
            (field, message)
        }
        ViolationKind::Other { message } => {
            let message = format!("{field} {message} ({layer})");
            (field, message)
        }
    };
    Diagnostic {
        keyword: violation.kind.keyword(),
        path,
        layer: Some(layer),
        message,
    }
}

/// Lower one `jsonschema` error into violations.
///
/// `schema` is the schema the error was produced against; it is used to
/// recover the declared type list when a `type` keyword names several.
/// `root` is the instance the whole validation started from and `prefix`
/// the JSON Pointer from `root` to the value `schema` was applied to.
pub fn violations_from_error(
    error: &ValidationError<'_>,
    schema: &Value,
    root: &Value,
    prefix: &str,
) -> Vec<Violation> {
    let sub_path = render_pointer(&format!("{prefix}{}", error.instance_path), root);
    let actual = error.instance.clone().into_owned();
    let kinds = match &error.kind {
        ValidationErrorKind::Required { property } => vec![ViolationKind::Required {
            property: display_value(property),
        }],
        ValidationErrorKind::Type { kind } => {
            let expected = match kind {
                TypeKind::Single(ty) => ty.to_string(),
                TypeKind::Multiple(_) => declared_types(schema, &error.schema_path.to_string()),
            };
            vec![ViolationKind::Type { expected }]
        }
        ValidationErrorKind::Enum { options } => vec![ViolationKind::Enum {
            allowed: options.as_array().cloned().unwrap_or_default(),
        }],
        ValidationErrorKind::Constant { expected_value } => vec![ViolationKind::Const {
            expected: expected_value.clone(),
        }],
        ValidationErrorKind::AdditionalProperties { unexpected } => unexpected
            .iter()
            .map(|property| ViolationKind::AdditionalProperty {
                property: property.clone(),
            })
            .collect(),
        ValidationErrorKind::OneOfNotValid { .. } | ValidationErrorKind::OneOfMultipleValid { .. } => {
            vec![ViolationKind::OneOf]
        }
        _ => vec![ViolationKind::Other {
            message: error.to_string(),
        }],
    };
    kinds
        .into_iter()
        .map(|kind| Violation {
            sub_path: sub_path.clone(),
            actual: actual.clone(),
            kind,
        })
        .collect()
}

/// Type names declared at a `type` keyword, joined with `or`.
fn declared_types(schema: &Value, type_pointer: &str) -> String {
    match schema.pointer(type_pointer) {
        Some(Value::Array(types)) => types
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(" or "),
        Some(Value::String(ty)) => ty.clone(),
        _ => "one of several types".to_string(),
    }
}

/// Render a JSON Pointer in the dotted notation of path labels:
/// `/runtime/domains/0/stage` becomes `.runtime.domains[0].stage`.
///
/// Segments are resolved against `instance`, so a numeric key of an object
/// stays a dotted segment and only array positions render as `[n]`.
pub fn render_pointer(pointer: &str, instance: &Value) -> String {
    let mut out = String::new();
    let mut current = Some(instance);
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        match current {
            Some(Value::Array(items)) => {
                out.push('[');
                out.push_str(&segment);
                out.push(']');
                current = segment.parse::<usize>().ok().and_then(|i| items.get(i));
            }
            other => {
                out.push('.');
                out.push_str(&segment);
                current = other.and_then(|v| v.get(segment.as_str()));
            }
        }
    }
    out
}

/// Strings print bare; everything else prints as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JSON type name of a value.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
