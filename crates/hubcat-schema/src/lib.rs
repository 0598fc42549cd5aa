//! # hubcat-schema — Catalog Contract Validation
//!
//! Validates catalog records (five variants: model, dataset, space, paper,
//! collection) against a two-layer contract: a shared base schema every
//! item satisfies, plus exactly one closed variant schema selected by the
//! item's `type` discriminant.
//!
//! ## Pipeline
//!
//! raw JSON → [`aggregate`] walks items → [`resolve`] picks the variant →
//! [`filter`] strips base fields → [`validate`] runs base then variant
//! schemas → [`diagnostic`] renders messages → [`aggregate`] tallies.
//!
//! ## Crate Policy
//!
//! - Depends only on `hubcat-core` internally.
//! - Schema violations are data ([`ValidationResult`]), never errors. The
//!   only errors are document faults ([`DocumentError`]) and schema compile
//!   failures ([`RegistryError`]).
//! - Schemas are compiled once per registry, never per validation call.
//! - No I/O during validation; the engine never prints.

pub mod aggregate;
pub mod diagnostic;
pub mod document;
pub mod filter;
pub mod owner;
pub mod registry;
pub mod resolve;
pub mod schemas;
pub mod validate;

pub use aggregate::{aggregate, aggregate_expecting, CatalogReport, CatalogSummary, ItemOutcome, TagTally};
pub use diagnostic::{Diagnostic, Keyword};
pub use document::{load_collections, parse_collections, DocumentError, DEFAULT_DOCUMENT_PATH};
pub use owner::{audit_owners, OwnerAuditReport, OwnerAuditSummary};
pub use registry::{RegistryError, SchemaRegistry};
pub use validate::{ItemValidator, ValidationResult};
