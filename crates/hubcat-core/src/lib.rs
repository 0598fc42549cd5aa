//! # hubcat-core — Foundational Types for the Catalog Checker
//!
//! Defines the closed set of catalog variants and the vocabulary the
//! validation engine speaks: which variant an item claims to be, which
//! schema layer a diagnostic came from, and the shared error type.
//!
//! ## Key Design Principles
//!
//! 1. **Single `VariantTag` enum.** Five variants, exhaustive `match`
//!    everywhere. Adding a variant forces every consumer to handle it.
//!
//! 2. **Open fallback, closed variants.** A record's discriminant is
//!    modelled as [`Discriminant`]: a known [`VariantTag`], an unrecognized
//!    tag string, a non-string tag, or no tag at all. Nothing downstream chains string
//!    comparisons against the raw `type` field.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hubcat-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod layer;
pub mod tag;

pub use error::HubcatError;
pub use layer::SchemaLayer;
pub use tag::{Discriminant, VariantTag, TAG_FIELD, VARIANT_TAG_COUNT};
