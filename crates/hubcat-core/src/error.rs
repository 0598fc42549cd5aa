//! # Error Types
//!
//! Top-level error type shared by the hubcat crates. Schema violations are
//! never errors: they are data carried in validation results. Document
//! faults live with the document loader in `hubcat-schema`.

use thiserror::Error;

/// Top-level error type for hubcat.
#[derive(Error, Debug)]
pub enum HubcatError {
    /// A string did not name one of the five catalog variants.
    #[error("unknown variant tag: {0:?}")]
    UnknownTag(String),
}
