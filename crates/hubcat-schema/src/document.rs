//! # Catalog Documents
//!
//! Loads the catalog document: a JSON array of collection records. Faults
//! here are reported as named error kinds and never mixed with validation
//! diagnostics. A fault means no pass runs and no summary is produced.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Default location of the catalog document, relative to the working
/// directory.
pub const DEFAULT_DOCUMENT_PATH: &str = "generated/collections.json";

/// Faults that abort a catalog pass.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document is not valid JSON, or is not an array of records.
    #[error("malformed input in {path}: {reason}")]
    MalformedInput {
        /// Where the document came from.
        path: String,
        /// Parser message or shape complaint.
        reason: String,
    },

    /// The document does not exist.
    #[error("document not found: {}", path.display())]
    ResourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Any other I/O failure while reading the document.
    #[error("failed to read {}: {source}", path.display())]
    UnknownIoFailure {
        /// The path being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    /// Stable name of the fault kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedInput { .. } => "MalformedInput",
            Self::ResourceNotFound { .. } => "ResourceNotFound",
            Self::UnknownIoFailure { .. } => "UnknownIOFailure",
        }
    }
}

/// Read and parse the catalog document at `path`.
///
/// # Errors
///
/// - [`DocumentError::ResourceNotFound`] if nothing exists at `path`.
/// - [`DocumentError::UnknownIoFailure`] for any other read failure.
/// - [`DocumentError::MalformedInput`] if the content is not a JSON array.
pub fn load_collections(path: &Path) -> Result<Vec<Value>, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DocumentError::ResourceNotFound {
            path: path.to_path_buf(),
        },
        _ => DocumentError::UnknownIoFailure {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "read catalog document");
    parse_collections(&content, &path.display().to_string())
}

/// Parse an in-memory catalog document. `origin` names it in errors.
///
/// # Errors
///
/// Returns [`DocumentError::MalformedInput`] if `content` is not JSON or its
/// root is not an array.
pub fn parse_collections(content: &str, origin: &str) -> Result<Vec<Value>, DocumentError> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| DocumentError::MalformedInput {
            path: origin.to_string(),
            reason: format!("invalid JSON: {e}"),
        })?;
    match value {
        Value::Array(collections) => Ok(collections),
        other => Err(DocumentError::MalformedInput {
            path: origin.to_string(),
            reason: format!(
                "expected an array of collection records, found {}",
                crate::diagnostic::json_type_name(&other)
            ),
        }),
    }
}
