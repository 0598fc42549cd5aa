//! # hubcat-cli — Catalog Contract CLI
//!
//! Provides the `hubcat` command-line interface over `hubcat-schema`.
//!
//! ## Subcommands
//!
//! - `hubcat items [PATH]`: validate every item against base + variant
//!   schemas and print the per-tag breakdown.
//! - `hubcat owners [PATH]`: audit every collection owner and item
//!   `authorData` against the owner-descriptor schema.
//!
//! ```bash
//! hubcat items
//! hubcat items generated/collections.json --expect model
//! hubcat --format json owners dump.json
//! ```
//!
//! ## Exit codes
//!
//! `0` everything conforms, `1` at least one diagnostic, `2` the document
//! could not be loaded.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `hubcat-schema`; no validation logic here.
//! - Handlers write to a caller-supplied writer so they can be tested.

pub mod highlights;
pub mod items;
pub mod owners;
pub mod report;

use std::path::{Path, PathBuf};

use hubcat_schema::DEFAULT_DOCUMENT_PATH;

/// Exit code: every record conforms.
pub const EXIT_OK: u8 = 0;
/// Exit code: at least one diagnostic.
pub const EXIT_DIAGNOSTICS: u8 = 1;
/// Exit code: the document could not be loaded.
pub const EXIT_FAULT: u8 = 2;

/// Resolve the document path: an explicit path is used as given (relative
/// to `cwd` when relative), otherwise the default location under `cwd`.
pub fn resolve_document_path(path: Option<&Path>, cwd: &Path) -> PathBuf {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_DOCUMENT_PATH));
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
