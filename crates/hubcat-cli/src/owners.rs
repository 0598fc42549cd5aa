//! # Owners Subcommand
//!
//! Audits every collection `owner` and item `authorData` descriptor against
//! the owner-descriptor schema on its own.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use hubcat_schema::{audit_owners, load_collections, ItemValidator};

use crate::report::{write_fault, write_json, write_owner_text, OutputFormat, ReportOptions};
use crate::{resolve_document_path, EXIT_DIAGNOSTICS, EXIT_FAULT, EXIT_OK};

/// Arguments for `hubcat owners`.
#[derive(Args, Debug, Default)]
pub struct OwnersArgs {
    /// Catalog document to audit (defaults to generated/collections.json).
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Execute `hubcat owners`.
///
/// Returns the process exit code.
pub fn run_owners(
    args: &OwnersArgs,
    cwd: &Path,
    opts: ReportOptions,
    out: &mut dyn Write,
) -> Result<u8> {
    let path = resolve_document_path(args.path.as_deref(), cwd);
    tracing::info!(path = %path.display(), "auditing owner descriptors");

    let collections = match load_collections(&path) {
        Ok(collections) => collections,
        Err(e) => {
            tracing::warn!(kind = e.kind(), "{e}");
            write_fault(&e, opts.format, out).context("failed to write report")?;
            return Ok(EXIT_FAULT);
        }
    };

    let validator = ItemValidator::global().context("failed to compile catalog schemas")?;
    let report = audit_owners(&validator, &collections);

    let written = match opts.format {
        OutputFormat::Text => write_owner_text(&report, out),
        OutputFormat::Json => write_json(&report, out),
    };
    written.context("failed to write report")?;

    Ok(if report.summary.all_conform() {
        EXIT_OK
    } else {
        EXIT_DIAGNOSTICS
    })
}
