//! # Items Subcommand
//!
//! Validates every item of every collection against the base schema and
//! its variant schema, then reports per-item results and the per-tag
//! breakdown.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use hubcat_core::VariantTag;
use hubcat_schema::{aggregate_expecting, load_collections, ItemValidator};

use crate::report::{write_catalog_text, write_fault, write_json, OutputFormat, ReportOptions};
use crate::{resolve_document_path, EXIT_DIAGNOSTICS, EXIT_FAULT, EXIT_OK};

/// Arguments for `hubcat items`.
#[derive(Args, Debug, Default)]
pub struct ItemsArgs {
    /// Catalog document to validate (defaults to generated/collections.json).
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Require every item to carry this tag (model, dataset, space, paper, collection).
    #[arg(long, value_name = "TAG")]
    pub expect: Option<VariantTag>,
}

/// Execute `hubcat items`.
///
/// Returns the process exit code.
pub fn run_items(
    args: &ItemsArgs,
    cwd: &Path,
    opts: ReportOptions,
    out: &mut dyn Write,
) -> Result<u8> {
    let path = resolve_document_path(args.path.as_deref(), cwd);
    tracing::info!(path = %path.display(), "validating catalog items");

    let collections = match load_collections(&path) {
        Ok(collections) => collections,
        Err(e) => {
            tracing::warn!(kind = e.kind(), "{e}");
            write_fault(&e, opts.format, out).context("failed to write report")?;
            return Ok(EXIT_FAULT);
        }
    };

    let validator = ItemValidator::global().context("failed to compile catalog schemas")?;
    let report = aggregate_expecting(&validator, &collections, args.expect);

    let written = match opts.format {
        OutputFormat::Text => write_catalog_text(&report, &collections, opts.details, out),
        OutputFormat::Json => write_json(&report, out),
    };
    written.context("failed to write report")?;

    Ok(if report.summary.all_conform() {
        EXIT_OK
    } else {
        EXIT_DIAGNOSTICS
    })
}
