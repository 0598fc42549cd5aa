//! # Report Rendering
//!
//! Text and JSON renderers for catalog passes, owner audits and document
//! faults. Renderers only read the structured results produced by
//! `hubcat-schema`; they never re-validate.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;
use serde_json::{json, Value};

use hubcat_schema::{CatalogReport, DocumentError, OwnerAuditReport};

use crate::highlights::highlights;

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// How a handler should render its results.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Print per-item highlights in text reports.
    pub details: bool,
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<T: Serialize>(value: &T, out: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Report a document fault.
pub fn write_fault(err: &DocumentError, format: OutputFormat, out: &mut dyn Write) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "FAULT ({}): {err}", err.kind()),
        OutputFormat::Json => write_json(
            &json!({ "fault": { "kind": err.kind(), "message": err.to_string() } }),
            out,
        ),
    }
}

/// Render a catalog pass as text.
///
/// `collections` is the raw input the report was produced from; it is only
/// read for highlights.
pub fn write_catalog_text(
    report: &CatalogReport,
    collections: &[Value],
    details: bool,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "Collections found: {}", report.summary.total_collections)?;

    for collection in &report.collections {
        writeln!(
            out,
            "\nCollection {} {}:",
            collection.index + 1,
            collection.slug.as_deref().unwrap_or("[no slug]")
        )?;
        writeln!(
            out,
            "  has items: {} ({} items)",
            collection.has_items,
            collection.items.len()
        )?;

        for item in &collection.items {
            writeln!(out, "  item {} ({}):", item.item_index + 1, item.tag_key)?;
            if item.result.is_valid {
                writeln!(out, "    ok")?;
            } else {
                writeln!(out, "    FAIL:")?;
                for diagnostic in &item.result.diagnostics {
                    writeln!(out, "      - {diagnostic}")?;
                }
            }

            if details {
                let raw = collections
                    .get(item.collection_index)
                    .and_then(|c| c.get("items"))
                    .and_then(|items| items.get(item.item_index));
                if let Some(raw) = raw {
                    for (label, value) in highlights(raw) {
                        writeln!(out, "    {label}: {value}")?;
                    }
                }
            }
        }
    }

    let s = &report.summary;
    writeln!(out, "\nItem validation summary:")?;
    writeln!(out, "  total collections: {}", s.total_collections)?;
    writeln!(out, "  total items: {}", s.total_items)?;
    writeln!(out, "  valid items: {}", s.valid_items)?;
    writeln!(out, "  total errors: {}", s.total_error_count)?;

    writeln!(out, "\nItems by type:")?;
    for (tag, tally) in &s.by_tag {
        writeln!(out, "  {tag}: {} total, {} valid", tally.seen, tally.valid)?;
    }

    if s.all_conform() {
        writeln!(out, "\nAll items match their variant contracts.")
    } else {
        writeln!(
            out,
            "\nFound {} contract violation(s) in items.",
            s.total_error_count
        )
    }
}

/// Render an owner audit as text.
pub fn write_owner_text(report: &OwnerAuditReport, out: &mut dyn Write) -> io::Result<()> {
    for check in &report.checks {
        if check.result.is_valid {
            writeln!(out, "ok   {}", check.path)?;
        } else {
            writeln!(out, "FAIL {}", check.path)?;
            for diagnostic in &check.result.diagnostics {
                writeln!(out, "  - {diagnostic}")?;
            }
        }
    }

    let s = &report.summary;
    writeln!(out, "\nOwner validation summary:")?;
    writeln!(out, "  total collections: {}", s.total_collections)?;
    writeln!(out, "  collections with owner: {}", s.collections_with_owner)?;
    writeln!(out, "  items with authorData: {}", s.items_with_author_data)?;
    writeln!(out, "  valid owners: {}", s.valid_owners)?;
    writeln!(out, "  valid authorData: {}", s.valid_author_data)?;
    writeln!(out, "  total errors: {}", s.total_error_count)?;

    if s.all_conform() {
        writeln!(out, "\nAll owner and authorData descriptors match the owner contract.")
    } else {
        writeln!(
            out,
            "\nFound {} contract violation(s) in owner descriptors.",
            s.total_error_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubcat_schema::{aggregate, parse_collections, ItemValidator};

    fn render(collections: &[Value], details: bool) -> String {
        let report = aggregate(&ItemValidator::global().unwrap(), collections);
        let mut buf = Vec::new();
        write_catalog_text(&report, collections, details, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_report_lists_failures_and_totals() {
        let collections = vec![json!({"slug": "org/c", "items": [{"type": "paper"}]})];
        let text = render(&collections, false);
        assert!(text.contains("Collection 1 org/c:"));
        assert!(text.contains("  item 1 (paper):\n    FAIL:"));
        assert!(text.contains("collections[0].items[0]._id is required (base)"));
        assert!(text.contains("  paper: 1 total, 0 valid"));
        assert!(text.contains("contract violation(s) in items."));
    }

    #[test]
    fn test_text_report_empty_input_conforms() {
        let text = render(&[], false);
        assert!(text.contains("Collections found: 0"));
        assert!(text.ends_with("All items match their variant contracts.\n"));
    }

    #[test]
    fn test_details_print_highlights() {
        let collections = vec![json!({"items": [{"type": "paper", "title": "T"}]})];
        let text = render(&collections, true);
        assert!(text.contains("    title: T"));
    }

    #[test]
    fn test_fault_rendering() {
        let err = parse_collections("nope", "mem").unwrap_err();
        let mut text = Vec::new();
        write_fault(&err, OutputFormat::Text, &mut text).unwrap();
        assert!(String::from_utf8(text).unwrap().starts_with("FAULT (MalformedInput):"));

        let mut buf = Vec::new();
        write_fault(&err, OutputFormat::Json, &mut buf).unwrap();
        let value: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["fault"]["kind"], "MalformedInput");
    }
}
