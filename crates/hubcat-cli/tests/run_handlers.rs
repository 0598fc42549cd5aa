//! Drives the subcommand handlers against documents on disk.

use std::fs;
use std::path::Path;

use hubcat_cli::items::{run_items, ItemsArgs};
use hubcat_cli::owners::{run_owners, OwnersArgs};
use hubcat_cli::report::{OutputFormat, ReportOptions};
use hubcat_cli::{EXIT_DIAGNOSTICS, EXIT_FAULT, EXIT_OK};
use hubcat_core::VariantTag;
use serde_json::{json, Value};

fn owner() -> Value {
    json!({
        "avatarUrl": "u",
        "fullname": "X",
        "type": "user",
        "name": "x",
        "isHf": false,
        "isHfAdmin": false,
        "isMod": false
    })
}

fn paper() -> Value {
    json!({
        "_id": "p",
        "position": 0,
        "type": "paper",
        "id": "2401.00001",
        "title": "A paper",
        "thumbnailUrl": "u",
        "upvotes": 1,
        "isUpvotedByUser": false,
        "publishedAt": "2024"
    })
}

fn write_doc(dir: &Path, doc: &Value) {
    let generated = dir.join("generated");
    fs::create_dir_all(&generated).unwrap();
    fs::write(generated.join("collections.json"), doc.to_string()).unwrap();
}

fn items(dir: &Path, args: ItemsArgs, format: OutputFormat) -> (u8, String) {
    let mut out = Vec::new();
    let opts = ReportOptions { format, details: false };
    let code = run_items(&args, dir, opts, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn conforming_document_exits_ok() {
    let dir = tempfile::tempdir().unwrap();
    write_doc(dir.path(), &json!([{ "slug": "a", "owner": owner(), "items": [paper()] }]));
    let (code, text) = items(dir.path(), ItemsArgs::default(), OutputFormat::Text);
    assert_eq!(code, EXIT_OK);
    assert!(text.contains("All items match their variant contracts."));
}

#[test]
fn violations_exit_with_diagnostics_code() {
    let dir = tempfile::tempdir().unwrap();
    let mut broken = paper();
    broken["foo"] = json!("bar");
    write_doc(dir.path(), &json!([{ "items": [broken] }]));
    let (code, text) = items(dir.path(), ItemsArgs::default(), OutputFormat::Text);
    assert_eq!(code, EXIT_DIAGNOSTICS);
    assert!(text.contains("collections[0].items[0] has unexpected property: foo (Paper)"));
}

#[test]
fn expect_flag_flags_other_tags() {
    let dir = tempfile::tempdir().unwrap();
    write_doc(dir.path(), &json!([{ "items": [paper()] }]));
    let args = ItemsArgs {
        path: None,
        expect: Some(VariantTag::Model),
    };
    let (code, text) = items(dir.path(), args, OutputFormat::Text);
    assert_eq!(code, EXIT_DIAGNOSTICS);
    assert!(text.contains("collections[0].items[0].type should be \"model\", got \"paper\""));
}

#[test]
fn json_report_is_structured() {
    let dir = tempfile::tempdir().unwrap();
    write_doc(dir.path(), &json!([{ "items": [paper(), null] }]));
    let (code, text) = items(dir.path(), ItemsArgs::default(), OutputFormat::Json);
    assert_eq!(code, EXIT_DIAGNOSTICS);
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["summary"]["totalItems"], 2);
    assert_eq!(value["summary"]["validItems"], 1);
    assert_eq!(value["summary"]["byTag"]["unknown"]["seen"], 1);
    assert_eq!(
        value["collections"][0]["items"][1]["diagnostics"][0]["keyword"],
        "absent"
    );
}

#[test]
fn malformed_document_is_a_fault() {
    let dir = tempfile::tempdir().unwrap();
    let generated = dir.path().join("generated");
    fs::create_dir_all(&generated).unwrap();
    fs::write(generated.join("collections.json"), "[{").unwrap();
    let (code, text) = items(dir.path(), ItemsArgs::default(), OutputFormat::Text);
    assert_eq!(code, EXIT_FAULT);
    assert!(text.starts_with("FAULT (MalformedInput):"));
    assert!(!text.contains("summary"));
}

#[test]
fn missing_document_is_a_fault() {
    let dir = tempfile::tempdir().unwrap();
    let (code, text) = items(dir.path(), ItemsArgs::default(), OutputFormat::Text);
    assert_eq!(code, EXIT_FAULT);
    assert!(text.starts_with("FAULT (ResourceNotFound):"));
}

#[test]
fn owners_audit_reports_bad_author_data() {
    let dir = tempfile::tempdir().unwrap();
    let mut bad = owner();
    bad["type"] = json!("bot");
    write_doc(
        dir.path(),
        &json!([{ "owner": owner(), "items": [{ "type": "model", "authorData": bad }] }]),
    );
    let mut out = Vec::new();
    let code = run_owners(&OwnersArgs::default(), dir.path(), ReportOptions::default(), &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(code, EXIT_DIAGNOSTICS);
    assert!(text.contains("ok   collections[0].owner"));
    assert!(text.contains(
        "collections[0].items[0].authorData.type should be one of [user, org], got bot (owner)"
    ));
    assert!(text.contains("valid owners: 1"));
    assert!(text.contains("valid authorData: 0"));
}
