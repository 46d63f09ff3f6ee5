use serde_json::json;

use super::*;
use crate::adapter::MemAdapter;
use crate::output::{OutputFormatter, TextFormatter};
use crate::rule::parse_rule;

fn validator_for(rule: serde_json::Value) -> DirValidator {
    let parsed = parse_rule(&rule).unwrap();
    DirValidator::new(
        parsed.rule,
        MetaConvention::default(),
        ResolverConfig::default(),
    )
}

#[test]
fn passing_trees_yield_empty_reports() {
    let adapter = MemAdapter::new().with_file("a.txt", "x");
    let validator = validator_for(json!(true));
    let report = validator.validate(&adapter).unwrap();
    assert!(report.is_empty());
}

#[test]
fn failures_are_collected_per_path() {
    let adapter = MemAdapter::new()
        .with_dir("img")
        .with_file("img/a.jpg", "jpeg")
        .with_json("img/a.jpg_meta.json", &json!({}))
        .with_file("img/b.txt", "text");
    let validator = validator_for(json!({
        "match": "img/[^/]+",
        "type": "file",
        "validMeta": {"type": "object"}
    }));
    let report = validator.validate(&adapter).unwrap();
    assert_eq!(report.paths().collect::<Vec<_>>(), vec!["img/b.txt"]);
    let errors = &report.entries["img/b.txt"];
    assert_eq!(errors.len(), 1);
    assert_eq!(errors["/validMeta"].path, "img/b.txt_meta.json");
}

#[test]
fn companions_are_never_evaluated() {
    // The companion itself would fail the rule, but is filtered out.
    let adapter = MemAdapter::new()
        .with_file("a.jpg", "jpeg")
        .with_json("a.jpg_meta.json", &json!({}));
    let validator = validator_for(json!({"match": ".*\\.json", "type": false}));
    let report = validator.validate(&adapter).unwrap();
    assert!(report.is_empty());
}

#[test]
fn report_follows_enumeration_order() {
    let adapter = MemAdapter::new()
        .with_file("a.bin", "x")
        .with_file("b.bin", "x")
        .with_file("c.bin", "x");
    let validator = validator_for(json!({"match": ".*\\.bin", "type": "dir"}));
    let report = validator.validate(&adapter).unwrap();
    assert_eq!(
        report.paths().collect::<Vec<_>>(),
        vec!["a.bin", "b.bin", "c.bin"]
    );
}

#[test]
fn repeated_runs_are_byte_identical() {
    let adapter = MemAdapter::new()
        .with_file("x.bin", "x")
        .with_json("meta.json", &json!({"n": "no"}));
    let validator = validator_for(json!({"anyOf": [
        {"valid": {"properties": {"n": {"type": "integer"}}}},
        {"type": "dir"}
    ]}));
    let first = TextFormatter
        .format(&validator.validate(&adapter).unwrap())
        .unwrap();
    let second = TextFormatter
        .format(&validator.validate(&adapter).unwrap())
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn validate_path_checks_a_single_path() {
    let adapter = MemAdapter::new().with_file("f.txt", "x");
    let validator = validator_for(json!({"type": "dir"}));
    assert!(validator.validate_path(&adapter, "f.txt").is_some());
    let validator = validator_for(json!({"type": "file"}));
    assert!(validator.validate_path(&adapter, "f.txt").is_none());
}

#[test]
fn warnings_surface_from_the_loader() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("schema.yaml"), "then:\n  type: file\n").unwrap();
    let validator = DirValidator::from_location(
        &dir.path().join("schema.yaml"),
        MetaConvention::default(),
        ResolverConfig::default(),
    )
    .unwrap();
    assert_eq!(validator.warnings().len(), 1);
    assert!(validator.warnings()[0].contains("legacy 'then'"));
}

#[test]
fn from_location_defaults_local_basedir_to_document_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("leaf.json"), r#"{"type": "file"}"#).unwrap();
    std::fs::write(
        dir.path().join("schema.json"),
        r#"{"match": ".*\\.txt", "next": {"$ref": "local://leaf.json"}}"#,
    )
    .unwrap();
    let validator = DirValidator::from_location(
        &dir.path().join("schema.json"),
        MetaConvention::default(),
        ResolverConfig::default(),
    )
    .unwrap();

    let adapter = MemAdapter::new().with_file("note.txt", "x").with_dir("docs");
    let report = validator.validate(&adapter).unwrap();
    assert!(report.is_empty());
}
