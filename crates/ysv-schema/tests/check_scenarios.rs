//! Integration test: end-to-end checks of YAML documents against Draft 7
//! schemas written to a temporary directory.
//!
//! Covers the keyword families a values file is typically constrained by
//! (types, required, enum, pattern, bounds, additionalProperties, nested
//! properties and items) and the exact paths and rules reported for them.

#![cfg(feature = "engine")]

use std::path::PathBuf;

use ysv_schema::{check_files, CheckError, PathSegment, Violations};

fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

fn check(values: &str, schema: &str) -> Violations {
    let dir = tempfile::tempdir().unwrap();
    let values = write(&dir, "values.yaml", values);
    let schema = write(&dir, "values.schema.json", schema);
    check_files(&values, &schema).unwrap_or_else(|e| panic!("check failed: {e}"))
}

fn rules(violations: &Violations) -> Vec<Option<&str>> {
    violations.iter().map(|v| v.rule.as_deref()).collect()
}

#[test]
fn wrong_property_type() {
    let violations = check(
        "name: 42\n",
        r#"{"type":"object","required":["name"],"properties":{"name":{"type":"string"}}}"#,
    );
    assert_eq!(violations.len(), 1);
    let v = &violations.as_slice()[0];
    assert_eq!(v.path.to_string(), "name");
    assert_eq!(v.rule.as_deref(), Some("type"));
    assert!(!v.message.is_empty());
}

#[test]
fn missing_required_property_is_at_root() {
    let violations = check("age: 5\n", r#"{"type":"object","required":["name"]}"#);
    assert_eq!(violations.len(), 1);
    let v = &violations.as_slice()[0];
    assert!(v.path.is_root());
    assert_eq!(v.path.to_string(), "(root)");
    assert_eq!(v.rule.as_deref(), Some("required"));
    assert!(v.message.contains("name"), "message: {}", v.message);
}

#[test]
fn plain_object_schema_accepts_mapping() {
    let violations = check("a: 1\n", r#"{"type":"object"}"#);
    assert!(violations.is_empty());
}

#[test]
fn every_violation_is_collected() {
    let schema = r#"{
        "type": "object",
        "required": ["image"],
        "additionalProperties": false,
        "properties": {
            "replicas": {"type": "integer", "minimum": 1, "maximum": 10},
            "pullPolicy": {"enum": ["Always", "IfNotPresent", "Never"]},
            "tag": {"type": "string", "pattern": "^v[0-9]+$"},
            "debug": {"type": "boolean"}
        }
    }"#;
    let values = "replicas: 0\npullPolicy: Sometimes\ntag: latest\nextra: true\n";
    let violations = check(values, schema);

    assert_eq!(violations.len(), 5, "got:\n{violations}");
    let mut found = rules(&violations);
    found.sort();
    assert_eq!(
        found,
        vec![
            Some("additionalProperties"),
            Some("enum"),
            Some("minimum"),
            Some("pattern"),
            Some("required"),
        ]
    );
    assert!(violations.iter().all(|v| !v.message.is_empty()));
}

#[test]
fn nested_array_items_report_index_paths() {
    let schema = r#"{
        "type": "object",
        "properties": {
            "ingress": {
                "type": "object",
                "properties": {
                    "hosts": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["host"],
                            "properties": {"port": {"type": "integer"}}
                        }
                    }
                }
            }
        }
    }"#;
    let values = r#"
ingress:
  hosts:
    - host: a.example.com
      port: 80
    - port: "443"
"#;
    let violations = check(values, schema);
    assert_eq!(violations.len(), 2, "got:\n{violations}");

    let paths: Vec<String> = violations.iter().map(|v| v.path.to_string()).collect();
    assert!(paths.contains(&"ingress → hosts → 1".to_string()), "paths: {paths:?}");
    assert!(paths.contains(&"ingress → hosts → 1 → port".to_string()), "paths: {paths:?}");

    let port = violations
        .iter()
        .find(|v| v.path.to_string() == "ingress → hosts → 1 → port")
        .unwrap();
    assert_eq!(
        port.path.segments(),
        &[
            PathSegment::Key("ingress".into()),
            PathSegment::Key("hosts".into()),
            PathSegment::Index(1),
            PathSegment::Key("port".into()),
        ]
    );
}

#[test]
fn order_is_deterministic() {
    let schema = r#"{"type":"object","properties":{"a":{"type":"string"},"b":{"type":"string"},"c":{"type":"string"}}}"#;
    let values = "a: 1\nb: 2\nc: 3\n";
    let first = check(values, schema);
    let second = check(values, schema);
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn scalar_document_against_object_schema() {
    let violations = check("just a string\n", r#"{"type":"object"}"#);
    assert_eq!(violations.len(), 1);
    assert!(violations.as_slice()[0].path.is_root());
    assert_eq!(violations.as_slice()[0].rule.as_deref(), Some("type"));
}

#[test]
fn invalid_schema_is_distinct_error() {
    let dir = tempfile::tempdir().unwrap();
    let values = write(&dir, "values.yaml", "a: 1\n");
    let schema = write(&dir, "schema.json", r#"{"type": "no-such-type"}"#);
    let err = check_files(&values, &schema).unwrap_err();
    assert!(
        matches!(err, CheckError::InvalidSchema { .. }),
        "expected InvalidSchema, got: {err}"
    );
}
