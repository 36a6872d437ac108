//! Integration tests for snapshot loading and publishing.

use ort_workbench::app::{AppState, LoadState, SnapshotFormat, parse_snapshot};
use ort_workbench::config::AppConfig;
use ort_workbench::model::{Severity, Tool};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const RESULT_JSON: &str = r#"{
  "dependency_graph": {
    "nodes": {
      "app": { "kind": "project", "id": { "type": "Maven", "namespace": "org.example", "name": "app", "version": "1.0" }, "definition_file_path": "pom.xml" },
      "compile": { "kind": "scope", "name": "compile" },
      "guava": { "kind": "package", "id": { "type": "Maven", "namespace": "com.google.guava", "name": "guava", "version": "33.0" } },
      "jsr305": { "kind": "package", "id": { "type": "Maven", "namespace": "com.google.code.findbugs", "name": "jsr305", "version": "3.0.2" } }
    },
    "edges": {
      "app": ["compile"],
      "compile": ["guava"],
      "guava": ["jsr305"]
    },
    "roots": ["app"]
  },
  "issues": [
    { "id": { "type": "Maven", "namespace": "com.google.guava", "name": "guava", "version": "33.0" }, "tool": "ANALYZER", "source": "Maven", "message": "checksum mismatch", "severity": "WARNING" },
    { "id": { "type": "Maven", "namespace": "org.example", "name": "app", "version": "1.0" }, "tool": "SCANNER", "source": "ScanCode", "message": "timeout", "severity": "ERROR" }
  ],
  "packages": [
    { "id": { "type": "Maven", "namespace": "com.google.guava", "name": "guava", "version": "33.0" }, "declared_licenses": ["Apache-2.0"], "scopes": ["compile"], "issue_count": 1 }
  ]
}"#;

const RESULT_YAML: &str = r"
dependency_tree:
  - key: npm
    value:
      kind: scope
      name: dependencies
    children:
      - key: left-pad
        value:
          kind: package
          id: { type: NPM, name: left-pad, version: 1.3.0 }
violations:
  - rule: COPYLEFT_IN_SOURCE
    license: GPL-2.0-only
    severity: ERROR
    message: copyleft license found
";

/// Helper to write a snapshot file into a temporary directory
fn write_snapshot(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_open_publishes_every_view() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "result.json", RESULT_JSON);

    let mut app = AppState::new(AppConfig::default());
    app.open(&path).unwrap();

    assert_eq!(app.revision(), 1);
    assert_eq!(app.load_state(), &LoadState::Loaded { path });
    assert_eq!(app.dependencies.len(), 4);
    assert_eq!(app.dependencies.visible_len(), 1);
    assert_eq!(app.issues.engine().filtered_len(), 2);
    assert_eq!(app.packages.engine().filtered_len(), 1);

    app.issues.set_tool(Some(Tool::Scanner)).unwrap();
    let messages: Vec<&str> = app
        .issues
        .filtered_items()
        .map(|i| i.message.as_str())
        .collect();
    assert_eq!(messages, vec!["timeout"]);
}

#[test]
fn test_search_in_loaded_tree() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "result.json", RESULT_JSON);

    let mut app = AppState::new(AppConfig::default());
    app.open(&path).unwrap();

    app.dependencies.update_search("jsr305");
    assert_eq!(app.dependencies.search().hit_count(), 1);
    assert_eq!(app.dependencies.visible_len(), 4);
    assert_eq!(app.dependencies.selected_index(), Some(3));
}

#[test]
fn test_background_load_of_yaml() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "result.yml", RESULT_YAML);

    let config = AppConfig::builder().start_expanded(true).build();
    let mut app = AppState::new(config);
    app.begin_load(&path);
    assert!(app.load_state().is_loading());

    app.wait_for_load().unwrap();
    assert_eq!(app.revision(), 1);
    assert_eq!(app.dependencies.visible_len(), 2);
    assert_eq!(app.violations.engine().filtered_len(), 1);

    app.violations.set_severity(Some(Severity::Warning)).unwrap();
    assert_eq!(app.violations.engine().filtered_len(), 0);
}

#[test]
fn test_newer_load_supersedes_older_one() {
    let dir = TempDir::new().unwrap();
    let first = write_snapshot(&dir, "first.json", RESULT_JSON);
    let second = write_snapshot(&dir, "second.yaml", RESULT_YAML);

    let mut app = AppState::new(AppConfig::default());
    app.begin_load(&first);
    app.begin_load(&second);
    app.wait_for_load().unwrap();

    assert_eq!(app.revision(), 1);
    assert_eq!(app.load_state(), &LoadState::Loaded { path: second });
    assert!(app.issues.engine().source().is_empty());
    assert_eq!(app.violations.engine().source().len(), 1);
}

#[test]
fn test_failed_load_keeps_previous_snapshot() {
    let dir = TempDir::new().unwrap();
    let good = write_snapshot(&dir, "good.json", RESULT_JSON);
    let bad = write_snapshot(&dir, "bad.json", "{ not json");

    let mut app = AppState::new(AppConfig::default());
    app.open(&good).unwrap();

    let err = app.open(&bad).unwrap_err();
    assert!(err.to_string().contains("bad.json"));
    assert!(matches!(app.load_state(), LoadState::Failed { .. }));
    assert_eq!(app.revision(), 1);
    assert_eq!(app.snapshot().issues.len(), 2);
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "result.xml", "<result/>");

    let mut app = AppState::default();
    assert!(app.open(&path).is_err());
    assert!(SnapshotFormat::from_path(&path).is_err());
}

#[test]
fn test_cyclic_graph_fails_to_publish() {
    let content = r#"{
      "dependency_graph": {
        "nodes": {
          "a": { "kind": "scope", "name": "a" },
          "b": { "kind": "scope", "name": "b" }
        },
        "edges": { "a": ["b"], "b": ["a"] },
        "roots": ["a"]
      }
    }"#;
    let snapshot = parse_snapshot(content, SnapshotFormat::Json).unwrap();

    let mut app = AppState::default();
    let err = app.publish(snapshot).unwrap_err();
    assert!(err.is_malformed_hierarchy());
    assert_eq!(app.revision(), 0);
}

#[test]
fn test_graph_over_configured_limit_fails_to_publish() {
    let snapshot = parse_snapshot(RESULT_JSON, SnapshotFormat::Json).unwrap();

    let mut app = AppState::new(AppConfig::builder().max_tree_items(3).build());
    let err = app.publish(snapshot.clone()).unwrap_err();
    assert!(err.is_malformed_hierarchy());
    assert_eq!(app.revision(), 0);

    let mut app = AppState::new(AppConfig::builder().max_tree_items(4).build());
    app.publish(snapshot).unwrap();
    assert_eq!(app.dependencies.len(), 4);
}
