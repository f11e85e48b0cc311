//! Integration tests for save, load, list, delete, export and import

#![allow(deprecated)]

use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{init_workspace, scada_cmd, write_snapshot};

fn load_json(root: &std::path::Path, name: &str) -> Value {
    let output = scada_cmd()
        .current_dir(root)
        .args(["load", name])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_save_then_load() {
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path());
    let snapshot = write_snapshot(temp.path(), "snapshot.json");

    scada_cmd()
        .current_dir(temp.path())
        .args(["save", "Pump Station"])
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["--description", "north side"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Saved 'Pump Station' (3 components, 1 groups)",
        ));

    let loaded = load_json(temp.path(), "Pump Station");
    assert_eq!(loaded["name"], "Pump Station");
    assert_eq!(loaded["description"], "north side");
    assert_eq!(loaded["version"], "1.0.0");
    assert_eq!(loaded["canvas"]["scale"], 1.5);
    assert_eq!(loaded["canvas"]["panX"], -20.0);
    assert_eq!(loaded["components"].as_array().unwrap().len(), 3);
    assert_eq!(loaded["components"][0]["direction"], "left");
    assert_eq!(loaded["components"][0]["groupId"], 100);
    assert_eq!(loaded["groups"][0]["components"], serde_json::json!([1, 2]));
    assert!(loaded["timestamp"].as_f64().unwrap() > 0.0);

    let stored = fs::read_to_string(temp.path().join(".scada/storage/scada-diagram-configs.json"))
        .unwrap();
    assert!(stored.starts_with('['));
}

#[test]
fn test_load_missing_configuration() {
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path());

    scada_cmd()
        .current_dir(temp.path())
        .args(["load", "ghost"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No configuration named 'ghost'"));
}

#[test]
fn test_save_twice_keeps_one_entry() {
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path());
    let snapshot = write_snapshot(temp.path(), "snapshot.json");

    for description in ["first", "second"] {
        scada_cmd()
            .current_dir(temp.path())
            .args(["save", "Plant", "--description", description])
            .arg("--snapshot")
            .arg(&snapshot)
            .assert()
            .success();
    }

    let list = scada_cmd()
        .current_dir(temp.path())
        .arg("list")
        .output()
        .unwrap();
    let stdout = String::from_utf8(list.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("Plant"));
    assert!(stdout.contains("- second"));
}

#[test]
fn test_list_orders_newest_first() {
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path());

    let stored = serde_json::json!([
        {"name": "t1", "timestamp": 1000, "version": "1.0.0",
         "canvas": {"scale": 1, "panX": 0, "panY": 0}, "components": [], "groups": []},
        {"name": "t3", "timestamp": 3000, "version": "1.0.0",
         "canvas": {"scale": 1, "panX": 0, "panY": 0}, "components": [], "groups": []},
        {"name": "t2", "timestamp": 2000, "version": "1.0.0",
         "canvas": {"scale": 1, "panX": 0, "panY": 0}, "components": [], "groups": []}
    ]);
    fs::write(
        temp.path().join(".scada/storage/scada-diagram-configs.json"),
        stored.to_string(),
    )
    .unwrap();

    let output = scada_cmd()
        .current_dir(temp.path())
        .arg("list")
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let names: Vec<&str> = stdout
        .lines()
        .map(|line| line.split("  ").nth(1).unwrap())
        .collect();
    assert_eq!(names, vec!["t3", "t2", "t1"]);
}

#[test]
fn test_corrupt_storage_lists_nothing() {
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path());
    fs::write(
        temp.path().join(".scada/storage/scada-diagram-configs.json"),
        "this is not json",
    )
    .unwrap();

    scada_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No configurations found"));

    scada_cmd()
        .current_dir(temp.path())
        .args(["load", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read stored configurations"));
}

#[test]
fn test_delete_is_idempotent() {
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path());
    let snapshot = write_snapshot(temp.path(), "snapshot.json");

    scada_cmd()
        .current_dir(temp.path())
        .args(["save", "Plant", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success();

    scada_cmd()
        .current_dir(temp.path())
        .args(["delete", "Plant"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 'Plant'"));

    scada_cmd()
        .current_dir(temp.path())
        .args(["delete", "Plant"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No configuration named 'Plant'"));

    scada_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No configurations found"));
}

#[test]
fn test_export_uses_slug_filename() {
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path());
    let snapshot = write_snapshot(temp.path(), "snapshot.json");
    let out = temp.path().join("exports");

    scada_cmd()
        .current_dir(temp.path())
        .args(["save", "Plant #1 (North)", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success();

    scada_cmd()
        .current_dir(temp.path())
        .args(["export", "Plant #1 (North)", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("plant__1__north_.scada.json"));

    let exported = fs::read_to_string(out.join("plant__1__north_.scada.json")).unwrap();
    assert!(exported.contains("\n  \"name\": \"Plant #1 (North)\""));
}

#[test]
fn test_export_defaults_to_configured_dir() {
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path());
    let snapshot = write_snapshot(temp.path(), "snapshot.json");

    scada_cmd()
        .current_dir(temp.path())
        .args(["config", "export_dir", "out"])
        .assert()
        .success();
    scada_cmd()
        .current_dir(temp.path())
        .args(["save", "Main", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success();
    scada_cmd()
        .current_dir(temp.path())
        .args(["export", "Main"])
        .assert()
        .success();

    assert!(temp.path().join("out/main.scada.json").exists());
}

#[test]
fn test_import_minimal_configuration() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("minimal.json");
    fs::write(
        &file,
        r#"{"name":"A","timestamp":1,"version":"1.0.0","canvas":{"scale":1,"panX":0,"panY":0},"components":[],"groups":[]}"#,
    )
    .unwrap();

    // Validation alone needs no workspace
    scada_cmd()
        .current_dir(temp.path())
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Valid configuration 'A' (version 1.0.0, 0 components, 0 groups)",
        ));
}

#[test]
fn test_import_rejects_incomplete_configuration() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("bad.json");
    fs::write(&file, r#"{"name":"x"}"#).unwrap();

    scada_cmd()
        .arg("import")
        .arg(&file)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Invalid configuration format"));
}

#[test]
fn test_import_rejects_malformed_json() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("bad.json");
    fs::write(&file, "{\"name\":").unwrap();

    scada_cmd()
        .arg("import")
        .arg(&file)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Failed to parse configuration file"));
}

#[test]
fn test_export_then_import_with_save() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    init_workspace(source.path());
    init_workspace(target.path());
    let snapshot = write_snapshot(source.path(), "snapshot.json");

    scada_cmd()
        .current_dir(source.path())
        .args(["save", "Shared", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success();
    scada_cmd()
        .current_dir(source.path())
        .args(["export", "Shared", "--out"])
        .arg(source.path())
        .assert()
        .success();

    scada_cmd()
        .current_dir(target.path())
        .arg("import")
        .arg(source.path().join("shared.scada.json"))
        .arg("--save")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored 'Shared'"));

    assert_eq!(
        load_json(target.path(), "Shared"),
        load_json(source.path(), "Shared")
    );
}

#[test]
fn test_integrity_issues_are_warned_not_fatal() {
    let temp = TempDir::new().unwrap();
    init_workspace(temp.path());
    let snapshot = temp.path().join("dangling.json");
    fs::write(
        &snapshot,
        r#"{"components":[{"id":1,"type":"pipe","x":0,"y":0,"width":1,"height":1,"groupId":9}],"groups":[]}"#,
    )
    .unwrap();

    scada_cmd()
        .current_dir(temp.path())
        .args(["save", "Loose", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stderr(predicate::str::contains("component 1 references missing group 9"));
}
