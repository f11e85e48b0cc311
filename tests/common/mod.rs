#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

pub fn scada_cmd() -> Command {
    let mut cmd = Command::cargo_bin("scadastore").unwrap();
    cmd.env_remove("SCADA_ROOT");
    cmd.env_remove("SCADA_LOG");
    cmd.env_remove("SCADA_API_BASE_URL");
    cmd
}

/// Initialize a workspace at `root`
pub fn init_workspace(root: &Path) {
    scada_cmd().arg("init").arg(root).assert().success();
}

/// Write an editor snapshot with two grouped pumps and a pipe
pub fn write_snapshot(dir: &Path, file: &str) -> PathBuf {
    let path = dir.join(file);
    fs::write(
        &path,
        r#"{
  "canvas": {"scale": 1.5, "panX": -20, "panY": 35},
  "components": [
    {"id": 1, "type": "waterpumb", "x": 10, "y": 10, "width": 60, "height": 40, "direction": "left", "groupId": 100},
    {"id": 2, "type": "waterpumb", "x": 90, "y": 10, "width": 60, "height": 40, "direction": "right", "groupId": 100},
    {"id": 3, "type": "pipe", "x": 10, "y": 80, "width": 140, "height": 8}
  ],
  "groups": [
    {"id": 100, "components": [1, 2], "x": 0, "y": 0, "width": 160, "height": 60}
  ]
}"#,
    )
    .unwrap();
    path
}
