//! Output format tests.

#![allow(clippy::unwrap_used, deprecated)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use blinkdet_test_support::SyntheticEyeBuilder;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn blinkdet(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("blinkdet").unwrap();
    cmd.env("XDG_CONFIG_HOME", home).current_dir(home);
    cmd
}

fn pair_png(dir: &Path) -> PathBuf {
    let path = dir.join("pair.png");
    SyntheticEyeBuilder::eye_pair(true, true)
        .image
        .save(&path)
        .unwrap();
    path
}

#[test]
fn test_jsonl_is_default() {
    let temp_dir = TempDir::new().unwrap();
    let image = pair_png(temp_dir.path());

    let output = blinkdet(temp_dir.path())
        .arg(&image)
        .args(["--eye", "60,60,20", "--eye", "60,180,20"])
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);

    for line in lines {
        let value: Value = serde_json::from_str(line).unwrap();
        assert!(value["path"].as_str().unwrap().ends_with("pair.png"));
        assert!(value["pupil"]["row"].is_number());
        assert!(value.get("side").is_none());
    }
}

#[test]
fn test_json_single_object() {
    let temp_dir = TempDir::new().unwrap();
    let image = pair_png(temp_dir.path());

    let output = blinkdet(temp_dir.path())
        .arg(&image)
        .args(["--eye", "60,60,20", "--eye", "60,180,20", "--format", "json"])
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);

    let value: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["dimensions"]["width"], 240);
    assert_eq!(value["dimensions"]["height"], 120);
    assert_eq!(value["eyes"].as_array().unwrap().len(), 2);
    assert!(value["timestamp"].as_str().unwrap().contains('T'));
}

#[test]
fn test_json_pretty() {
    let temp_dir = TempDir::new().unwrap();
    let image = pair_png(temp_dir.path());

    blinkdet(temp_dir.path())
        .arg(&image)
        .args(["--eye", "60,60,20", "--format", "json", "--pretty"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("{\n").and(predicate::str::contains("  \"eyes\"")));
}

#[test]
fn test_pretty_ignored_for_jsonl() {
    let temp_dir = TempDir::new().unwrap();
    let image = pair_png(temp_dir.path());

    let output = blinkdet(temp_dir.path())
        .arg(&image)
        .args(["--eye", "60,60,20", "--pretty"])
        .output()
        .unwrap();

    assert_eq!(String::from_utf8(output.stdout).unwrap().lines().count(), 1);
}
