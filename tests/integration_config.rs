// extsync: External Dependency Syncer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML files on disk.

use std::fs;

use extsync::config::Config;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

#[test]
fn config_from_file() {
    let temp = temp_dir();
    let path = temp.path().join("extsync.toml");
    fs::write(
        &path,
        r#"
[sync]
base_dir = "third_party"

[[libraries]]
name = "zig-args"
url = "https://github.com/MasterQ32/zig-args.git"
rev = "77a2c6557bb9768dc332f98cc6cbc9eac94c93aa"
"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.sync.base_dir, "third_party");
    assert_eq!(config.libraries.len(), 1);
    assert_eq!(config.libraries[0].name, "zig-args");
}

#[test]
fn config_missing_required_file_is_error() {
    let temp = temp_dir();
    let result = Config::from_file(temp.path().join("nope.toml"));
    assert!(result.is_err());
}

#[test]
fn config_missing_optional_file_is_fine() {
    let temp = temp_dir();
    let config = Config::builder()
        .add_toml_file_optional(temp.path().join("nope.toml"))
        .build()
        .unwrap();
    assert_eq!(config.sync.base_dir, "external");
}

#[test]
fn config_later_file_overrides_earlier() {
    let temp = temp_dir();
    let master = temp.path().join("master.toml");
    let local = temp.path().join("local.toml");
    fs::write(&master, "[sync]\nbase_dir = \"external\"\nno_pull = true\n").unwrap();
    fs::write(&local, "[sync]\nbase_dir = \"vendor\"\n").unwrap();

    let config = Config::builder()
        .add_toml_file(&master)
        .add_toml_file(&local)
        .build()
        .unwrap();

    // base_dir comes from the later file, no_pull survives from the earlier
    assert_eq!(config.sync.base_dir, "vendor");
    assert!(config.sync.no_pull);
}

#[test]
fn config_loaded_files_reported_in_order() {
    let temp = temp_dir();
    let master = temp.path().join("master.toml");
    let local = temp.path().join("local.toml");
    fs::write(&master, "").unwrap();
    fs::write(&local, "").unwrap();

    let loader = Config::builder()
        .add_toml_file(&master)
        .add_toml_file(&local);

    let listed = loader.format_loaded_files();
    assert_eq!(listed.len(), 2);
    assert!(listed[0].starts_with("1. [file]"));
    assert!(listed[0].contains("master.toml"));
    assert!(listed[1].contains("local.toml"));
}

#[test]
fn config_bad_library_entry_in_file_is_rejected() {
    let temp = temp_dir();
    let path = temp.path().join("extsync.toml");
    fs::write(
        &path,
        "[[libraries]]\nname = \"a/b\"\nurl = \"https://example.com/a.git\"\nrev = \"master\"\n",
    )
    .unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn config_shipped_defaults_parse() {
    // The extsync.toml shipped at the repository root stays loadable
    let config = Config::from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/extsync.toml")).unwrap();
    let names: Vec<&str> = config.libraries.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["zig-args", "zig-flecs", "zig-gamedev", "zigimg"]);
}
