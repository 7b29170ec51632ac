// extsync: External Dependency Syncer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::Config;
use super::types::LibrarySpec;

const SAMPLE: &str = r#"
[global]
dry = true
output_log_level = 4

[sync]
base_dir = "vendor"
no_pull = true

[paths]
root = "/tmp/work"

[[libraries]]
name = "zig-args"
url = "https://github.com/MasterQ32/zig-args.git"
rev = "77a2c6557bb9768dc332f98cc6cbc9eac94c93aa"

[[libraries]]
name = "zigimg"
url = "https://github.com/zigimg/zigimg.git"
rev = "5e8e5687ce1edd7dd1040c0580ec0731bcfbd793"
"#;

#[test]
fn test_defaults() {
    let config = Config::parse("").unwrap();
    assert!(!config.global.dry);
    assert_eq!(config.global.output_log_level.as_u8(), 3);
    assert_eq!(config.sync.base_dir, "external");
    assert!(!config.sync.no_pull);
    assert!(!config.sync.shallow);
    assert!(config.libraries.is_empty());
    assert_eq!(config.external_dir(), std::path::PathBuf::from("./external"));
}

#[test]
fn test_parse_sample() {
    let config = Config::parse(SAMPLE).unwrap();
    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level.as_u8(), 4);
    assert_eq!(config.sync.base_dir, "vendor");
    assert!(config.sync.no_pull);
    assert_eq!(config.external_dir(), std::path::PathBuf::from("/tmp/work/vendor"));
}

#[test]
fn test_library_order_preserved() {
    let config = Config::parse(SAMPLE).unwrap();
    let names: Vec<&str> = config.libraries.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["zig-args", "zigimg"]);
}

#[test]
fn test_library_spec_fields() {
    let config = Config::parse(SAMPLE).unwrap();
    assert_eq!(
        config.libraries[0],
        LibrarySpec::new(
            "zig-args",
            "https://github.com/MasterQ32/zig-args.git",
            "77a2c6557bb9768dc332f98cc6cbc9eac94c93aa",
        )
    );
}

#[test]
fn test_layering_later_source_wins() {
    let config = Config::builder()
        .add_toml_str("[sync]\nbase_dir = \"first\"")
        .add_toml_str("[sync]\nbase_dir = \"second\"")
        .build()
        .unwrap();
    assert_eq!(config.sync.base_dir, "second");
}

#[test]
fn test_set_override_wins_over_file() {
    let config = Config::builder()
        .add_toml_str("[global]\ndry = false")
        .set("global.dry", true)
        .unwrap()
        .build()
        .unwrap();
    assert!(config.global.dry);
}

#[test]
fn test_unknown_key_rejected() {
    assert!(Config::parse("frobnicate = 1").is_err());
    assert!(Config::parse("[global]\nfrobnicate = 1").is_err());
}

#[test]
fn test_invalid_log_level_rejected() {
    let result = Config::parse("[global]\noutput_log_level = 9");
    assert!(result.is_err());
}

#[test]
fn test_validate_rejects_empty_name() {
    let result = Config::parse(
        "[[libraries]]\nname = \"\"\nurl = \"https://example.com/a.git\"\nrev = \"master\"",
    );
    assert!(result.is_err());
}

#[test]
fn test_validate_rejects_path_separators() {
    let mut config = Config::default();
    config
        .libraries
        .push(LibrarySpec::new("../escape", "https://example.com/a.git", "master"));
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_empty_rev() {
    let mut config = Config::default();
    config
        .libraries
        .push(LibrarySpec::new("lib", "https://example.com/a.git", ""));
    assert!(config.validate().is_err());
}

#[test]
fn test_format_options_deterministic() {
    let config = Config::parse(SAMPLE).unwrap();
    let first = config.format_options();
    let second = config.format_options();
    assert_eq!(first, second);

    // Library entries come last, in configured order
    let lib_lines: Vec<&String> = first
        .iter()
        .filter(|l| l.starts_with("libraries."))
        .collect();
    assert_eq!(lib_lines.len(), 2);
    assert!(lib_lines[0].starts_with("libraries.zig-args"));
    assert!(lib_lines[1].starts_with("libraries.zigimg"));
}

#[test]
fn test_format_loaded_files() {
    let loader = Config::builder().add_toml_str("");
    let listed = loader.format_loaded_files();
    assert_eq!(listed, vec!["1. [string] <string>".to_string()]);
}
