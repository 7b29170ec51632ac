// extsync: External Dependency Syncer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["extsync", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_no_command() {
    let cli = Cli::try_parse_from(["extsync"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "extsync", "-l", "5", "-d", "/tmp/work", "--dry", "sync",
    ])
    .unwrap();
    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(
        cli.global.destination.as_deref(),
        Some(std::path::Path::new("/tmp/work"))
    );
    assert!(cli.global.dry);
    assert!(matches!(cli.command, Some(Command::Sync(_))));
}

#[test]
fn test_parse_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["extsync", "-l", "7", "sync"]).is_err());
}

#[test]
fn test_parse_sync_libraries() {
    let cli = Cli::try_parse_from(["extsync", "sync", "zig-args", "zig-*"]).unwrap();
    let Some(Command::Sync(args)) = cli.command else {
        panic!("expected sync command");
    };
    assert_eq!(args.libraries, vec!["zig-args", "zig-*"]);
    assert_eq!(args.pull_setting(), None);
}

#[test]
fn test_parse_sync_pull_toggles() {
    let cli = Cli::try_parse_from(["extsync", "sync", "--no-pull"]).unwrap();
    let Some(Command::Sync(args)) = cli.command else {
        panic!("expected sync command");
    };
    assert_eq!(args.pull_setting(), Some(false));

    let cli = Cli::try_parse_from(["extsync", "sync", "--pull"]).unwrap();
    let Some(Command::Sync(args)) = cli.command else {
        panic!("expected sync command");
    };
    assert_eq!(args.pull_setting(), Some(true));
}

#[test]
fn test_parse_sync_pull_conflict() {
    assert!(Cli::try_parse_from(["extsync", "sync", "--pull", "--no-pull"]).is_err());
}

#[test]
fn test_parse_multiple_inis_in_order() {
    let cli = Cli::try_parse_from(["extsync", "-i", "a.toml", "--ini", "b.toml", "list"]).unwrap();
    let inis: Vec<&str> = cli
        .global
        .inis
        .iter()
        .map(|p| p.to_str().unwrap())
        .collect();
    assert_eq!(inis, vec!["a.toml", "b.toml"]);
}

#[test]
fn test_parse_sync_pause_and_shallow() {
    let cli = Cli::try_parse_from(["extsync", "sync", "--pause", "--shallow"]).unwrap();
    let Some(Command::Sync(args)) = cli.command else {
        panic!("expected sync command");
    };
    assert!(args.pause);
    assert!(args.shallow);
}
