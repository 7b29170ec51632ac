// extsync: External Dependency Syncer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};

#[test]
fn test_log_level_new_valid() {
    for level in 0..=6 {
        let parsed = LogLevel::new(level).unwrap();
        assert_eq!(parsed.as_u8(), level);
    }
}

#[test]
fn test_log_level_new_out_of_range() {
    assert!(LogLevel::new(7).is_err());
    assert!(LogLevel::from_u8(7).is_none());
}

#[test]
fn test_log_level_filter_strings() {
    let filters: Vec<&str> = (0..=6)
        .map(|l| LogLevel::new(l).unwrap().to_filter_string())
        .collect();
    assert_eq!(
        filters,
        vec!["off", "error", "warn", "info", "debug", "trace", "trace"]
    );
}

#[test]
fn test_log_level_tracing_level() {
    assert!(LogLevel::SILENT.to_tracing_level().is_none());
    assert_eq!(
        LogLevel::INFO.to_tracing_level(),
        Some(tracing::Level::INFO)
    );
    assert_eq!(
        LogLevel::DUMP.to_tracing_level(),
        Some(tracing::Level::TRACE)
    );
}

#[test]
fn test_log_level_try_from() {
    assert_eq!(LogLevel::try_from(2u8).unwrap(), LogLevel::WARN);
    assert!(LogLevel::try_from(42u8).is_err());
    assert_eq!(u8::from(LogLevel::ERROR), 1);
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(!config.show_target());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::DEBUG)
        .with_file_level(LogLevel::TRACE)
        .with_log_file("sync.log".to_string())
        .build();
    assert_eq!(config.console_level(), LogLevel::DEBUG);
    assert_eq!(config.log_file(), Some("sync.log"));
}
