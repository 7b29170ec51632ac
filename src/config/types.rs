// extsync: External Dependency Syncer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for extsync.
//!
//! ```text
//! Config: GlobalConfig, SyncConfig, PathsConfig, [LibrarySpec]
//! LibrarySpec: name + remote url + pinned revision
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// One external library to keep in sync.
///
/// `name` is the directory created under the base directory, `url` is any
/// git-compatible remote, and `rev` is an opaque commit hash or branch name.
/// Specs are consumed in the order they appear in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibrarySpec {
    /// Directory name under the base directory.
    pub name: String,
    /// Remote repository URL.
    pub url: String,
    /// Commit hash or branch name to check out.
    pub rev: String,
}

impl LibrarySpec {
    /// Creates a new library spec.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        rev: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            rev: rev.into(),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log the operations that would run without touching the filesystem.
    pub dry: bool,
    /// Log level for stdout output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file.
    pub log_file: PathBuf,
    /// Wait for a newline on stdin after the final `Done` line.
    pub pause: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::from("extsync.log"),
            pause: false,
        }
    }
}

/// Sync behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Directory (relative to `paths.root`) that holds the working copies.
    pub base_dir: String,
    /// Skip the pull step for libraries that are already cloned.
    pub no_pull: bool,
    /// Clone with `--depth 1`. A pinned commit usually needs full history,
    /// so this defaults to off.
    pub shallow: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_dir: "external".to_string(),
            no_pull: false,
            shallow: false,
        }
    }
}

/// Paths configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Root directory that contains the base directory.
    pub root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}
