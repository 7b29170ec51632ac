// extsync: External Dependency Syncer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for extsync.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. extsync.toml (cwd)
//! 3. --ini files (in order)
//! 4. EXTSYNC_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Library List
//!
//! ```toml
//! [[libraries]]
//! name = "zig-args"
//! url = "https://github.com/MasterQ32/zig-args.git"
//! rev = "77a2c6557bb9768dc332f98cc6cbc9eac94c93aa"
//! ```
//!
//! `[[libraries]]` entries are processed in file order.

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GlobalConfig, LibrarySpec, PathsConfig, SyncConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Sync behavior.
    pub sync: SyncConfig,
    /// Paths configuration.
    pub paths: PathsConfig,
    /// External libraries to sync, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<LibrarySpec>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use extsync::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("extsync.toml")
    ///     .with_env_prefix("EXTSYNC")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// The directory that holds all library working copies.
    #[must_use]
    pub fn external_dir(&self) -> PathBuf {
        self.paths.root.join(&self.sync.base_dir)
    }

    /// Validate the library list.
    ///
    /// A library name becomes a relative directory under the base directory,
    /// so it must be non-empty and must not contain path separators.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` describing the offending entry.
    pub fn validate(&self) -> Result<()> {
        for (i, spec) in self.libraries.iter().enumerate() {
            let invalid = |key: &str, message: String| {
                ConfigError::InvalidValue {
                    section: format!("libraries[{i}]"),
                    key: key.to_string(),
                    message,
                }
            };

            if spec.name.is_empty() {
                return Err(invalid("name", "must not be empty".to_string()).into());
            }
            if spec.name.contains(['/', '\\']) || spec.name == "." || spec.name == ".." {
                return Err(invalid(
                    "name",
                    format!("'{}' is not a plain directory name", spec.name),
                )
                .into());
            }
            if spec.url.is_empty() {
                return Err(invalid("url", "must not be empty".to_string()).into());
            }
            if spec.rev.is_empty() {
                return Err(invalid("rev", "must not be empty".to_string()).into());
            }
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Returns a vector of formatted strings representing all configuration
    /// options. Output is deterministically ordered using `BTreeMap`, with
    /// the library list appended in configured order.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_sync_options(&mut options);
        self.format_paths_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        let mut lines: Vec<String> = options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect();

        for spec in &self.libraries {
            lines.push(format!("libraries.{} = {} @ {}", spec.name, spec.rev, spec.url));
        }

        lines
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global.log_file.display().to_string(),
        );
        options.insert("global.pause".into(), self.global.pause.to_string());
    }

    fn format_sync_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("sync.base_dir".into(), self.sync.base_dir.clone());
        options.insert("sync.no_pull".into(), self.sync.no_pull.to_string());
        options.insert("sync.shallow".into(), self.sync.shallow.to_string());
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("paths.root".into(), self.paths.root.display().to_string());
    }
}
