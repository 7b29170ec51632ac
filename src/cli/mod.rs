// extsync: External Dependency Syncer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for extsync using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! extsync [global options] <command>
//! sync [libraries...]
//! list
//! options
//! inis
//! version
//! ```

pub mod global;
pub mod sync;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::sync::SyncArgs;
use clap::{Parser, Subcommand};

/// External Dependency Syncer
///
/// Keeps third-party source dependencies checked out at pinned revisions.
#[derive(Debug, Parser)]
#[command(
    name = "extsync",
    author,
    version,
    about = "External Dependency Syncer",
    long_about = "extsync Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Keeps a set of third-party source dependencies checked out at\n\
                  pinned commits inside a local external/ directory. `extsync sync`\n\
                  processes every configured library; `extsync sync <name>...`\n\
                  selects a subset. See `extsync <command> --help` for more\n\
                  information about a command.",
    after_help = "INI FILES:\n\n\
                  By default, extsync will look for a master INI `extsync.toml` in\n\
                  the current directory. Additional INIs can be specified with\n\
                  --ini, those will be loaded after the master and override it.\n\
                  Use --no-default-inis to disable auto detection and only use\n\
                  --ini. Environment variables prefixed with EXTSYNC_ override\n\
                  file values."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values from the INIs.
    Options,

    /// Lists the INIs used by extsync.
    Inis,

    /// Syncs the configured external libraries to their pinned revisions.
    Sync(SyncArgs),

    /// Lists the configured external libraries.
    List,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
