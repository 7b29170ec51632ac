// extsync: External Dependency Syncer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync command arguments.
//!
//! # Flag Effects
//!
//! ```text
//! Pull control: --pull/--no-pull (default from [sync] config)
//! --shallow     clone with --depth 1
//! --pause       wait for a keypress after Done
//! ```

use clap::ArgAction;
use clap::Args;

/// Arguments for the `sync` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SyncArgs {
    /// Pull behavior toggles.
    #[command(flatten)]
    pub pull_behavior: PullArgs,

    /// Clones with --depth 1. A pinned commit usually needs full history,
    /// so only use this when every revision is a branch name.
    #[arg(long)]
    pub shallow: bool,

    /// Waits for a newline on stdin after the final `Done` line.
    #[arg(long)]
    pub pause: bool,

    /// Libraries to sync. Globs like 'zig-*' are supported.
    /// With no names, every configured library is synced.
    #[arg(value_name = "LIBRARY")]
    pub libraries: Vec<String>,
}

/// Pull behavior toggles.
#[derive(Debug, Clone, Default, Args)]
pub struct PullArgs {
    /// Pull repos that are already cloned.
    #[arg(long = "pull", action = ArgAction::SetTrue, conflicts_with = "no_pull")]
    pub pull: bool,

    /// Don't pull repos that are already cloned.
    #[arg(long = "no-pull", action = ArgAction::SetTrue, conflicts_with = "pull")]
    pub no_pull: bool,
}

impl SyncArgs {
    /// Returns the effective pull setting.
    #[must_use]
    pub const fn pull_setting(&self) -> Option<bool> {
        if self.pull_behavior.pull {
            Some(true)
        } else if self.pull_behavior.no_pull {
            Some(false)
        } else {
            None
        }
    }
}
