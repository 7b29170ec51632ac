// extsync: External Dependency Syncer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The dependency syncer.
//!
//! # Architecture
//!
//! ```text
//! Syncer::sync_all(specs)
//!      |
//!      v  per library, in configured order
//! banner --> clone (if absent) --> pull --> checkout <rev>
//!               |                   |          |
//!             fatal               warn       warn
//!                                 + continue + continue
//! ```
//!
//! Every git invocation receives the library directory as an explicit
//! working directory; the process-wide current directory is never mutated,
//! so the only ordering constraint left is the intentional per-library
//! sequence.
//!
//! # Failure policy
//!
//! A failed clone stops the whole run: without a working copy the
//! remaining steps for that library are meaningless, and the original
//! behavior this preserves was a hard crash. Failed pulls and checkouts
//! are logged as warnings and the run continues.

pub mod tool;


use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use wax::{Glob, Program};

use crate::config::Config;
use crate::config::types::LibrarySpec;
use crate::error::Result;
use crate::git::query::head_commit;
use tool::GitTool;

/// Context provided to sync operations.
///
/// Contains configuration, the cancellation token, and execution flags.
#[derive(Clone)]
pub struct SyncContext {
    config: Arc<Config>,
    cancel_token: CancellationToken,
    dry_run: bool,
}

impl SyncContext {
    /// Creates a new `SyncContext`.
    #[must_use]
    pub const fn new(config: Arc<Config>, cancel_token: CancellationToken) -> Self {
        Self {
            config,
            cancel_token,
            dry_run: false,
        }
    }

    /// Gets a reference to the configuration.
    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Gets a reference to the cancellation token.
    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    /// Returns whether this is a dry-run execution.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Sets dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Checks if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// Brings library working copies to their pinned revisions, one at a time.
pub struct Syncer {
    ctx: SyncContext,
    no_pull: bool,
    shallow: bool,
}

impl Syncer {
    /// Creates a `Syncer`, taking pull/clone behavior from `[sync]` config.
    #[must_use]
    pub fn new(config: Arc<Config>, cancel_token: CancellationToken) -> Self {
        let no_pull = config.sync.no_pull;
        let shallow = config.sync.shallow;
        Self {
            ctx: SyncContext::new(config, cancel_token),
            no_pull,
            shallow,
        }
    }

    /// Sets dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.ctx = self.ctx.with_dry_run(dry_run);
        self
    }

    /// Overrides the `no_pull` setting.
    #[must_use]
    pub const fn with_no_pull(mut self, no_pull: bool) -> Self {
        self.no_pull = no_pull;
        self
    }

    /// Overrides the `shallow` setting.
    #[must_use]
    pub const fn with_shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }

    /// The directory that holds all library working copies.
    #[must_use]
    pub fn external_dir(&self) -> PathBuf {
        self.ctx.config().external_dir()
    }

    /// Gets a reference to the cancellation token.
    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        self.ctx.cancel_token()
    }

    /// Syncs every spec in order, strictly one after another.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be created, a clone
    /// fails, or the run is interrupted. Pull and checkout failures do not
    /// stop the run.
    pub async fn sync_all(&self, specs: &[LibrarySpec]) -> Result<()> {
        let base = self.external_dir();
        if self.ctx.is_dry_run() {
            info!(path = %base.display(), "[dry-run] Would ensure base directory");
        } else {
            std::fs::create_dir_all(&base)
                .with_context(|| format!("failed to create base directory {}", base.display()))?;
        }

        for spec in specs {
            if self.ctx.is_cancelled() {
                anyhow::bail!("sync interrupted before {}", spec.name);
            }
            self.sync_one(spec).await?;
        }

        Ok(())
    }

    /// Syncs a single library: banner, clone-if-absent, pull, checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the clone fails or the run is interrupted.
    pub async fn sync_one(&self, spec: &LibrarySpec) -> Result<()> {
        print!("{}", banner(&spec.name, &spec.url));

        let dest = self.external_dir().join(&spec.name);

        if dest.exists() {
            debug!(name = %spec.name, path = %dest.display(), "Already cloned");
        } else {
            info!(name = %spec.name, url = %spec.url, "Cloning");
            GitTool::new()
                .url(&spec.url)
                .path(&dest)
                .shallow(self.shallow)
                .clone_op()
                .run(&self.ctx)
                .await
                .with_context(|| format!("failed to clone {}", spec.name))?;
        }

        if self.no_pull {
            debug!(name = %spec.name, "Skipping pull (no_pull=true)");
        } else if let Err(e) = GitTool::new().path(&dest).pull_op().run(&self.ctx).await {
            if self.ctx.is_cancelled() {
                anyhow::bail!("sync interrupted during pull of {}", spec.name);
            }
            warn!(name = %spec.name, error = %e, "Pull failed, continuing");
        }

        if let Err(e) = GitTool::new()
            .path(&dest)
            .rev(&spec.rev)
            .checkout_op()
            .run(&self.ctx)
            .await
        {
            if self.ctx.is_cancelled() {
                anyhow::bail!("sync interrupted during checkout of {}", spec.name);
            }
            warn!(name = %spec.name, rev = %spec.rev, error = %e, "Checkout failed, continuing");
        } else if !self.ctx.is_dry_run() {
            match head_commit(&dest) {
                Ok(head) => debug!(name = %spec.name, head = %head, "Working copy synced"),
                Err(e) => debug!(name = %spec.name, error = %e, "Could not read HEAD"),
            }
        }

        Ok(())
    }
}

/// Renders the per-library banner.
///
/// The separator is `2*4 + len(name) + 2` dashes, matching the width of
/// the `---- <name> ----` line between them.
#[must_use]
pub fn banner(name: &str, url: &str) -> String {
    let separator = separator(name);
    format!("\n{separator}\n---- {name} ----\n{separator}\nOrigin: {url}\n")
}

/// The banner separator line for a library name.
#[must_use]
pub fn separator(name: &str) -> String {
    "-".repeat(2 * 4 + name.len() + 2)
}

/// Resolves positional library selectors against the configured list.
///
/// With no selectors, every configured library is returned. Each selector
/// is first tried as an exact name, then as a glob over names. The result
/// preserves the configured order and contains no duplicates.
///
/// # Errors
///
/// Returns an error if a selector is not a valid glob or matches nothing.
pub fn select_libraries(all: &[LibrarySpec], selectors: &[String]) -> Result<Vec<LibrarySpec>> {
    if selectors.is_empty() {
        return Ok(all.to_vec());
    }

    let mut selected: Vec<bool> = vec![false; all.len()];

    for selector in selectors {
        let mut matched = false;

        for (i, spec) in all.iter().enumerate() {
            if spec.name == *selector {
                selected[i] = true;
                matched = true;
            }
        }

        if !matched {
            let glob = Glob::new(selector)
                .with_context(|| format!("Invalid library pattern: {selector}"))?;
            for (i, spec) in all.iter().enumerate() {
                if glob.is_match(spec.name.as_str()) {
                    selected[i] = true;
                    matched = true;
                }
            }
        }

        if !matched {
            anyhow::bail!("no configured library matches '{selector}'");
        }
    }

    Ok(all
        .iter()
        .zip(selected)
        .filter_map(|(spec, keep)| keep.then(|| spec.clone()))
        .collect())
}
