// extsync: External Dependency Syncer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git tool for repository operations.
//!
//! ```text
//! GitTool
//! Operations: Clone | Pull | Checkout
//! Builder: url/path/rev/shallow
//! ```
//!
//! All operations run the git CLI through
//! [`ProcessBuilder::run_with_cancellation`](crate::process::ProcessBuilder)
//! so that:
//! - output streams live, interleaved with the per-library banners
//! - Ctrl+C interrupts the operation in flight
//!
//! For read-only queries (current branch, HEAD commit), use [`crate::git`].

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use super::SyncContext;
use crate::error::{GitError, Result};
use crate::process::ProcessBuilder;

/// Git tool for repository operations.
///
/// # Example
///
/// ```ignore
/// // Clone a repository
/// let tool = GitTool::new()
///     .url("https://github.com/example/repo.git")
///     .path("./external/repo")
///     .clone_op();
/// tool.run(&ctx).await?;
///
/// // Check out a pinned revision
/// let tool = GitTool::new()
///     .path("./external/repo")
///     .rev("77a2c6557bb9768dc332f98cc6cbc9eac94c93aa")
///     .checkout_op();
/// tool.run(&ctx).await?;
/// ```
#[derive(Debug, Clone)]
pub struct GitTool {
    url: Option<String>,
    path: Option<PathBuf>,
    rev: Option<String>,
    shallow: bool,
    pub(super) operation: GitOperation,
}

/// Git operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GitOperation {
    /// Clone a repository.
    #[default]
    Clone,
    /// Pull updates for the currently checked-out branch.
    Pull,
    /// Checkout a branch, tag, or commit.
    Checkout,
}

impl GitTool {
    /// Creates a new `GitTool` with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            url: None,
            path: None,
            rev: None,
            shallow: false,
            operation: GitOperation::Clone,
        }
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn rev(mut self, rev: impl Into<String>) -> Self {
        self.rev = Some(rev.into());
        self
    }

    #[must_use]
    pub const fn shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }

    #[must_use]
    pub const fn clone_op(mut self) -> Self {
        self.operation = GitOperation::Clone;
        self
    }

    #[must_use]
    pub const fn pull_op(mut self) -> Self {
        self.operation = GitOperation::Pull;
        self
    }

    #[must_use]
    pub const fn checkout_op(mut self) -> Self {
        self.operation = GitOperation::Checkout;
        self
    }

    /// Runs the configured operation.
    ///
    /// # Errors
    ///
    /// Returns an error if a required builder field is missing, the git
    /// executable cannot be found, the operation is interrupted, or git
    /// exits with a non-zero status.
    pub async fn run(&self, ctx: &SyncContext) -> Result<()> {
        match self.operation {
            GitOperation::Clone => self.do_clone(ctx).await,
            GitOperation::Pull => self.do_pull(ctx).await,
            GitOperation::Checkout => self.do_checkout(ctx).await,
        }
    }

    /// Creates a git process builder with prompts disabled.
    fn git() -> Result<ProcessBuilder> {
        Ok(ProcessBuilder::which("git")
            .context("git executable not found")?
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0"))
    }

    /// Executes a git clone operation.
    async fn do_clone(&self, ctx: &SyncContext) -> Result<()> {
        let url = self
            .url
            .as_ref()
            .context("GitTool: url is required for clone")?;
        let path = self
            .path
            .as_ref()
            .context("GitTool: path is required for clone")?;

        if ctx.is_dry_run() {
            info!(
                url = %url,
                path = %path.display(),
                shallow = self.shallow,
                "[dry-run] Would clone repository"
            );
            return Ok(());
        }

        let mut builder = Self::git()?.arg("clone");

        if self.shallow {
            builder = builder.arg("--depth").arg("1");
        }

        builder = builder
            .arg(url)
            .arg(path.display().to_string());

        debug!(
            url = %url,
            path = %path.display(),
            shallow = self.shallow,
            "Cloning repository"
        );

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .map_err(|e| GitError::CloneFailed {
                url: url.clone(),
                message: format!("{e:#}"),
            })?;

        if output.is_interrupted() {
            anyhow::bail!("Git clone was interrupted");
        }

        info!(
            url = %url,
            path = %path.display(),
            "Repository cloned successfully"
        );

        Ok(())
    }

    /// Executes a git pull operation.
    async fn do_pull(&self, ctx: &SyncContext) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .context("GitTool: path is required for pull")?;

        if ctx.is_dry_run() {
            info!(
                path = %path.display(),
                "[dry-run] Would pull repository"
            );
            return Ok(());
        }

        let builder = Self::git()?.arg("pull").cwd(path);

        debug!(path = %path.display(), "Pulling repository");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .map_err(|e| GitError::CommandFailed {
                command: format!("git pull in {}", path.display()),
                message: format!("{e:#}"),
            })?;

        if output.is_interrupted() {
            anyhow::bail!("Git pull was interrupted");
        }

        info!(path = %path.display(), "Repository pulled successfully");

        Ok(())
    }

    /// Executes a git checkout operation.
    async fn do_checkout(&self, ctx: &SyncContext) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .context("GitTool: path is required for checkout")?;

        let rev = self
            .rev
            .as_ref()
            .context("GitTool: rev is required for checkout")?;

        if ctx.is_dry_run() {
            info!(
                path = %path.display(),
                rev,
                "[dry-run] Would checkout"
            );
            return Ok(());
        }

        let builder = Self::git()?
            .arg("-c")
            .arg("advice.detachedHead=false")
            .arg("checkout")
            .arg(rev)
            .cwd(path);

        debug!(path = %path.display(), rev, "Checking out");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .map_err(|e| GitError::CheckoutFailed {
                what: rev.clone(),
                message: format!("{e:#}"),
            })?;

        if output.is_interrupted() {
            anyhow::bail!("Git checkout was interrupted");
        }

        info!(path = %path.display(), rev, "Checked out successfully");

        Ok(())
    }
}

impl Default for GitTool {
    fn default() -> Self {
        Self::new()
    }
}
