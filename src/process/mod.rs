// extsync: External Dependency Syncer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async subprocess execution with streamed output.
//!
//! ```text
//! ProcessBuilder
//!  • new/which
//!  • arg/args/cwd/env
//!  • run_with_cancellation(token)
//!        |
//!        v
//!   tokio::process  --> stdout/stderr lines --> tracing
//!        |
//!        v
//!   ProcessOutput { exit_code, stdout, stderr, interrupted }
//! ```
//!
//! Output lines are forwarded to tracing as they arrive so the invoked
//! tool's own diagnostics stay visible, interleaved with the per-library
//! banners. On cancellation the child is killed and the output is marked
//! interrupted.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{OnceLock, RwLock};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::{ExtResult, ProcessError, Result};

/// Static cache for executable paths resolved via `which`.
static EXECUTABLE_CACHE: OnceLock<RwLock<BTreeMap<String, PathBuf>>> = OnceLock::new();

/// Get the executable cache, initializing if needed.
fn exe_cache() -> &'static RwLock<BTreeMap<String, PathBuf>> {
    EXECUTABLE_CACHE.get_or_init(|| RwLock::new(BTreeMap::new()))
}

/// Output from a completed process.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
    interrupted: bool,
}

impl ProcessOutput {
    /// Returns the process exit code (0 = success).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Returns captured stdout.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Returns captured stderr.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Returns whether the process was interrupted.
    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Returns true if the process exited successfully (code 0).
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Builder for configuring and running a subprocess.
///
/// Arguments are always passed as a vector (no shell interpretation) and
/// the working directory is explicit per invocation.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env: Vec<(String, String)>,
}

impl ProcessBuilder {
    /// Creates a builder for a program at a known path.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
        }
    }

    /// Creates a builder by resolving `name` on PATH.
    ///
    /// Resolved paths are cached for the lifetime of the process.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError::ExecutableNotFound` if `name` is not on PATH.
    pub fn which(name: &str) -> ExtResult<Self> {
        if let Some(cached) = exe_cache()
            .read()
            .ok()
            .and_then(|cache| cache.get(name).cloned())
        {
            return Ok(Self::new(cached));
        }

        let resolved = which::which(name).map_err(|_| ProcessError::ExecutableNotFound {
            name: name.to_string(),
        })?;

        if let Ok(mut cache) = exe_cache().write() {
            cache.insert(name.to_string(), resolved.clone());
        }

        debug!(name, path = %resolved.display(), "Resolved executable");
        Ok(Self::new(resolved))
    }

    /// Appends a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends multiple arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory for the child process.
    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Sets an environment variable for the child process.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// The command line as it will be spawned, for diagnostics.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Spawns the process and waits for it, streaming output to tracing.
    ///
    /// When `token` is cancelled the child is killed and the returned
    /// output is marked interrupted (with whatever exit code the kill
    /// produced). A non-zero exit of a non-interrupted process is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned, its output cannot
    /// be read, or it exits with a non-zero status.
    pub async fn run_with_cancellation(self, token: CancellationToken) -> Result<ProcessOutput> {
        // Check if already cancelled before spawning
        if token.is_cancelled() {
            return Ok(ProcessOutput {
                exit_code: -1,
                stdout: String::new(),
                stderr: String::new(),
                interrupted: true,
            });
        }

        let command_line = self.command_line();
        debug!(command = %command_line, cwd = ?self.cwd, "Spawning process");

        let mut command = tokio::process::Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        for (key, value) in &self.env {
            command.env(key, value);
        }

        let mut child = command.spawn().map_err(|e| ProcessError::SpawnFailed {
            command: command_line.clone(),
            source: e,
        })?;

        let stdout = child.stdout.take().ok_or_else(|| ProcessError::OutputError {
            command: command_line.clone(),
            message: "stdout not captured".to_string(),
        })?;
        let stderr = child.stderr.take().ok_or_else(|| ProcessError::OutputError {
            command: command_line.clone(),
            message: "stderr not captured".to_string(),
        })?;

        let stdout_task = tokio::spawn(forward_lines(stdout, "stdout"));
        let stderr_task = tokio::spawn(forward_lines(stderr, "stderr"));

        let mut interrupted = false;
        let status = tokio::select! {
            status = child.wait() => status,
            () = token.cancelled() => {
                interrupted = true;
                child.start_kill().ok();
                child.wait().await
            }
        }
        .map_err(|e| ProcessError::OutputError {
            command: command_line.clone(),
            message: format!("failed to wait for process: {e}"),
        })?;

        let stdout = stdout_task.await.unwrap_or_default();
        let stderr = stderr_task.await.unwrap_or_default();
        let exit_code = status.code().unwrap_or(-1);

        if interrupted {
            debug!(command = %command_line, "Process interrupted");
        } else if !status.success() {
            return Err(ProcessError::NonZeroExit {
                command: command_line,
                code: exit_code,
            }
            .into());
        }

        Ok(ProcessOutput {
            exit_code,
            stdout,
            stderr,
            interrupted,
        })
    }
}

/// Reads a child stream line by line, forwarding each line to tracing and
/// accumulating the full text for the caller.
async fn forward_lines<R>(stream: R, name: &'static str) -> String
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stream).lines();
    let mut collected = String::new();

    while let Ok(Some(line)) = lines.next_line().await {
        info!(stream = name, "{line}");
        collected.push_str(&line);
        collected.push('\n');
    }

    collected
}
