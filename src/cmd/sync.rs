// extsync: External Dependency Syncer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync command implementation for extsync.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::AsyncBufReadExt;

use crate::cli::sync::SyncArgs;
use crate::config::Config;
use crate::error::Result;
use crate::sync::{Syncer, select_libraries};

/// Main handler for the sync command.
///
/// Syncs the selected libraries strictly one after another, prints the
/// final `Done` line, and optionally waits for a keypress.
///
/// # Errors
///
/// Returns an error if library selection fails, the base directory cannot
/// be created, a clone fails, or the run is interrupted.
pub async fn run_sync_command(args: &SyncArgs, config: &Config, dry_run: bool) -> Result<()> {
    let config = Arc::new(config.clone());

    let specs = select_libraries(&config.libraries, &args.libraries)?;
    if specs.is_empty() {
        tracing::warn!("No libraries configured, nothing to sync");
        println!("Done");
        return Ok(());
    }

    let mut syncer = Syncer::new(
        Arc::clone(&config),
        tokio_util::sync::CancellationToken::new(),
    )
    .with_dry_run(dry_run);

    if let Some(pull) = args.pull_setting() {
        syncer = syncer.with_no_pull(!pull);
    }
    if args.shallow {
        syncer = syncer.with_shallow(true);
    }

    let cancel_token = syncer.cancel_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, interrupting sync...");
            cancel_token.cancel();
        }
    });

    syncer.sync_all(&specs).await?;

    println!("Done");

    if args.pause || config.global.pause {
        wait_for_enter().await?;
    }

    Ok(())
}

/// Blocks until the user presses Enter.
async fn wait_for_enter() -> Result<()> {
    println!("Press Enter to exit...");
    let mut line = String::new();
    let mut reader = tokio::io::BufReader::new(tokio::io::stdin());
    reader
        .read_line(&mut line)
        .await
        .context("failed to read from stdin")?;
    Ok(())
}
