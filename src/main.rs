// extsync: External Dependency Syncer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Sync | List | Options | Inis | Version
//! ```

use std::process::ExitCode;

use extsync::cli::global::GlobalOptions;
use extsync::cli::{self, Command};
use extsync::cmd::config::{run_inis_command, run_options_command};
use extsync::cmd::list::run_list_command;
use extsync::cmd::sync::run_sync_command;
use extsync::config::Config;
use extsync::config::loader::ConfigLoader;
use extsync::logging::init_logging;
use extsync::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            load_config(&cli.global).map(|config| run_options_command(&config))
        }
        Some(Command::Inis) => {
            let loader = build_config_loader(&cli.global);
            run_inis_command(&loader.format_loaded_files());
            Ok(())
        }
        Some(Command::Sync(args)) => match load_config(&cli.global) {
            Ok(config) => run_sync_command(args, &config, cli.global.dry).await,
            Err(e) => Err(e),
        },
        Some(Command::List) => load_config(&cli.global).map(|config| run_list_command(&config)),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional("extsync.toml");
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader.with_env_prefix("EXTSYNC")
}

fn load_config(global: &GlobalOptions) -> extsync::error::Result<Config> {
    let loader = build_config_loader(global);
    apply_cli_overrides(loader, global)
        .and_then(ConfigLoader::build)
        .map_err(|e| {
            eprintln!("Failed to load config: {e}");
            e
        })
}

fn apply_cli_overrides(
    mut loader: ConfigLoader,
    global: &GlobalOptions,
) -> extsync::error::Result<ConfigLoader> {
    if global.dry {
        loader = loader.set("global.dry", true)?;
    }
    if let Some(level) = global.log_level {
        loader = loader.set("global.output_log_level", i64::from(level))?;
    }
    // file_log_level falls back to log_level if not specified
    if let Some(level) = global.file_log_level.or(global.log_level) {
        loader = loader.set("global.file_log_level", i64::from(level))?;
    }
    if let Some(path) = &global.log_file {
        loader = loader.set("global.log_file", path.display().to_string())?;
    }
    if let Some(root) = &global.destination {
        loader = loader.set("paths.root", root.display().to_string())?;
    }
    Ok(loader)
}
