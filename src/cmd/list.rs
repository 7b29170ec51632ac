// extsync: External Dependency Syncer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for extsync.

use crate::config::Config;

/// Main handler for the list command.
///
/// Prints the configured libraries in file order, one per line.
pub fn run_list_command(config: &Config) {
    if config.libraries.is_empty() {
        println!("No libraries configured");
        return;
    }

    let name_width = config
        .libraries
        .iter()
        .map(|spec| spec.name.len())
        .max()
        .unwrap_or(0);

    for spec in &config.libraries {
        println!("{:<name_width$}  {}  {}", spec.name, spec.rev, spec.url);
    }
}
