//! Config show subcommand
//!
//! Displays the effective configuration in table or JSON format.

use std::path::{Path, PathBuf};

use anyhow::Result;
use comfy_table::{Cell, Color, Table};
use knownhosts_trust_core::TrustConfig;

/// Show effective configuration
///
/// Paths left unset in the file are shown with the default they resolve to.
pub fn cmd_config_show(
    config: &TrustConfig,
    config_path: &Path,
    json: bool,
    quiet: bool,
) -> Result<()> {
    if json {
        let output = serde_json::to_string_pretty(&EffectiveConfig::from(config))?;
        println!("{output}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Key", "Value"]);

    table.add_row(vec![
        Cell::new("version"),
        Cell::new(config.version.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("known_hosts_path"),
        format_path(
            config.known_hosts_path.is_some(),
            config.resolved_known_hosts_path(),
        ),
    ]);
    table.add_row(vec![
        Cell::new("ssh_config_path"),
        format_path(
            config.ssh_config_path.is_some(),
            config.resolved_ssh_config_path(),
        ),
    ]);
    table.add_row(vec![
        Cell::new("lock_timeout_secs"),
        Cell::new(config.lock_timeout_secs.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("keyscan_program"),
        Cell::new(&config.keyscan_program),
    ]);
    table.add_row(vec![
        Cell::new("keyscan_timeout_secs"),
        Cell::new(config.keyscan_timeout_secs.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("hash_hosts"),
        Cell::new(config.hash_hosts.to_string()),
    ]);

    println!("{table}");

    if !quiet {
        println!();
        if config_path.exists() {
            println!("Config file: {}", config_path.display());
        } else {
            println!("Config file: {} (not present, using defaults)", config_path.display());
        }
    }

    Ok(())
}

/// Explicit paths are plain, defaults are dimmed, unresolvable ones are red
fn format_path(explicit: bool, resolved: Option<PathBuf>) -> Cell {
    match resolved {
        Some(path) if explicit => Cell::new(path.display()),
        Some(path) => Cell::new(format!("{} (default)", path.display())).fg(Color::DarkGrey),
        None => Cell::new("(no home directory)").fg(Color::Red),
    }
}

/// Config with default paths filled in, for JSON output
#[derive(serde::Serialize)]
struct EffectiveConfig {
    version: u32,
    known_hosts_path: Option<PathBuf>,
    ssh_config_path: Option<PathBuf>,
    lock_timeout_secs: u64,
    keyscan_program: String,
    keyscan_timeout_secs: u32,
    hash_hosts: bool,
}

impl From<&TrustConfig> for EffectiveConfig {
    fn from(config: &TrustConfig) -> Self {
        Self {
            version: config.version,
            known_hosts_path: config.resolved_known_hosts_path(),
            ssh_config_path: config.resolved_ssh_config_path(),
            lock_timeout_secs: config.lock_timeout_secs,
            keyscan_program: config.keyscan_program.clone(),
            keyscan_timeout_secs: config.keyscan_timeout_secs,
            hash_hosts: config.hash_hosts,
        }
    }
}
