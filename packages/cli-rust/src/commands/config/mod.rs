//! Config subcommand implementations
//!
//! Provides `kht config` subcommands for viewing and creating configuration.

mod init;
mod path;
mod show;

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use knownhosts_trust_core::TrustConfig;

pub use init::cmd_config_init;
pub use path::cmd_config_path;
pub use show::cmd_config_show;

/// Configuration command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Output as JSON instead of table format
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Show effective configuration
    Show {
        /// Output as JSON instead of table format
        #[arg(long)]
        json: bool,
    },
    /// Print the config file location
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file (a .bak copy is kept)
        #[arg(long, short)]
        force: bool,
    },
}

/// Handle config command
///
/// Defaults to Show when no subcommand is given.
pub fn cmd_config(
    args: ConfigArgs,
    config: &TrustConfig,
    config_path: &Path,
    custom_path: bool,
    quiet: bool,
) -> Result<()> {
    match args.command {
        Some(ConfigSubcommands::Show { json }) => {
            cmd_config_show(config, config_path, json || args.json, quiet)
        }
        Some(ConfigSubcommands::Path) => cmd_config_path(config_path),
        Some(ConfigSubcommands::Init { force }) => {
            cmd_config_init(config_path, custom_path, force, quiet)
        }
        None => cmd_config_show(config, config_path, args.json, quiet),
    }
}
