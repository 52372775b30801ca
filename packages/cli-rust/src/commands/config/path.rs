//! Config path subcommand

use std::path::Path;

use anyhow::Result;

/// Print the config file location, whether or not it exists yet
pub fn cmd_config_path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}
