//! Config init subcommand
//!
//! Writes a config file holding the defaults, ready to edit.

use std::path::Path;

use anyhow::{Result, bail};
use console::style;
use knownhosts_trust_core::{TrustConfig, save_config, save_config_to};

/// Write the default configuration
///
/// Refuses to replace an existing file unless `force` is set. The default
/// location is used unless `--config` pointed somewhere else.
pub fn cmd_config_init(
    config_path: &Path,
    custom_path: bool,
    force: bool,
    quiet: bool,
) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite it.",
            config_path.display()
        );
    }

    let defaults = TrustConfig::default();
    if custom_path {
        save_config_to(&defaults, config_path)?;
    } else {
        save_config(&defaults)?;
    }

    if !quiet {
        println!(
            "{} Wrote default config to {}",
            style("\u{2713}").green(),
            style(config_path.display()).cyan()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use knownhosts_trust_core::load_config_from;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn init_writes_loadable_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kht").join("config.json");

        cmd_config_init(&path, true, false, true).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), TrustConfig::default());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"version": 1, "hash_hosts": true}"#).unwrap();

        let err = cmd_config_init(&path, true, false, true).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert!(load_config_from(&path).unwrap().hash_hosts);
    }

    #[test]
    fn init_force_overwrites_and_keeps_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"version": 1, "hash_hosts": true}"#).unwrap();

        cmd_config_init(&path, true, true, true).unwrap();

        assert!(!load_config_from(&path).unwrap().hash_hosts);
        assert!(path.with_extension("json.bak").exists());
    }
}
