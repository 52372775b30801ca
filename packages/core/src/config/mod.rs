//! Configuration management for knownhosts-trust
//!
//! Handles loading and saving the JSONC configuration file.
//! A missing config file means defaults; unknown fields are rejected.

pub mod paths;
pub mod schema;

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jsonc_parser::parse_to_serde_value;

pub use paths::{get_config_dir, get_config_path, get_known_hosts_path, get_ssh_config_path};
pub use schema::TrustConfig;

/// Load configuration from the default config file
///
/// Returns defaults if the file doesn't exist.
pub fn load_config() -> Result<TrustConfig> {
    let config_path =
        get_config_path().ok_or_else(|| anyhow::anyhow!("Could not determine config file path"))?;
    load_config_from(&config_path)
}

/// Load configuration from a specific file
///
/// Supports JSONC (JSON with comments).
pub fn load_config_from(config_path: &Path) -> Result<TrustConfig> {
    if !config_path.exists() {
        tracing::debug!(
            "Config file not found, using defaults: {}",
            config_path.display()
        );
        return Ok(TrustConfig::default());
    }

    let mut file = File::open(config_path)
        .with_context(|| format!("Failed to open config file: {}", config_path.display()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    let parsed_value = parse_to_serde_value(&contents, &Default::default())
        .map_err(|e| anyhow::anyhow!("Invalid JSONC in config file: {}", e))?
        .ok_or_else(|| anyhow::anyhow!("Config file is empty"))?;

    // deny_unknown_fields rejects unknown keys here
    let config: TrustConfig = serde_json::from_value(parsed_value).with_context(|| {
        format!(
            "Invalid configuration in {}. Check for unknown fields or invalid values.",
            config_path.display()
        )
    })?;

    tracing::debug!("Loaded config from: {}", config_path.display());
    Ok(config)
}

/// Save configuration to the default config file
pub fn save_config(config: &TrustConfig) -> Result<PathBuf> {
    let config_path =
        get_config_path().ok_or_else(|| anyhow::anyhow!("Could not determine config file path"))?;
    save_config_to(config, &config_path)?;
    Ok(config_path)
}

/// Save configuration to a specific file
///
/// Creates a backup of an existing file (`config.json.bak`) before
/// overwriting, and creates the parent directory if needed.
pub fn save_config_to(config: &TrustConfig, config_path: &Path) -> Result<()> {
    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
            tracing::info!("Created config directory: {}", parent.display());
        }
    }

    if config_path.exists() {
        let backup_path = config_path.with_extension("json.bak");
        fs::copy(config_path, &backup_path)
            .with_context(|| format!("Failed to create backup at: {}", backup_path.display()))?;
        tracing::debug!("Created config backup: {}", backup_path.display());
    }

    let json = serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;

    let mut file = File::create(config_path)
        .with_context(|| format!("Failed to create config file: {}", config_path.display()))?;

    file.write_all(json.as_bytes())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    tracing::debug!("Saved config to: {}", config_path.display());

    Ok(())
}
