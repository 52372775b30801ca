//! Configuration schema for knownhosts-trust
//!
//! Defines the structure and defaults for the config.json file.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths;

/// Main configuration structure for knownhosts-trust
///
/// Serialized to/from `~/.config/knownhosts-trust/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TrustConfig {
    /// Config file version for migrations
    pub version: u32,

    /// known_hosts file to manage (default: ~/.ssh/known_hosts)
    #[serde(default)]
    pub known_hosts_path: Option<PathBuf>,

    /// SSH client config used to resolve host aliases (default: ~/.ssh/config)
    #[serde(default)]
    pub ssh_config_path: Option<PathBuf>,

    /// Seconds to wait for the known_hosts lock (default: 30)
    #[serde(default = "default_lock_timeout_secs")]
    pub lock_timeout_secs: u64,

    /// Key scanning executable (default: "ssh-keyscan")
    #[serde(default = "default_keyscan_program")]
    pub keyscan_program: String,

    /// Connection timeout passed to ssh-keyscan as `-T` (default: 5)
    #[serde(default = "default_keyscan_timeout_secs")]
    pub keyscan_timeout_secs: u32,

    /// Record hashed hostnames (`ssh-keyscan -H`) instead of plaintext (default: false)
    #[serde(default)]
    pub hash_hosts: bool,
}

fn default_lock_timeout_secs() -> u64 {
    30
}

fn default_keyscan_program() -> String {
    "ssh-keyscan".to_string()
}

fn default_keyscan_timeout_secs() -> u32 {
    5
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            version: 1,
            known_hosts_path: None,
            ssh_config_path: None,
            lock_timeout_secs: default_lock_timeout_secs(),
            keyscan_program: default_keyscan_program(),
            keyscan_timeout_secs: default_keyscan_timeout_secs(),
            hash_hosts: false,
        }
    }
}

impl TrustConfig {
    /// The known_hosts file to manage, falling back to `~/.ssh/known_hosts`
    pub fn resolved_known_hosts_path(&self) -> Option<PathBuf> {
        self.known_hosts_path
            .clone()
            .or_else(paths::get_known_hosts_path)
    }

    /// The SSH config file, falling back to `~/.ssh/config`
    pub fn resolved_ssh_config_path(&self) -> Option<PathBuf> {
        self.ssh_config_path
            .clone()
            .or_else(paths::get_ssh_config_path)
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_secs(self.lock_timeout_secs)
    }
}
