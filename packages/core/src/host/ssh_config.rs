//! SSH config alias resolution
//!
//! Looks up a host in the SSH client configuration (usually `~/.ssh/config`)
//! so keys are recorded under the host that is really dialed.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use ssh2_config::{ParseRule, SshConfig};

use crate::error::TrustError;

/// Settings found in the SSH config for a host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SshConfigMatch {
    /// HostName the alias points to
    pub host_name: Option<String>,
    /// Port from SSH config
    pub port: Option<u16>,
    /// User from SSH config
    pub user: Option<String>,
    /// Whether any match was found
    pub matched: bool,
}

impl SshConfigMatch {
    /// Check if any useful settings were found
    pub fn has_settings(&self) -> bool {
        self.host_name.is_some() || self.port.is_some() || self.user.is_some()
    }

    /// Format found settings for display
    pub fn display_settings(&self) -> String {
        let mut parts = Vec::new();

        if let Some(host_name) = &self.host_name {
            parts.push(format!("HostName={host_name}"));
        }
        if let Some(port) = self.port {
            parts.push(format!("Port={port}"));
        }
        if let Some(user) = &self.user {
            parts.push(format!("User={user}"));
        }

        parts.join(", ")
    }
}

/// Resolves host aliases against an SSH client config file
#[derive(Debug, Clone, Default)]
pub struct SshConfigResolver {
    path: Option<PathBuf>,
}

impl SshConfigResolver {
    /// Resolve against the config file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A resolver that never matches, leaving hosts as written
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Query the SSH config for `alias`
    ///
    /// A missing config file is not an error: it simply yields no match.
    /// SSH config precedence applies (first obtained value wins).
    pub fn resolve(&self, alias: &str) -> Result<SshConfigMatch, TrustError> {
        let config_path = match &self.path {
            Some(path) if path.exists() => path,
            _ => {
                tracing::debug!("No SSH config file found");
                return Ok(SshConfigMatch::default());
            }
        };

        let file = File::open(config_path).map_err(|e| TrustError::SshConfigRead {
            path: config_path.clone(),
            reason: e.to_string(),
        })?;

        let mut reader = BufReader::new(file);

        // Be lenient with SSH config options ssh2-config doesn't know about
        let config = SshConfig::default()
            .parse(&mut reader, ParseRule::ALLOW_UNKNOWN_FIELDS)
            .map_err(|e| TrustError::SshConfigRead {
                path: config_path.clone(),
                reason: e.to_string(),
            })?;

        let params = config.query(alias);

        let mut result = SshConfigMatch {
            host_name: params.host_name,
            port: params.port,
            user: params.user,
            matched: true,
        };

        if !result.has_settings() {
            result.matched = false;
        }

        Ok(result)
    }
}
