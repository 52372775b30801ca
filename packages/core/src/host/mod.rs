//! Host normalization
//!
//! Turns a repository URL into the canonical host that will be dialed:
//! - Repository URL parsing (ssh://, scp-like shorthand, other schemes)
//! - SSH config alias resolution
//! - Host tokens in display and known_hosts form

mod ssh_config;
mod token;
mod url;

pub use ssh_config::{SshConfigMatch, SshConfigResolver};
pub use token::{DEFAULT_SSH_PORT, HostToken};
pub use url::RepositoryUrl;

use crate::error::TrustError;

/// Derives canonical host tokens from repository URLs
#[derive(Debug, Clone, Default)]
pub struct HostNormalizer {
    resolver: SshConfigResolver,
}

impl HostNormalizer {
    pub fn new(resolver: SshConfigResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &SshConfigResolver {
        &self.resolver
    }

    /// Normalize a repository URL to the host that needs trusting
    ///
    /// Returns `Ok(None)` for remotes that are not reached over SSH.
    pub fn normalize(&self, repository: &str) -> Result<Option<HostToken>, TrustError> {
        let url = RepositoryUrl::parse(repository)?;
        if !url.is_ssh() {
            tracing::debug!(
                "Repository {} uses {}, no host key needed",
                repository,
                url.scheme()
            );
            return Ok(None);
        }

        let host = url.host().ok_or_else(|| TrustError::Parse {
            url: repository.to_string(),
            reason: "missing host".to_string(),
        })?;

        Ok(Some(self.resolve_alias(host, url.port())))
    }

    /// Replace an SSH config alias with the configured HostName and Port
    ///
    /// An explicit port on the URL wins over a configured one. An unreadable
    /// SSH config leaves the host as written.
    pub fn resolve_alias(&self, host: &str, port: Option<u16>) -> HostToken {
        let found = match self.resolver.resolve(host) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("{}, using {} as written", e, host);
                return HostToken::new(host, port);
            }
        };

        let real_host = found.host_name.as_deref().unwrap_or(host);
        let real_port = port.or(found.port);
        if found.matched {
            tracing::debug!(
                "Resolved SSH alias {} via config ({})",
                host,
                found.display_settings()
            );
        }
        HostToken::new(real_host, real_port)
    }
}
