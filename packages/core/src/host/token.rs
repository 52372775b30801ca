//! Canonical host tokens
//!
//! A [`HostToken`] is the host (and non-default port) that will actually be
//! dialed. It renders both as `host[:port]` for display and in the form
//! OpenSSH uses inside known_hosts files.

use std::fmt;
use std::str::FromStr;

use crate::error::TrustError;

/// Default SSH port, never recorded explicitly
pub const DEFAULT_SSH_PORT: u16 = 22;

/// A normalized `host` or `host:port`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostToken {
    host: String,
    port: Option<u16>,
}

impl HostToken {
    /// Build a token, lowercasing the host and dropping the default port
    pub fn new(host: &str, port: Option<u16>) -> Self {
        let host = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);
        Self {
            host: host.to_lowercase(),
            port: port.filter(|p| *p != DEFAULT_SSH_PORT),
        }
    }

    /// Parse `host`, `host:port`, `[host]:port` or a bare IPv6 literal
    pub fn parse(input: &str) -> Result<Self, TrustError> {
        let invalid = || TrustError::InvalidHost(input.to_string());
        let trimmed = input.trim();

        let (host, port) = if let Some(rest) = trimmed.strip_prefix('[') {
            let (host, after) = rest.split_once(']').ok_or_else(invalid)?;
            let port = match after {
                "" => None,
                _ => {
                    let port = after.strip_prefix(':').ok_or_else(invalid)?;
                    Some(parse_port(port).ok_or_else(invalid)?)
                }
            };
            (host, port)
        } else {
            match trimmed.matches(':').count() {
                0 => (trimmed, None),
                1 => {
                    let (host, port) = trimmed.split_once(':').ok_or_else(invalid)?;
                    (host, Some(parse_port(port).ok_or_else(invalid)?))
                }
                // Bare IPv6 literal
                _ => (trimmed, None),
            }
        };

        if host.is_empty() || host.contains(char::is_whitespace) {
            return Err(invalid());
        }
        Ok(Self::new(host, port))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// The non-default port, if any
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The name OpenSSH records and hashes in known_hosts
    ///
    /// `host` for the default port, `[host]:port` otherwise.
    pub fn known_hosts_name(&self) -> String {
        match self.port {
            Some(port) => format!("[{}]:{port}", self.host),
            None => self.host.clone(),
        }
    }
}

fn parse_port(port: &str) -> Option<u16> {
    port.parse::<u16>().ok().filter(|p| *p != 0)
}

impl fmt::Display for HostToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) if self.host.contains(':') => write!(f, "[{}]:{port}", self.host),
            Some(port) => write!(f, "{}:{port}", self.host),
            None => f.write_str(&self.host),
        }
    }
}

impl FromStr for HostToken {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
