//! Trust-store error types
//!
//! Errors that can occur while resolving, checking, or adding SSH host keys.

use std::path::PathBuf;

use thiserror::Error;

use crate::keyscan::ScanError;
use crate::lock::LockError;

/// Errors that can occur during known_hosts operations
#[derive(Error, Debug)]
pub enum TrustError {
    /// Home directory could not be determined
    #[error("Could not find the current user's home directory")]
    HomeDirNotFound,

    /// Failed to create the known_hosts directory or file
    #[error("Could not create {}: {source}", .path.display())]
    Setup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Repository URL could not be interpreted
    #[error("Could not parse {url:?} as a repository URL: {reason}")]
    Parse { url: String, reason: String },

    /// Host string could not be interpreted
    #[error("Invalid host {0:?}")]
    InvalidHost(String),

    /// Failed to read or parse the SSH client configuration
    #[error("Failed to read SSH config {}: {reason}", .path.display())]
    SshConfigRead { path: PathBuf, reason: String },

    /// Lock on the known_hosts file could not be taken
    #[error(transparent)]
    Lock(#[from] LockError),

    /// ssh-keyscan failed for a host
    #[error("Could not perform `ssh-keyscan` for {host}: {source}")]
    Scan {
        host: String,
        #[source]
        source: ScanError,
    },

    /// Failed to read the known_hosts file
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to append to the known_hosts file
    #[error("Could not write to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Adding a host resolved from a repository failed
    #[error("Failed to add `{host}` to known_hosts file `{}`: {source}", .path.display())]
    AddHost {
        host: String,
        path: PathBuf,
        #[source]
        source: Box<TrustError>,
    },
}

impl TrustError {
    /// Whether the caller may carry on without host-key trust
    ///
    /// Only URL parse failures qualify: the repository is simply skipped.
    pub fn is_skippable(&self) -> bool {
        matches!(self, TrustError::Parse { .. })
    }
}
