//! knownhosts-trust-core - Core library for knownhosts-trust
//!
//! Lets an unattended job runner trust the SSH host keys of git remotes
//! without interactive prompts:
//! - [`host`]: repository URL to canonical host, resolving SSH config aliases
//! - [`known_hosts`]: lookup (plaintext and hashed) and locked append
//! - [`keyscan`]: `ssh-keyscan` bridge
//! - [`lock`]: advisory cross-process lock files
//! - [`config`]: JSONC configuration

pub mod config;
pub mod error;
pub mod host;
pub mod keyscan;
pub mod known_hosts;
pub mod lock;
pub mod version;

pub use config::{TrustConfig, load_config, load_config_from, save_config, save_config_to};
pub use error::TrustError;
pub use host::{HostNormalizer, HostToken, RepositoryUrl, SshConfigMatch, SshConfigResolver};
pub use keyscan::{KeyScanner, ScanError, SshKeyscan};
pub use known_hosts::{AddOutcome, KnownHosts};
pub use lock::{FileLock, LockError};
pub use version::{get_version, get_version_long};
