//! Error display for trust failures
//!
//! Turns [`TrustError`]s into a headline plus an actionable tip.

use console::style;
use knownhosts_trust_core::{LockError, ScanError, TrustError};

/// Headline and optional tip for a trust error
pub fn format_trust_error(err: &TrustError) -> (String, Option<String>) {
    let tip = match err {
        TrustError::HomeDirNotFound => {
            Some("Set HOME, or set known_hosts_path in the config file.".to_string())
        }
        TrustError::Setup { path, .. } => Some(format!(
            "Check that {} is writable by the current user.",
            path.display()
        )),
        TrustError::Parse { .. } | TrustError::InvalidHost(_) => {
            Some("Use host, host:port, ssh://host/path or user@host:path.".to_string())
        }
        TrustError::Lock(LockError::Timeout { path, .. }) => Some(format!(
            "Another job may still be writing. If none is running, remove {}.",
            path.display()
        )),
        TrustError::Scan {
            source: ScanError::Spawn { .. },
            ..
        } => Some("Install the OpenSSH client, or set keyscan_program in the config.".into()),
        TrustError::AddHost { source, .. } => format_trust_error(source).1,
        _ => None,
    };
    (err.to_string(), tip)
}

/// Print a trust error to stderr
pub fn show_trust_error(err: &TrustError) {
    let (headline, tip) = format_trust_error(err);
    eprintln!("{} {}", style("Error:").red().bold(), headline);
    if let Some(tip) = tip {
        eprintln!();
        eprintln!("  {} {}", style("Tip:").cyan(), tip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn lock_timeout_tip_names_lock_file() {
        let err = TrustError::Lock(LockError::Timeout {
            path: PathBuf::from("/home/ci/.ssh/known_hosts.lock"),
            timeout: Duration::from_secs(30),
        });
        let (headline, tip) = format_trust_error(&err);
        assert!(headline.contains("known_hosts.lock"));
        assert!(tip.unwrap().contains("remove /home/ci/.ssh/known_hosts.lock"));
    }

    #[test]
    fn wrapped_error_uses_inner_tip() {
        let inner = TrustError::Scan {
            host: "github.com".to_string(),
            source: ScanError::Spawn {
                program: "ssh-keyscan".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            },
        };
        let err = TrustError::AddHost {
            host: "github.com".to_string(),
            path: PathBuf::from("/home/ci/.ssh/known_hosts"),
            source: Box::new(inner),
        };
        let (headline, tip) = format_trust_error(&err);
        assert!(headline.contains("github.com"));
        assert!(tip.unwrap().contains("keyscan_program"));
    }

    #[test]
    fn scan_failure_has_no_tip() {
        let err = TrustError::Scan {
            host: "github.com".to_string(),
            source: ScanError::Empty,
        };
        assert!(format_trust_error(&err).1.is_none());
    }
}
