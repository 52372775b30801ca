//! ssh-keyscan bridge
//!
//! Fetches a host's public keys in known_hosts line format.

use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

/// Errors that can occur while scanning a host's keys
#[derive(Error, Debug)]
pub enum ScanError {
    /// Failed to spawn the scanner process
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Scanner exited unsuccessfully
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// Scanner succeeded but returned no keys
    #[error("no host keys were returned")]
    Empty,

    /// Any other scanner failure
    #[error("{0}")]
    Other(String),
}

/// Something that can fetch the current host keys for a host
///
/// Returns the raw known_hosts line(s), ready to append. A `port` of `None`
/// means the default SSH port.
pub trait KeyScanner: Send + Sync {
    fn scan(&self, host: &str, port: Option<u16>) -> Result<String, ScanError>;
}

impl<F> KeyScanner for F
where
    F: Fn(&str, Option<u16>) -> Result<String, ScanError> + Send + Sync,
{
    fn scan(&self, host: &str, port: Option<u16>) -> Result<String, ScanError> {
        self(host, port)
    }
}

/// Scans keys by running `ssh-keyscan`
#[derive(Debug, Clone)]
pub struct SshKeyscan {
    program: String,
    timeout_secs: Option<u32>,
    hash_hosts: bool,
}

impl Default for SshKeyscan {
    fn default() -> Self {
        Self::new("ssh-keyscan")
    }
}

impl SshKeyscan {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout_secs: None,
            hash_hosts: false,
        }
    }

    /// Connection timeout passed as `-T`
    pub fn with_timeout_secs(mut self, secs: u32) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Ask ssh-keyscan to hash hostnames in its output (`-H`)
    pub fn with_hashed_hosts(mut self, hash_hosts: bool) -> Self {
        self.hash_hosts = hash_hosts;
        self
    }

    /// Build the argument list for a scan
    ///
    /// ssh-keyscan does not accept `host:port`, so a non-default port
    /// always travels as `-p`.
    fn args(&self, host: &str, port: Option<u16>) -> Vec<String> {
        let mut args = Vec::new();
        if self.hash_hosts {
            args.push("-H".to_string());
        }
        if let Some(secs) = self.timeout_secs {
            args.push("-T".to_string());
            args.push(secs.to_string());
        }
        if let Some(port) = port.filter(|p| *p != 22) {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        args.push(host.to_string());
        args
    }
}

impl KeyScanner for SshKeyscan {
    fn scan(&self, host: &str, port: Option<u16>) -> Result<String, ScanError> {
        let args = self.args(host, port);
        tracing::debug!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ScanError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ScanError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let lines = stdout.trim();
        if lines.is_empty() {
            return Err(ScanError::Empty);
        }
        Ok(lines.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_port() {
        let scanner = SshKeyscan::default();
        assert_eq!(scanner.args("github.com", None), vec!["github.com"]);
        assert_eq!(scanner.args("github.com", Some(22)), vec!["github.com"]);
    }

    #[test]
    fn test_args_custom_port_uses_flag() {
        let scanner = SshKeyscan::default();
        assert_eq!(
            scanner.args("git.example.com", Some(7999)),
            vec!["-p", "7999", "git.example.com"]
        );
    }

    #[test]
    fn test_args_with_options() {
        let scanner = SshKeyscan::new("ssh-keyscan")
            .with_timeout_secs(5)
            .with_hashed_hosts(true);
        assert_eq!(
            scanner.args("git.example.com", Some(2222)),
            vec!["-H", "-T", "5", "-p", "2222", "git.example.com"]
        );
    }

    #[test]
    fn test_closure_is_a_scanner() {
        let scanner = |host: &str, port: Option<u16>| -> Result<String, ScanError> {
            Ok(format!("{host}:{} ssh-ed25519 AAAA", port.unwrap_or(22)))
        };
        assert_eq!(
            scanner.scan("h", Some(2222)).unwrap(),
            "h:2222 ssh-ed25519 AAAA"
        );
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let scanner = SshKeyscan::new("definitely-not-a-real-keyscan-binary");
        let result = scanner.scan("localhost", None);
        assert!(matches!(result, Err(ScanError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let scanner = SshKeyscan::new("false");
        let result = scanner.scan("localhost", None);
        assert!(matches!(result, Err(ScanError::Failed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_empty_output_is_error() {
        let scanner = SshKeyscan::new("true");
        let result = scanner.scan("localhost", None);
        assert!(matches!(result, Err(ScanError::Empty)));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_captured() {
        // `echo` prints its arguments, standing in for a scanner
        let scanner = SshKeyscan::new("echo");
        let output = scanner.scan("git.example.com", Some(2222)).unwrap();
        assert_eq!(output, "-p 2222 git.example.com");
    }
}
