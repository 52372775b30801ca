//! Trust store backed by an OpenSSH known_hosts file
//!
//! [`KnownHosts`] owns a known_hosts path and answers two questions: is a
//! host already trusted, and if not, scan its keys and record them. The file
//! is the only source of truth; every lookup re-reads it.
//!
//! Appends are serialized across processes with a sibling `<path>.lock`
//! file. Lookups take no lock.

mod entry;

pub use entry::{HostEntry, hash_hostname, parse_entry};

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::TrustConfig;
use crate::error::TrustError;
use crate::host::{HostNormalizer, HostToken, SshConfigResolver};
use crate::keyscan::{KeyScanner, ScanError, SshKeyscan};
use crate::lock::FileLock;

/// Default time to wait for the known_hosts lock
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(30);

/// What an add operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Keys were scanned and appended
    Added,
    /// The host was already trusted, nothing was written
    AlreadyKnown,
    /// The repository is not reached over SSH, nothing to trust
    NotSsh,
}

/// A known_hosts file plus the collaborators needed to extend it
pub struct KnownHosts {
    path: PathBuf,
    scanner: Box<dyn KeyScanner>,
    normalizer: HostNormalizer,
    lock_timeout: Duration,
}

impl std::fmt::Debug for KnownHosts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnownHosts")
            .field("path", &self.path)
            .field("normalizer", &self.normalizer)
            .field("lock_timeout", &self.lock_timeout)
            .finish_non_exhaustive()
    }
}

impl KnownHosts {
    /// Open the trust store at `path`, creating it if needed
    ///
    /// The parent directory is created owner-only (0700) and the file
    /// owner read/write (0600). SSH aliases are not resolved until a
    /// resolver is attached with [`KnownHosts::with_ssh_config`].
    pub fn open(
        path: impl Into<PathBuf>,
        scanner: impl KeyScanner + 'static,
    ) -> Result<Self, TrustError> {
        let path = path.into();
        ensure_known_hosts_file(&path)?;
        Ok(Self {
            path,
            scanner: Box::new(scanner),
            normalizer: HostNormalizer::default(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        })
    }

    /// Open the trust store described by a [`TrustConfig`]
    ///
    /// Uses `ssh-keyscan` (or the configured program) for scanning and the
    /// configured or default SSH config for alias resolution.
    pub fn from_config(config: &TrustConfig) -> Result<Self, TrustError> {
        let path = config
            .resolved_known_hosts_path()
            .ok_or(TrustError::HomeDirNotFound)?;

        let scanner = SshKeyscan::new(&config.keyscan_program)
            .with_timeout_secs(config.keyscan_timeout_secs)
            .with_hashed_hosts(config.hash_hosts);

        let resolver = match config.resolved_ssh_config_path() {
            Some(ssh_config) => SshConfigResolver::new(ssh_config),
            None => SshConfigResolver::disabled(),
        };

        Ok(Self::open(path, scanner)?
            .with_ssh_config(resolver)
            .with_lock_timeout(config.lock_timeout()))
    }

    /// Resolve repository hosts through an SSH client config
    pub fn with_ssh_config(mut self, resolver: SshConfigResolver) -> Self {
        self.normalizer = HostNormalizer::new(resolver);
        self
    }

    /// Change how long [`KnownHosts::add`] waits for the lock
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The sibling lock file guarding appends
    pub fn lock_path(&self) -> PathBuf {
        let mut lock = self.path.clone().into_os_string();
        lock.push(".lock");
        PathBuf::from(lock)
    }

    pub fn normalizer(&self) -> &HostNormalizer {
        &self.normalizer
    }

    /// Check whether `host` (`host` or `host:port`) is already trusted
    pub fn contains(&self, host: &str) -> Result<bool, TrustError> {
        self.contains_token(&HostToken::parse(host)?)
    }

    /// Check whether a normalized host is already trusted
    ///
    /// Matches plaintext patterns and salted-hash patterns alike.
    pub fn contains_token(&self, token: &HostToken) -> Result<bool, TrustError> {
        let read_error = |source| TrustError::Read {
            path: self.path.clone(),
            source,
        };

        let file = File::open(&self.path).map_err(read_error)?;
        let name = token.known_hosts_name();

        // Split on raw bytes: a line that is not UTF-8 is skipped like any
        // other malformed line, only I/O failures are errors
        for line in BufReader::new(file).split(b'\n') {
            let line = line.map_err(read_error)?;
            let line = line.strip_suffix(b"\r").unwrap_or(&line[..]);
            let Ok(line) = std::str::from_utf8(line) else {
                continue;
            };
            if parse_entry(line).is_some_and(|entry| entry.matches(&name)) {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Scan and record the keys for `host` unless it is already trusted
    pub fn add(&self, host: &str) -> Result<AddOutcome, TrustError> {
        self.add_token(&HostToken::parse(host)?)
    }

    /// Scan and record the keys for a normalized host
    ///
    /// Holds the lock from the membership re-check until the append is
    /// done, so concurrent callers record a host only once.
    pub fn add_token(&self, token: &HostToken) -> Result<AddOutcome, TrustError> {
        let lock = FileLock::acquire(self.lock_path(), self.lock_timeout)?;

        let result = self.add_locked(token);

        if let Err(e) = lock.release() {
            tracing::warn!("Failed to release known_hosts file lock: {}", e);
        }

        result
    }

    fn add_locked(&self, token: &HostToken) -> Result<AddOutcome, TrustError> {
        if self.contains_token(token)? {
            tracing::info!(
                "Host {:?} already in list of known hosts at {}",
                token.to_string(),
                self.path.display()
            );
            return Ok(AddOutcome::AlreadyKnown);
        }

        let scan_error = |source| TrustError::Scan {
            host: token.to_string(),
            source,
        };
        let keys = self
            .scanner
            .scan(token.host(), token.port())
            .map_err(scan_error)?;
        let keys = keys.trim_end();
        if keys.trim_start().is_empty() {
            return Err(scan_error(ScanError::Empty));
        }

        self.append(keys)?;

        tracing::info!(
            "Added host {:?} to known hosts at {}",
            token.to_string(),
            self.path.display()
        );
        Ok(AddOutcome::Added)
    }

    /// Append `lines` in one write, starting on a fresh line
    fn append(&self, lines: &str) -> Result<(), TrustError> {
        let write_error = |source| TrustError::Write {
            path: self.path.clone(),
            source,
        };

        let mut chunk = String::with_capacity(lines.len() + 2);
        if !ends_with_newline(&self.path).map_err(write_error)? {
            chunk.push('\n');
        }
        chunk.push_str(lines);
        chunk.push('\n');

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(write_error)?;

        file.write_all(chunk.as_bytes()).map_err(write_error)?;
        file.flush().map_err(write_error)
    }

    /// Trust the host behind a repository URL
    ///
    /// Non-SSH remotes are skipped. A URL that cannot be parsed is logged
    /// and returned as a skippable [`TrustError::Parse`]; any other failure
    /// is wrapped with the host and path.
    pub fn add_from_repository(&self, repository: &str) -> Result<AddOutcome, TrustError> {
        let token = match self.normalizer.normalize(repository) {
            Ok(Some(token)) => token,
            Ok(None) => return Ok(AddOutcome::NotSsh),
            Err(e) => {
                tracing::warn!(
                    "Could not parse {:?} as a URL - skipping adding host to SSH known_hosts",
                    repository
                );
                return Err(e);
            }
        };

        let wrap = |source: TrustError| TrustError::AddHost {
            host: token.to_string(),
            path: self.path.clone(),
            source: Box::new(source),
        };

        if self.contains_token(&token).map_err(wrap)? {
            tracing::debug!("Host {} already trusted, skipping scan", token);
            return Ok(AddOutcome::AlreadyKnown);
        }

        self.add_token(&token).map_err(wrap)
    }
}

/// Create the known_hosts file and its directory if missing
fn ensure_known_hosts_file(path: &Path) -> Result<(), TrustError> {
    let setup_error = |path: &Path, source| TrustError::Setup {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| setup_error(dir, e))?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
                    .map_err(|e| setup_error(dir, e))?;
            }
            tracing::debug!("Created directory {}", dir.display());
        }
    }

    if !path.exists() {
        // No truncate: another process may have created it meanwhile
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| setup_error(path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))
                .map_err(|e| setup_error(path, e))?;
        }
        tracing::debug!("Created empty known_hosts file {}", path.display());
    }

    let metadata = fs::metadata(path).map_err(|e| setup_error(path, e))?;
    if !metadata.is_file() {
        return Err(setup_error(
            path,
            std::io::Error::other("not a regular file"),
        ));
    }

    Ok(())
}

/// Whether the file is empty or already ends in a newline
fn ends_with_newline(path: &Path) -> std::io::Result<bool> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(true),
        Err(e) => return Err(e),
    };
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::LockError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;
    use tempfile::TempDir;

    const KEY: &str = "AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl";

    /// Scanner double returning one ed25519 line per host and counting calls
    fn counting_scanner(
        calls: Arc<AtomicUsize>,
    ) -> impl Fn(&str, Option<u16>) -> Result<String, ScanError> + Send + Sync {
        move |host: &str, port: Option<u16>| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!(
                "{} ssh-ed25519 {KEY}",
                HostToken::new(host, port).known_hosts_name()
            ))
        }
    }

    fn store(dir: &TempDir) -> (KnownHosts, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let path = dir.path().join(".ssh").join("known_hosts");
        let kh = KnownHosts::open(path, counting_scanner(calls.clone())).unwrap();
        (kh, calls)
    }

    fn lines(kh: &KnownHosts) -> Vec<String> {
        fs::read_to_string(kh.path())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_open_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let (kh, _) = store(&dir);

        assert!(kh.path().is_file());
        assert_eq!(fs::read_to_string(kh.path()).unwrap(), "");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let ssh_dir = dir.path().join(".ssh");
            let dir_mode = fs::metadata(&ssh_dir).unwrap().permissions().mode();
            assert_eq!(dir_mode & 0o777, 0o700);
            let file_mode = fs::metadata(kh.path()).unwrap().permissions().mode();
            assert_eq!(file_mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_open_keeps_existing_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("known_hosts");
        fs::write(&path, format!("github.com ssh-ed25519 {KEY}\n")).unwrap();

        let kh = KnownHosts::open(&path, SshKeyscan::default()).unwrap();
        assert!(kh.contains("github.com").unwrap());
    }

    #[test]
    fn test_open_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let result = KnownHosts::open(dir.path(), SshKeyscan::default());
        assert!(matches!(result, Err(TrustError::Setup { .. })));
    }

    #[test]
    fn test_lock_path_is_sibling() {
        let dir = TempDir::new().unwrap();
        let (kh, _) = store(&dir);
        assert_eq!(
            kh.lock_path(),
            dir.path().join(".ssh").join("known_hosts.lock")
        );
    }

    #[test]
    fn test_add_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let (kh, calls) = store(&dir);

        assert_eq!(kh.add("github.com").unwrap(), AddOutcome::Added);
        assert_eq!(kh.add("github.com").unwrap(), AddOutcome::AlreadyKnown);

        assert_eq!(lines(&kh), vec![format!("github.com ssh-ed25519 {KEY}")]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!kh.lock_path().exists());
    }

    #[test]
    fn test_add_custom_port_records_bracketed_name() {
        let dir = TempDir::new().unwrap();
        let (kh, _) = store(&dir);

        kh.add("git.example.com:7999").unwrap();
        assert_eq!(
            lines(&kh),
            vec![format!("[git.example.com]:7999 ssh-ed25519 {KEY}")]
        );
        assert!(kh.contains("git.example.com:7999").unwrap());
        assert!(!kh.contains("git.example.com").unwrap());
    }

    #[test]
    fn test_contains_hashed_and_plaintext() {
        let dir = TempDir::new().unwrap();
        let (kh, _) = store(&dir);

        let hashed = hash_hostname("hashed.example.com", b"abcdefghijklmnopqrst");
        fs::write(
            kh.path(),
            format!("{hashed} ssh-ed25519 {KEY}\nplain.example.com ssh-ed25519 {KEY}\n"),
        )
        .unwrap();

        assert!(kh.contains("hashed.example.com").unwrap());
        assert!(kh.contains("plain.example.com").unwrap());
        assert!(kh.contains("PLAIN.example.com").unwrap());
        assert!(!kh.contains("other.example.com").unwrap());
    }

    #[test]
    fn test_contains_multi_pattern_entry() {
        let dir = TempDir::new().unwrap();
        let (kh, _) = store(&dir);
        fs::write(
            kh.path(),
            format!("gitlab.com,172.65.251.78 ssh-ed25519 {KEY}\n"),
        )
        .unwrap();

        assert!(kh.contains("gitlab.com").unwrap());
        assert!(kh.contains("172.65.251.78").unwrap());
    }

    #[test]
    fn test_contains_skips_malformed_lines() {
        let dir = TempDir::new().unwrap();
        let (kh, _) = store(&dir);
        fs::write(
            kh.path(),
            format!(
                "# managed by CI\n\
                 @revoked * ssh-rsa {KEY}\n\
                 garbage\n\
                 bitbucket.org ssh-ed25519 {KEY}\n"
            ),
        )
        .unwrap();

        assert!(kh.contains("bitbucket.org").unwrap());
    }

    #[test]
    fn test_contains_skips_non_utf8_lines() {
        let dir = TempDir::new().unwrap();
        let (kh, calls) = store(&dir);
        let mut contents = b"# caf\xe9 mirror\n".to_vec();
        contents.extend_from_slice(format!("github.com ssh-ed25519 {KEY}\r\n").as_bytes());
        fs::write(kh.path(), &contents).unwrap();

        assert!(kh.contains("github.com").unwrap());
        assert!(!kh.contains("gitlab.com").unwrap());

        // The locked re-check reads the same file
        assert_eq!(kh.add("gitlab.com").unwrap(), AddOutcome::Added);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let written = fs::read(kh.path()).unwrap();
        assert!(written.starts_with(&contents));
        assert!(written.ends_with(format!("gitlab.com ssh-ed25519 {KEY}\n").as_bytes()));
    }

    #[test]
    fn test_contains_ignores_irregular_whitespace() {
        let dir = TempDir::new().unwrap();
        let (kh, _) = store(&dir);
        fs::write(kh.path(), format!("github.com\tssh-ed25519\t{KEY}\n")).unwrap();

        assert!(!kh.contains("github.com").unwrap());
    }

    #[test]
    fn test_contains_reads_fresh_contents() {
        let dir = TempDir::new().unwrap();
        let (kh, _) = store(&dir);
        assert!(!kh.contains("github.com").unwrap());

        fs::write(kh.path(), format!("github.com ssh-ed25519 {KEY}\n")).unwrap();
        assert!(kh.contains("github.com").unwrap());
    }

    #[test]
    fn test_contains_propagates_read_errors() {
        let dir = TempDir::new().unwrap();
        let (kh, _) = store(&dir);
        fs::remove_file(kh.path()).unwrap();

        assert!(matches!(
            kh.contains("github.com"),
            Err(TrustError::Read { .. })
        ));
    }

    #[test]
    fn test_append_starts_on_fresh_line() {
        let dir = TempDir::new().unwrap();
        let (kh, _) = store(&dir);
        fs::write(kh.path(), format!("github.com ssh-ed25519 {KEY}")).unwrap();

        kh.add("gitlab.com").unwrap();
        assert_eq!(
            lines(&kh),
            vec![
                format!("github.com ssh-ed25519 {KEY}"),
                format!("gitlab.com ssh-ed25519 {KEY}"),
            ]
        );
    }

    #[test]
    fn test_multiple_scanned_lines_are_appended() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("known_hosts");
        let scanner = |host: &str, _port: Option<u16>| -> Result<String, ScanError> {
            Ok(format!(
                "{host} ssh-ed25519 {KEY}\n{host} ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQ==\n"
            ))
        };
        let kh = KnownHosts::open(&path, scanner).unwrap();

        kh.add("github.com").unwrap();
        assert_eq!(lines(&kh).len(), 2);
    }

    #[test]
    fn test_scan_failure_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("known_hosts");
        let scanner = |_: &str, _: Option<u16>| -> Result<String, ScanError> {
            Err(ScanError::Other("connection refused".to_string()))
        };
        let kh = KnownHosts::open(&path, scanner).unwrap();

        let err = kh.add("unreachable.example.com").unwrap_err();
        assert!(matches!(err, TrustError::Scan { .. }));
        assert!(err.to_string().contains("unreachable.example.com"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        assert!(!kh.lock_path().exists());
    }

    #[test]
    fn test_blank_scan_output_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("known_hosts");
        let scanner = |_: &str, _: Option<u16>| -> Result<String, ScanError> { Ok("\n".into()) };
        let kh = KnownHosts::open(&path, scanner).unwrap();

        assert!(matches!(
            kh.add("github.com"),
            Err(TrustError::Scan {
                source: ScanError::Empty,
                ..
            })
        ));
    }

    #[test]
    fn test_lock_timeout_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let (kh, calls) = store(&dir);
        let kh = kh.with_lock_timeout(Duration::from_millis(200));

        // A live holder that never releases
        fs::write(kh.lock_path(), std::process::id().to_string()).unwrap();

        let err = kh.add("github.com").unwrap_err();
        assert!(matches!(err, TrustError::Lock(LockError::Timeout { .. })));
        assert_eq!(fs::read_to_string(kh.path()).unwrap(), "");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(kh.lock_path().exists());
    }

    #[test]
    fn test_add_with_unbounded_lock_timeout() {
        let dir = TempDir::new().unwrap();
        let (kh, _) = store(&dir);
        let kh = kh.with_lock_timeout(Duration::from_secs(u64::MAX));

        assert_eq!(kh.add("github.com").unwrap(), AddOutcome::Added);
        assert!(!kh.lock_path().exists());
    }

    #[test]
    fn test_concurrent_adds_write_one_entry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("known_hosts");
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let path = path.clone();
                let calls = calls.clone();
                thread::spawn(move || -> Result<AddOutcome, TrustError> {
                    let scanner = move |host: &str, _: Option<u16>| -> Result<String, ScanError> {
                        calls.fetch_add(1, Ordering::SeqCst);
                        // Widen the window between check and append
                        thread::sleep(Duration::from_millis(100));
                        Ok(format!("{host} ssh-ed25519 {KEY}"))
                    };
                    let kh = KnownHosts::open(&path, scanner)?;
                    kh.add("github.com")
                })
            })
            .collect();

        let outcomes: Vec<AddOutcome> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();

        assert!(outcomes.contains(&AddOutcome::Added));
        assert!(outcomes.contains(&AddOutcome::AlreadyKnown));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("github.com ssh-ed25519 {KEY}\n")
        );
    }

    #[test]
    fn test_add_from_repository_strips_alias() {
        let dir = TempDir::new().unwrap();
        let ssh_config = dir.path().join("ssh_config");
        fs::write(&ssh_config, "Host alias-name\n    HostName git.example.com\n").unwrap();

        let scanned = Arc::new(Mutex::new(Vec::new()));
        let seen = scanned.clone();
        let scanner = move |host: &str, port: Option<u16>| -> Result<String, ScanError> {
            seen.lock().unwrap().push(host.to_string());
            Ok(format!(
                "{} ssh-ed25519 {KEY}",
                HostToken::new(host, port).known_hosts_name()
            ))
        };
        let kh = KnownHosts::open(dir.path().join("known_hosts"), scanner)
            .unwrap()
            .with_ssh_config(SshConfigResolver::new(ssh_config));

        let outcome = kh.add_from_repository("ssh://alias-name/org/repo.git").unwrap();
        assert_eq!(outcome, AddOutcome::Added);
        assert_eq!(*scanned.lock().unwrap(), vec!["git.example.com"]);
        assert!(kh.contains("git.example.com").unwrap());
        assert!(!kh.contains("alias-name").unwrap());

        assert_eq!(
            kh.add_from_repository("git@alias-name:org/other.git").unwrap(),
            AddOutcome::AlreadyKnown
        );
    }

    #[test]
    fn test_add_from_repository_skips_non_ssh() {
        let dir = TempDir::new().unwrap();
        let (kh, calls) = store(&dir);

        let outcome = kh
            .add_from_repository("https://example.com/org/repo.git")
            .unwrap();
        assert_eq!(outcome, AddOutcome::NotSsh);
        assert_eq!(fs::read_to_string(kh.path()).unwrap(), "");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_add_from_repository_parse_error_is_skippable() {
        let dir = TempDir::new().unwrap();
        let (kh, calls) = store(&dir);

        let err = kh
            .add_from_repository("ssh://git@host:notaport/repo.git")
            .unwrap_err();
        assert!(err.is_skippable());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_add_from_repository_wraps_failures() {
        let dir = TempDir::new().unwrap();
        let scanner = |_: &str, _: Option<u16>| -> Result<String, ScanError> {
            Err(ScanError::Empty)
        };
        let kh = KnownHosts::open(dir.path().join("known_hosts"), scanner).unwrap();

        let err = kh
            .add_from_repository("git@git.example.com:org/repo.git")
            .unwrap_err();
        assert!(!err.is_skippable());
        match err {
            TrustError::AddHost { host, path, source } => {
                assert_eq!(host, "git.example.com");
                assert_eq!(path, kh.path());
                assert!(matches!(*source, TrustError::Scan { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_config_uses_configured_paths() {
        let dir = TempDir::new().unwrap();
        let config = TrustConfig {
            known_hosts_path: Some(dir.path().join("ci").join("known_hosts")),
            ssh_config_path: Some(dir.path().join("ssh_config")),
            lock_timeout_secs: 3,
            ..Default::default()
        };

        let kh = KnownHosts::from_config(&config).unwrap();
        assert_eq!(kh.path(), dir.path().join("ci").join("known_hosts"));
        assert!(kh.path().is_file());
        assert_eq!(
            kh.normalizer().resolver().path(),
            Some(dir.path().join("ssh_config").as_path())
        );
    }
}
