//! Advisory lock files with a bounded wait
//!
//! A lock is a sibling file created with create-exclusive semantics and
//! holding the owner's PID followed by a per-acquisition sequence number.
//! Waiters poll until the deadline passes. If the recorded PID is no longer
//! running the lock is stale and gets reclaimed. Reclaiming happens under an
//! OS-level `flock` on `<lock>.reclaim`, so two waiters can never both
//! remove and replace the same stale file. The lock is advisory: it only
//! protects against writers that take it too.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

/// How often a waiter re-attempts to create the lock file
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Distinguishes locks taken by different threads of this process
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Errors that can occur during lock operations
#[derive(Error, Debug)]
pub enum LockError {
    /// The lock was not acquired before the deadline
    #[error("Timed out after {timeout:?} waiting for lock {}", .path.display())]
    Timeout { path: PathBuf, timeout: Duration },

    /// Failed to create, inspect or remove the lock file
    #[error("Failed to manage lock file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A guard holding an advisory lock file
///
/// The lock file is removed by [`FileLock::release`], or on drop if it was
/// never released explicitly. Either way it is only removed while it still
/// holds this guard's token.
#[derive(Debug)]
pub struct FileLock {
    path: PathBuf,
    token: String,
    released: bool,
}

impl FileLock {
    /// Acquire the lock at `path`, waiting at most `timeout`
    ///
    /// A timeout too large to represent as a deadline waits indefinitely.
    ///
    /// # Returns
    /// - `Ok(FileLock)` once the lock file has been created by us
    /// - `Err(LockError::Timeout)` if another holder kept it past the deadline
    /// - `Err(LockError::Io)` for any other filesystem failure
    pub fn acquire(path: impl Into<PathBuf>, timeout: Duration) -> Result<Self, LockError> {
        let path = path.into();
        let deadline = Instant::now().checked_add(timeout);
        let token = format!(
            "{} {}",
            std::process::id(),
            SEQUENCE.fetch_add(1, Ordering::Relaxed)
        );

        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(token.as_bytes()).map_err(|source| LockError::Io {
                        path: path.clone(),
                        source,
                    })?;
                    tracing::debug!("Acquired lock at: {}", path.display());
                    return Ok(Self {
                        path,
                        token,
                        released: false,
                    });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if reclaim_if_stale(&path)? {
                        continue;
                    }
                }
                Err(source) => return Err(LockError::Io { path, source }),
            }

            let wait = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(LockError::Timeout { path, timeout });
                    }
                    POLL_INTERVAL.min(deadline - now)
                }
                None => POLL_INTERVAL,
            };
            thread::sleep(wait);
        }
    }

    /// Release the lock, reporting failure to remove the lock file
    ///
    /// A lock file that no longer holds our token belongs to someone else
    /// and is left in place.
    pub fn release(mut self) -> Result<(), LockError> {
        self.released = true;
        self.remove_own().map_err(|source| LockError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!("Released lock: {}", self.path.display());
        Ok(())
    }

    /// Get the path to the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn remove_own(&self) -> std::io::Result<()> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents == self.token => fs::remove_file(&self.path),
            Ok(_) => {
                tracing::warn!(
                    "Lock file {} was taken over by another holder, leaving it in place",
                    self.path.display()
                );
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("Lock file {} already removed", self.path.display());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.remove_own() {
            tracing::warn!("Failed to remove lock file on drop: {}", e);
        }
    }
}

/// Remove the lock file if its owner is gone
///
/// Returns `true` if the caller should retry immediately. A lock file that
/// vanished in the meantime also counts. Unreadable or empty content is
/// treated as held, since the owner may not have written its PID yet.
fn reclaim_if_stale(path: &Path) -> Result<bool, LockError> {
    let Some(contents) = read_holder(path) else {
        return Ok(true);
    };
    let Some(pid) = holder_pid(&contents) else {
        return Ok(false);
    };
    if is_process_running(pid) {
        return Ok(false);
    }

    let Some(_guard) = try_reclaim_guard(path)? else {
        // Another waiter is reclaiming, poll again
        return Ok(false);
    };

    // Re-read under the guard: the file may already have been reclaimed and
    // re-taken since the first read
    match read_holder(path) {
        None => return Ok(true),
        Some(current) if current != contents => return Ok(false),
        Some(_) => {}
    }

    tracing::info!("Removing stale lock file (PID {} not running)", pid);
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
        Err(source) => Err(LockError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Lock file contents; `None` only when the file is gone
///
/// Other read failures yield an empty string, which reads as "held".
fn read_holder(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(_) => Some(String::new()),
    }
}

fn holder_pid(contents: &str) -> Option<u32> {
    contents.split_whitespace().next()?.parse().ok()
}

fn reclaim_guard_path(path: &Path) -> PathBuf {
    let mut guard = path.to_path_buf().into_os_string();
    guard.push(".reclaim");
    PathBuf::from(guard)
}

/// Take the exclusive reclaim guard without blocking
///
/// The guard file is never removed. The kernel drops the `flock` when the
/// returned file is closed or its process dies, so a crashed reclaimer
/// cannot wedge it.
#[cfg(unix)]
fn try_reclaim_guard(path: &Path) -> Result<Option<File>, LockError> {
    use std::os::unix::io::AsRawFd;

    let guard_path = reclaim_guard_path(path);
    let io_error = |source| LockError::Io {
        path: guard_path.clone(),
        source,
    };

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&guard_path)
        .map_err(io_error)?;

    // SAFETY: the descriptor is owned by `file` and open for this call
    let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        return Ok(Some(file));
    }

    let err = std::io::Error::last_os_error();
    if err.kind() == ErrorKind::WouldBlock {
        Ok(None)
    } else {
        Err(io_error(err))
    }
}

/// Without `flock` no lock is ever reclaimed
#[cfg(not(unix))]
fn try_reclaim_guard(_path: &Path) -> Result<Option<File>, LockError> {
    Ok(None)
}

/// Check if a process with the given PID is currently running
///
/// - Unix: `kill -0 <pid>` checks existence without sending a signal
/// - Other platforms: assume it is running, so locks are never reclaimed
fn is_process_running(pid: u32) -> bool {
    if pid == std::process::id() {
        return true;
    }

    #[cfg(unix)]
    {
        match std::process::Command::new("kill")
            .args(["-0", &pid.to_string()])
            .stderr(std::process::Stdio::null())
            .output()
        {
            Ok(output) => output.status.success(),
            Err(_) => {
                #[cfg(target_os = "linux")]
                {
                    Path::new(&format!("/proc/{pid}")).exists()
                }
                #[cfg(not(target_os = "linux"))]
                {
                    true
                }
            }
        }
    }

    #[cfg(not(unix))]
    {
        true
    }
}
