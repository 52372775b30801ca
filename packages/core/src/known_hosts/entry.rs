//! known_hosts line parsing and host pattern matching
//!
//! Format: <https://man.openbsd.org/sshd#SSH_KNOWN_HOSTS_FILE_FORMAT>
//!
//! ```text
//! # Comments allowed at start of line
//! cvs.example.net,192.0.2.10 ssh-rsa AAAA1234.....=
//! # A hashed hostname
//! |1|JfKTdBh7rNbXkVAQCRp4OQoPfmI=|USECr3SWf1JUPsms5AqfD5QfxkM= ssh-rsa AAAA1234.....=
//! ```
//!
//! Only lines made of exactly three single-space separated fields are
//! understood. Marker lines (`@revoked`, `@cert-authority`), comments, tab
//! or multi-space separated entries and entries with a trailing comment are
//! all skipped. Wildcard patterns are compared literally.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha1::Sha1;

/// Prefix of a hashed hostname pattern
const HASH_HOSTNAME_PREFIX: &str = "|1|";

/// One parsed known_hosts entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry<'a> {
    /// Comma-separated host patterns, plaintext or hashed
    pub patterns: &'a str,
    pub key_type: &'a str,
    pub key: &'a str,
}

impl HostEntry<'_> {
    /// Check whether any pattern of this entry matches `host`
    ///
    /// `host` must already be in known_hosts form: lowercase, and
    /// `[host]:port` for a non-default port.
    pub fn matches(&self, host: &str) -> bool {
        self.patterns
            .split(',')
            .any(|pattern| pattern_matches(pattern, host))
    }
}

/// Parse one known_hosts line
///
/// Returns `None` for anything that is not exactly three fields separated by
/// single spaces.
pub fn parse_entry(line: &str) -> Option<HostEntry<'_>> {
    let mut fields = line.split(' ');
    let patterns = fields.next()?;
    let key_type = fields.next()?;
    let key = fields.next()?;
    if fields.next().is_some() {
        return None;
    }
    Some(HostEntry {
        patterns,
        key_type,
        key,
    })
}

/// Match a single host pattern, plaintext or hashed
fn pattern_matches(pattern: &str, host: &str) -> bool {
    if pattern == host {
        return true;
    }
    match pattern.strip_prefix(HASH_HOSTNAME_PREFIX) {
        Some(hashed) => hashed_hostname_matches(host, hashed),
        None => false,
    }
}

/// Compare `host` against a `salt|digest` pair using the embedded salt
fn hashed_hostname_matches(host: &str, hashed: &str) -> bool {
    let Some((b64_salt, b64_digest)) = hashed.split_once('|') else {
        return false;
    };
    let Ok(salt) = STANDARD.decode(b64_salt) else {
        return false;
    };
    let Ok(digest) = STANDARD.decode(b64_digest) else {
        return false;
    };
    let Ok(mut mac) = Hmac::<Sha1>::new_from_slice(&salt) else {
        return false;
    };
    mac.update(host.as_bytes());
    mac.verify_slice(&digest).is_ok()
}

/// Hash `host` with `salt` into the `|1|salt|digest` pattern form
pub fn hash_hostname(host: &str, salt: &[u8]) -> String {
    let mut mac = Hmac::<Sha1>::new_from_slice(salt).expect("HMAC accepts any key length");
    mac.update(host.as_bytes());
    let digest = mac.finalize().into_bytes();
    format!(
        "{HASH_HOSTNAME_PREFIX}{}|{}",
        STANDARD.encode(salt),
        STANDARD.encode(digest)
    )
}
