//! Repository URL parsing
//!
//! Accepts the forms git understands for remotes:
//! - `ssh://[user@]host[:port]/path` (also `git+ssh://` and `ssh+git://`)
//! - scp-like shorthand `[user@]host:path`, rewritten to `ssh://[user@]host/path`
//! - any other `scheme://...` URL
//! - local paths, treated as `file` URLs

use url::Url;

use crate::error::TrustError;

/// Schemes that reach the remote over SSH
const SSH_SCHEMES: &[&str] = &["ssh", "git+ssh", "ssh+git"];

/// A parsed repository location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryUrl {
    scheme: String,
    host: Option<String>,
    port: Option<u16>,
}

impl RepositoryUrl {
    /// Parse a repository URL in any of the supported forms
    pub fn parse(repository: &str) -> Result<Self, TrustError> {
        let parse_error = |reason: String| TrustError::Parse {
            url: repository.to_string(),
            reason,
        };

        let trimmed = repository.trim();
        if trimmed.is_empty() {
            return Err(parse_error("empty URL".to_string()));
        }

        if !has_scheme(trimmed) {
            return match scp_like_to_ssh(trimmed) {
                Some(rewritten) => Self::from_url(&rewritten).map_err(parse_error),
                None => Ok(Self {
                    scheme: "file".to_string(),
                    host: None,
                    port: None,
                }),
            };
        }

        Self::from_url(trimmed).map_err(parse_error)
    }

    fn from_url(input: &str) -> Result<Self, String> {
        let url = Url::parse(input).map_err(|e| e.to_string())?;
        let scheme = url.scheme().to_string();
        let host = url.host_str().filter(|h| !h.is_empty()).map(str::to_string);

        if SSH_SCHEMES.contains(&scheme.as_str()) && host.is_none() {
            return Err("missing host".to_string());
        }

        Ok(Self {
            scheme,
            host,
            port: url.port(),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host as written in the URL, possibly an SSH config alias
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Explicit port, if the URL carries one
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Whether the remote is reached over SSH and so needs host-key trust
    pub fn is_ssh(&self) -> bool {
        SSH_SCHEMES.contains(&self.scheme.as_str())
    }
}

/// Whether `input` starts with `scheme://`
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Rewrite `[user@]host:path` to `ssh://[user@]host/path`
///
/// A colon only counts when it comes before any slash, and the host must be
/// at least two characters so Windows drive letters stay local paths.
fn scp_like_to_ssh(input: &str) -> Option<String> {
    let (authority, path) = input.split_once(':')?;
    if authority.contains('/') {
        return None;
    }
    let host = match authority.rsplit_once('@') {
        Some((_, host)) => host,
        None => authority,
    };
    if host.chars().count() < 2 || path.is_empty() {
        return None;
    }
    Some(format!(
        "ssh://{authority}/{}",
        path.strip_prefix('/').unwrap_or(path)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssh_url() {
        let url = RepositoryUrl::parse("ssh://git@github.com/org/repo.git").unwrap();
        assert!(url.is_ssh());
        assert_eq!(url.host(), Some("github.com"));
        assert_eq!(url.port(), None);
    }

    #[test]
    fn test_ssh_url_with_port() {
        let url = RepositoryUrl::parse("ssh://git@git.example.com:7999/org/repo.git").unwrap();
        assert!(url.is_ssh());
        assert_eq!(url.host(), Some("git.example.com"));
        assert_eq!(url.port(), Some(7999));
    }

    #[test]
    fn test_scp_like_url() {
        let url = RepositoryUrl::parse("git@github.com:org/repo.git").unwrap();
        assert_eq!(url.scheme(), "ssh");
        assert_eq!(url.host(), Some("github.com"));
        assert_eq!(url.port(), None);

        let url = RepositoryUrl::parse("bitbucket.org:/org/repo.git").unwrap();
        assert!(url.is_ssh());
        assert_eq!(url.host(), Some("bitbucket.org"));
    }

    #[test]
    fn test_git_ssh_schemes() {
        assert!(RepositoryUrl::parse("git+ssh://git@host.example/repo").unwrap().is_ssh());
        assert!(RepositoryUrl::parse("ssh+git://git@host.example/repo").unwrap().is_ssh());
    }

    #[test]
    fn test_non_ssh_urls() {
        let url = RepositoryUrl::parse("https://example.com/org/repo.git").unwrap();
        assert!(!url.is_ssh());
        assert_eq!(url.scheme(), "https");

        let url = RepositoryUrl::parse("git://example.com/org/repo.git").unwrap();
        assert!(!url.is_ssh());
    }

    #[test]
    fn test_local_paths() {
        for path in ["/var/lib/repos/app.git", "./app", "C:\\repos\\app", "c:/repos/app"] {
            let url = RepositoryUrl::parse(path).unwrap();
            assert_eq!(url.scheme(), "file", "{path}");
            assert!(!url.is_ssh());
        }
    }

    #[test]
    fn test_malformed_urls() {
        assert!(matches!(
            RepositoryUrl::parse(""),
            Err(TrustError::Parse { .. })
        ));
        assert!(matches!(
            RepositoryUrl::parse("ssh://git@host:notaport/repo"),
            Err(TrustError::Parse { .. })
        ));
        assert!(matches!(
            RepositoryUrl::parse("ssh:///repo"),
            Err(TrustError::Parse { .. })
        ));
    }
}
