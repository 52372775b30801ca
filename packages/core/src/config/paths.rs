//! Path resolution for knownhosts-trust
//!
//! - Tool config: `~/.config/knownhosts-trust/` (Linux/macOS), `%APPDATA%\knownhosts-trust\` (Windows)
//! - SSH files: `~/.ssh/known_hosts` and `~/.ssh/config` on every platform

use std::path::PathBuf;

/// Get the configuration directory path
///
/// - Linux: `~/.config/knownhosts-trust/`
/// - macOS: `~/.config/knownhosts-trust/` (XDG-style, not ~/Library)
/// - Windows: `%APPDATA%\knownhosts-trust\`
pub fn get_config_dir() -> Option<PathBuf> {
    #[cfg(any(target_os = "linux", target_os = "macos"))]
    {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".config").join("knownhosts-trust"))
    }
    #[cfg(target_os = "windows")]
    {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().to_path_buf())
            .map(|d| d.join("knownhosts-trust"))
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".config").join("knownhosts-trust"))
    }
}

/// Get the full path to the config file
///
/// Returns: `{config_dir}/config.json`
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|d| d.join("config.json"))
}

/// Get the user's SSH directory (`~/.ssh`)
pub fn get_ssh_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".ssh"))
}

/// Get the default known_hosts path
///
/// Returns: `~/.ssh/known_hosts`
pub fn get_known_hosts_path() -> Option<PathBuf> {
    get_ssh_dir().map(|d| d.join("known_hosts"))
}

/// Get the default SSH client config path
///
/// Returns: `~/.ssh/config`
pub fn get_ssh_config_path() -> Option<PathBuf> {
    get_ssh_dir().map(|d| d.join("config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_exists() {
        let dir = get_config_dir();
        assert!(dir.is_some());
        assert!(dir.unwrap().ends_with("knownhosts-trust"));
    }

    #[test]
    fn test_config_path_ends_with_config_json() {
        let path = get_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().ends_with("config.json"));
    }

    #[test]
    fn test_known_hosts_path() {
        let path = get_known_hosts_path().unwrap();
        assert!(path.ends_with(".ssh/known_hosts"));
    }

    #[test]
    fn test_ssh_config_path() {
        let path = get_ssh_config_path().unwrap();
        assert!(path.ends_with(".ssh/config"));
    }
}
