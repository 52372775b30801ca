//! Version and build metadata

/// Crate version from Cargo
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn get_version() -> &'static str {
    VERSION
}

/// Version plus whatever release builds stamped in via `KHT_GIT_HASH` and
/// `KHT_BUILD_DATE`; local builds are marked `dev build`
pub fn get_version_long() -> String {
    build_label(option_env!("KHT_GIT_HASH"), option_env!("KHT_BUILD_DATE"))
}

fn build_label(git_hash: Option<&str>, build_date: Option<&str>) -> String {
    match (git_hash, build_date) {
        (Some(hash), Some(date)) => format!("{VERSION} ({hash}, built {date})"),
        (Some(hash), None) => format!("{VERSION} ({hash})"),
        _ => format!("{VERSION} (dev build)"),
    }
}
