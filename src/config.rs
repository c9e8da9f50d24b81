//! Runtime configuration
//!
//! The only setting is where the SQLite database lives.

use std::path::{Path, PathBuf};

/// Environment variable overriding the database location
pub const DATABASE_PATH_ENV: &str = "FITTRACK_DATABASE_PATH";

/// Get the database path from environment or use default
pub fn database_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));
    resolve_database_path(std::env::var(DATABASE_PATH_ENV).ok(), exe_dir.as_deref())
}

fn resolve_database_path(override_path: Option<String>, exe_dir: Option<&Path>) -> PathBuf {
    if let Some(path) = override_path.filter(|p| !p.trim().is_empty()) {
        return PathBuf::from(path);
    }

    let mut path = exe_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(Path::parent) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("fittrack.db");
    path
}
