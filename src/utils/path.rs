//! Path utilities: resolve the application directory, expand ~.

use std::env;
use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// `%APPDATA%\workhours` on Windows, `~/.workhours` elsewhere.
pub fn app_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join("workhours")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".workhours")
    }
}
