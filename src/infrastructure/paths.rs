//! Platform paths for data and configuration files.
//!
//! Follows the XDG base directory layout: `$XDG_DATA_HOME/reposearch` for the
//! trace file and `$XDG_CONFIG_HOME/reposearch/config.toml` for settings,
//! falling back to `~/.local/share` and `~/.config`. Without a home directory
//! everything lands under the current directory.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "reposearch";

fn home() -> Option<String> {
    env::var("HOME").ok().filter(|home| !home.is_empty())
}

fn xdg_dir(var: &str, fallback: &str, home: Option<String>) -> PathBuf {
    env::var(var)
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|home| PathBuf::from(home).join(fallback)))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Directory for the trace file.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share", home())
}

/// Default location of the TOML configuration file.
#[must_use]
pub fn get_config_file() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config", home()).join("config.toml")
}

/// Replaces a leading `~` with the home directory.
///
/// Paths without a leading `~`, or `~user` forms, are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, home().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => PathBuf::from(home),
        (path, Some(home)) if path.starts_with("~/") => PathBuf::from(home).join(&path[2..]),
        (path, _) => PathBuf::from(path),
    }
}
