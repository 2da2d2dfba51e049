//! Platform-specific launcher paths.
//!
//! The launcher keeps one shortcut list per local account:
//! `{root}/userdata/{account}/config/shortcuts.vdf`.

use crate::config::FormatConfig;
use crate::error::{ImportError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Well-known launcher install roots for the current platform.
///
/// Only roots that exist are returned, most common first.
///
/// # Platform Behavior
/// - **Linux**: `~/.steam/steam`, `~/.local/share/Steam`, and the Flatpak
///   data directory
/// - **Windows**: `C:\Program Files (x86)\Steam`, `C:\Program Files\Steam`
/// - **macOS**: `~/Library/Application Support/Steam`
pub fn default_launcher_roots() -> Vec<PathBuf> {
    candidate_roots()
        .into_iter()
        .filter(|root| root.is_dir())
        .collect()
}

fn candidate_roots() -> Vec<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        let Some(home) = dirs::home_dir() else {
            return Vec::new();
        };
        vec![
            home.join(".steam").join("steam"),
            home.join(".local").join("share").join("Steam"),
            home.join(".var")
                .join("app")
                .join("com.valvesoftware.Steam")
                .join(".local")
                .join("share")
                .join("Steam"),
        ]
    }

    #[cfg(target_os = "windows")]
    {
        vec![
            PathBuf::from(r"C:\Program Files (x86)\Steam"),
            PathBuf::from(r"C:\Program Files\Steam"),
        ]
    }

    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|dir| vec![dir.join("Steam")])
            .unwrap_or_default()
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    {
        Vec::new()
    }
}

/// Path of the shortcut list for one account under `root`.
pub fn shortcut_file_for(root: &Path, account_id: &str) -> PathBuf {
    root.join(FormatConfig::USERDATA_DIR_NAME)
        .join(account_id)
        .join(FormatConfig::CONFIG_DIR_NAME)
        .join(FormatConfig::SHORTCUTS_FILE_NAME)
}

/// Find every existing per-account shortcut list under `root`, sorted.
///
/// A root without a `userdata` directory has no lists and returns an empty
/// vector.
pub fn find_shortcut_files(root: &Path) -> Result<Vec<PathBuf>> {
    let userdata = root.join(FormatConfig::USERDATA_DIR_NAME);
    if !userdata.is_dir() {
        return Ok(Vec::new());
    }

    let read_dir = fs::read_dir(&userdata).map_err(|e| ImportError::io_with_path(e, &userdata))?;

    let mut files = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|e| ImportError::io_with_path(e, &userdata))?;
        if !dir_entry.path().is_dir() {
            continue;
        }
        let account = dir_entry.file_name();
        let candidate = shortcut_file_for(root, &account.to_string_lossy());
        if candidate.is_file() {
            files.push(candidate);
        }
    }

    files.sort();
    debug!(
        "Found {} shortcut lists under {}",
        files.len(),
        root.display()
    );
    Ok(files)
}
