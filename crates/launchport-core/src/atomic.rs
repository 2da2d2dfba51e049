//! Atomic file operations for the shortcut list and its JSON inputs.
//!
//! Writes go through:
//! 1. Write to a temp file next to the target with a unique PID+TID suffix
//! 2. fsync so the data reaches disk
//! 3. Atomic rename onto the target path
//!
//! Backups are separate timestamped copies taken before the rename.

use crate::config::AppConfig;
use crate::error::{ImportError, Result};
use chrono::Local;
use serde::de::DeserializeOwned;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::thread;
use tracing::debug;

/// Read a whole file into memory.
///
/// Returns `None` if the file doesn't exist.
pub fn atomic_read_bytes(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ImportError::Io {
            message: format!("Failed to read {}", path.display()),
            path: Some(path.to_path_buf()),
            source: Some(e),
        }),
    }
}

/// Read and parse a JSON file.
///
/// Returns `None` if the file doesn't exist, or an error if parsing fails.
pub fn atomic_read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let Some(bytes) = atomic_read_bytes(path)? else {
        return Ok(None);
    };

    let data: T = serde_json::from_slice(&bytes).map_err(|e| ImportError::Json {
        message: format!("Failed to parse {}: {}", path.display(), e),
        source: Some(e),
    })?;

    Ok(Some(data))
}

/// Write a complete buffer to `path` atomically.
///
/// The parent directory is created when missing. On failure the temp file is
/// removed and the previous contents of `path` are left untouched.
pub fn atomic_write_bytes(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| ImportError::Io {
                message: format!("Failed to create directory {}", parent.display()),
                path: Some(parent.to_path_buf()),
                source: Some(e),
            })?;
        }
    }

    let temp_path = temp_path_for(path);

    if let Err(e) = write_synced(&temp_path, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(ImportError::Io {
            message: format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            ),
            path: Some(path.to_path_buf()),
            source: Some(e),
        });
    }

    debug!("Atomically wrote {} ({} bytes)", path.display(), data.len());
    Ok(())
}

/// Copy `path` to a timestamped sibling such as `shortcuts.vdf.20240101_120000.bak`.
///
/// A backup taken earlier in the same second is never overwritten; the new one
/// gets a counter suffix (`...120000-1.bak`) instead.
///
/// Returns the backup path, or `None` when there was nothing to back up.
pub fn create_backup(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }

    let stamp = Local::now()
        .format(AppConfig::BACKUP_TIMESTAMP_FORMAT)
        .to_string();
    let backup_path = unique_backup_path(path, &stamp);
    fs::copy(path, &backup_path).map_err(|e| ImportError::io_with_path(e, &backup_path))?;

    debug!("Created backup: {}", backup_path.display());
    Ok(Some(backup_path))
}

fn backup_path_for(path: &Path, stamp: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.{}", stamp, AppConfig::BACKUP_EXTENSION));
    path.with_file_name(name)
}

fn unique_backup_path(path: &Path, stamp: &str) -> PathBuf {
    let mut candidate = backup_path_for(path, stamp);
    let mut counter = 1u32;
    while candidate.exists() {
        candidate = backup_path_for(path, &format!("{}-{}", stamp, counter));
        counter += 1;
    }
    candidate
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.{}.tmp", process::id(), thread_id()));
    path.with_file_name(name)
}

fn write_synced(temp_path: &Path, data: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| ImportError::Io {
            message: format!("Failed to create temp file {}", temp_path.display()),
            path: Some(temp_path.to_path_buf()),
            source: Some(e),
        })?;

    file.write_all(data).map_err(|e| ImportError::Io {
        message: format!("Failed to write temp file {}", temp_path.display()),
        path: Some(temp_path.to_path_buf()),
        source: Some(e),
    })?;

    file.sync_all().map_err(|e| ImportError::Io {
        message: format!("Failed to sync temp file {}", temp_path.display()),
        path: Some(temp_path.to_path_buf()),
        source: Some(e),
    })
}

/// Get a unique thread identifier.
fn thread_id() -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    format!("{:?}", thread::current().id()).hash(&mut hasher);
    hasher.finish()
}
