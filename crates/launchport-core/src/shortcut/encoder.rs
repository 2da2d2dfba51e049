//! Writer for the binary shortcut list.
//!
//! The whole file is assembled in memory before anything touches the disk,
//! so an encoding problem never leaves a half-written list behind.

use super::entry::ShortcutEntry;
use super::format::{keys, WriteFieldExt, HIDDEN_FLAG};
use super::sanitize::{ascii_safe, clean_title_or, quote_path};
use crate::atomic::atomic_write_bytes;
use crate::config::{FormatConfig, ImportDefaults};
use crate::error::{ImportError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Settings the encoder needs from the surrounding import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Display name for entries whose title cleans down to nothing.
    pub placeholder_name: String,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            placeholder_name: ImportDefaults::PLACEHOLDER_NAME.to_string(),
        }
    }
}

/// Serialize `entries` into a complete shortcut list.
///
/// Entries are indexed by position. Titles go through the cleaning pipeline,
/// other values are folded to ASCII, and `exe`/`StartDir` are quoted when
/// they are absolute Windows paths.
pub fn encode_shortcuts(entries: &[ShortcutEntry], options: &EncodeOptions) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(64 + entries.len() * 256);
    buf.begin_map(FormatConfig::ROOT_KEY);

    for (index, entry) in entries.iter().enumerate() {
        encode_entry(&mut buf, index, entry, options)?;
    }

    buf.end_map();
    debug!(
        "Encoded {} shortcut entries into {} bytes",
        entries.len(),
        buf.len()
    );
    Ok(buf)
}

/// Encode `entries` and write them to `path` in one atomic step.
///
/// Parent directories are created as needed. Nothing is written when
/// encoding fails.
pub fn write_shortcuts_file(
    path: &Path,
    entries: &[ShortcutEntry],
    options: &EncodeOptions,
) -> Result<()> {
    let bytes = encode_shortcuts(entries, options)?;
    atomic_write_bytes(path, &bytes)?;
    info!(
        "Wrote {} shortcut entries to {}",
        entries.len(),
        path.display()
    );
    Ok(())
}

fn encode_entry(
    buf: &mut Vec<u8>,
    index: usize,
    entry: &ShortcutEntry,
    options: &EncodeOptions,
) -> Result<()> {
    let name = clean_title_or(&entry.name, &options.placeholder_name);
    let exe = required_path(keys::EXE, &entry.executable_path, &name)?;
    let start_dir = required_path(keys::START_DIR, &entry.start_directory, &name)?;

    buf.begin_map(&index.to_string());
    buf.write_string_field(keys::APP_NAME, &name);
    buf.write_string_field(keys::EXE, &exe);
    buf.write_string_field(keys::START_DIR, &start_dir);
    buf.write_string_field(keys::ICON, "");
    buf.write_string_field(keys::SHORTCUT_PATH, "");
    buf.write_string_field(keys::LAUNCH_OPTIONS, &ascii_safe(&entry.launch_options));
    buf.write_int32_field(keys::HIDDEN, HIDDEN_FLAG);

    buf.begin_map(keys::TAGS);
    for (tag_index, tag) in entry.tags.iter().enumerate() {
        buf.write_string_field(&tag_index.to_string(), &ascii_safe(tag));
    }
    buf.end_map();

    buf.end_map();
    Ok(())
}

fn required_path(field: &str, value: &str, name: &str) -> Result<String> {
    let quoted = quote_path(&ascii_safe(value));
    if quoted.trim().is_empty() {
        return Err(ImportError::invalid_entry(
            field,
            format!("empty value for \"{}\"", name),
        ));
    }
    Ok(quoted)
}
