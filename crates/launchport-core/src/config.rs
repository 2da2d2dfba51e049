//! Centralized configuration for launchport.
//!
//! Format constants live on unit structs the way the rest of the crate reads
//! them (`FormatConfig::ROOT_KEY`). Per-run settings are carried by
//! [`ImportConfig`], which is passed explicitly into the importer; the codec
//! only ever sees the narrower [`EncodeOptions`].

use crate::atomic::atomic_read_json;
use crate::error::{ImportError, Result};
use crate::shortcut::{default_tags, EncodeOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const BACKUP_EXTENSION: &'static str = "bak";
    pub const BACKUP_TIMESTAMP_FORMAT: &'static str = "%Y%m%d_%H%M%S";
}

/// Constants of the binary shortcut-list format.
pub struct FormatConfig;

impl FormatConfig {
    pub const ROOT_KEY: &'static str = "shortcuts";
    pub const SHORTCUTS_FILE_NAME: &'static str = "shortcuts.vdf";
    pub const USERDATA_DIR_NAME: &'static str = "userdata";
    pub const CONFIG_DIR_NAME: &'static str = "config";
}

/// Defaults applied to imported entries.
pub struct ImportDefaults;

impl ImportDefaults {
    pub const PLACEHOLDER_NAME: &'static str = "Unknown Game";
    pub const SOURCE_NAME: &'static str = "External Library";
    pub const SOURCE_CATEGORY: &'static str = "Imported";
}

/// Settings for one import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// The shortcut-list file to read and rewrite.
    pub shortcuts_path: PathBuf,
    /// Tags written on every entry, in order.
    pub tags: Vec<String>,
    /// Display name used when a title cleans down to nothing.
    pub placeholder_name: String,
    /// Copy the current file aside before overwriting it.
    pub keep_backup: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            shortcuts_path: PathBuf::new(),
            tags: default_tags(),
            placeholder_name: ImportDefaults::PLACEHOLDER_NAME.to_string(),
            keep_backup: true,
        }
    }
}

impl ImportConfig {
    /// Create a config targeting `shortcuts_path` with default settings.
    pub fn new(shortcuts_path: impl Into<PathBuf>) -> Self {
        Self {
            shortcuts_path: shortcuts_path.into(),
            ..Self::default()
        }
    }

    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let config: ImportConfig =
            atomic_read_json(path)?.ok_or_else(|| ImportError::FileNotFound(path.to_path_buf()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set whether a backup is taken before overwriting.
    pub fn with_backup(mut self, keep_backup: bool) -> Self {
        self.keep_backup = keep_backup;
        self
    }

    /// Replace the tags written on every entry.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Check that the config can drive an import.
    pub fn validate(&self) -> Result<()> {
        if self.shortcuts_path.as_os_str().is_empty() {
            return Err(ImportError::Config {
                message: "shortcuts_path must be set".to_string(),
            });
        }
        if self.tags.iter().any(|t| t.trim().is_empty()) {
            return Err(ImportError::Config {
                message: "tags must not contain empty values".to_string(),
            });
        }
        if self.placeholder_name.trim().is_empty() {
            return Err(ImportError::Config {
                message: "placeholder_name must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// The subset of settings the encoder needs.
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            placeholder_name: self.placeholder_name.clone(),
        }
    }
}
