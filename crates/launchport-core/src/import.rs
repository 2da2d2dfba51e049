//! End-to-end import of candidate records into a shortcut list.
//!
//! # Workflow
//!
//! 1. **Read**: load the current list, if any, and decode it best-effort
//! 2. **Validate**: turn candidates into entries, skipping invalid ones
//! 3. **Merge**: append entries that are not already present
//! 4. **Backup**: copy the current list aside
//! 5. **Write**: encode in memory and replace the list atomically
//!
//! A damaged existing list is treated as holding whatever could be recovered.
//! Only failing to produce the output file fails the import.

use crate::atomic::{atomic_read_bytes, atomic_read_json, create_backup};
use crate::config::ImportConfig;
use crate::error::{ImportError, Result};
use crate::merge::merge_entries;
use crate::shortcut::{
    clean_title_or, decode_shortcuts, write_shortcuts_file, CandidateRecord, DecodeOutcome,
    DecodeStatus, ShortcutEntry,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Summary of one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// The shortcut list that was written.
    pub output_path: PathBuf,
    /// Entries recovered from the previous list.
    pub existing: usize,
    /// How completely the previous list was read.
    pub decode_status: DecodeStatus,
    /// Candidates appended to the list.
    pub added: usize,
    /// Candidates dropped because an equivalent entry was present.
    pub skipped_duplicates: usize,
    /// Candidates dropped because they were missing required fields.
    pub invalid: usize,
    /// Copy of the previous list, when one was taken.
    pub backup_path: Option<PathBuf>,
}

impl ImportReport {
    /// Total entries in the written list.
    pub fn total(&self) -> usize {
        self.existing + self.added
    }
}

/// Imports candidate records into one shortcut list.
pub struct ShortcutImporter {
    config: ImportConfig,
}

impl ShortcutImporter {
    /// Create an importer, rejecting configs that cannot drive an import.
    pub fn new(config: ImportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Read and decode the current shortcut list.
    ///
    /// A missing file decodes to zero entries. Read errors are returned since
    /// overwriting an unreadable list would lose its contents.
    pub fn read_existing(&self) -> Result<DecodeOutcome> {
        let path = &self.config.shortcuts_path;
        match atomic_read_bytes(path)? {
            Some(bytes) => Ok(decode_shortcuts(&bytes)),
            None => {
                info!("No shortcut list at {}, starting fresh", path.display());
                Ok(DecodeOutcome::default())
            }
        }
    }

    /// Merge `candidates` into the shortcut list and write it back.
    pub fn import(&self, candidates: &[CandidateRecord]) -> Result<ImportReport> {
        let path = self.config.shortcuts_path.clone();

        let outcome = self.read_existing()?;
        if let Some(issue) = outcome.issue() {
            warn!(
                "Existing shortcut list {} is damaged ({}); keeping {} recovered entries",
                path.display(),
                issue,
                outcome.entries.len()
            );
        }
        let decode_status = outcome.status;

        // Recovered entries are rewritten the way new ones are: cleaned name,
        // configured tags.
        let mut existing = outcome.into_entries();
        for entry in &mut existing {
            entry.name = clean_title_or(&entry.name, &self.config.placeholder_name);
            entry.tags = self.config.tags.clone();
        }
        let existing_count = existing.len();

        let (incoming, invalid) = self.prepare_candidates(candidates)?;
        let merged = merge_entries(existing, incoming);

        let backup_path = if self.config.keep_backup {
            match create_backup(&path) {
                Ok(backup) => backup,
                Err(e) => {
                    warn!("Failed to back up {}: {}", path.display(), e);
                    None
                }
            }
        } else {
            None
        };

        write_shortcuts_file(&path, &merged.entries, &self.config.encode_options())?;

        info!(
            "Imported into {}: {} existing, {} added, {} duplicates, {} invalid",
            path.display(),
            existing_count,
            merged.added,
            merged.skipped_duplicates,
            invalid
        );

        Ok(ImportReport {
            output_path: path,
            existing: existing_count,
            decode_status,
            added: merged.added,
            skipped_duplicates: merged.skipped_duplicates,
            invalid,
            backup_path,
        })
    }

    /// Convert candidates to entries, counting the ones that fail validation.
    ///
    /// Recoverable errors skip the candidate; anything else aborts.
    fn prepare_candidates(
        &self,
        candidates: &[CandidateRecord],
    ) -> Result<(Vec<ShortcutEntry>, usize)> {
        let mut entries = Vec::with_capacity(candidates.len());
        let mut invalid = 0;

        for candidate in candidates {
            match ShortcutEntry::from_candidate(
                candidate,
                &self.config.tags,
                &self.config.placeholder_name,
            ) {
                Ok(entry) => entries.push(entry),
                Err(e) if e.is_recoverable() => {
                    warn!("Skipping candidate {:?}: {}", candidate.name, e);
                    invalid += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok((entries, invalid))
    }
}

/// Load candidate records from a JSON array file.
pub fn load_candidates(path: &Path) -> Result<Vec<CandidateRecord>> {
    atomic_read_json(path)?.ok_or_else(|| ImportError::FileNotFound(path.to_path_buf()))
}
