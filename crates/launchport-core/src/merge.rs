//! Merging imported entries into an existing shortcut list.
//!
//! # Duplicate Detection
//!
//! An incoming entry is a duplicate when either key matches an existing
//! entry:
//! - executable path, unquoted and compared case-insensitively
//! - display name, cleaned and compared case-insensitively
//!
//! Existing entries always win. They are kept first, in order and unchanged,
//! and incoming duplicates are dropped rather than used as updates. Incoming
//! entries are only compared with existing ones, never with each other.

use crate::shortcut::{clean_title, normalize_path, ShortcutEntry};
use std::collections::HashSet;
use tracing::{debug, info};

/// Result of a shortcut merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeResult {
    /// Existing entries followed by the newly added ones.
    pub entries: Vec<ShortcutEntry>,
    /// Number of incoming entries appended.
    pub added: usize,
    /// Number of incoming entries dropped as duplicates.
    pub skipped_duplicates: usize,
}

/// Keys of the existing entries.
#[derive(Default)]
struct SeenKeys {
    paths: HashSet<String>,
    names: HashSet<String>,
}

impl SeenKeys {
    fn contains(&self, entry: &ShortcutEntry) -> bool {
        let path = path_key(&entry.executable_path);
        let name = name_key(&entry.name);
        (!path.is_empty() && self.paths.contains(&path))
            || (!name.is_empty() && self.names.contains(&name))
    }

    fn insert(&mut self, entry: &ShortcutEntry) {
        self.paths.insert(path_key(&entry.executable_path));
        self.names.insert(name_key(&entry.name));
    }
}

/// Merge `incoming` into `existing`.
///
/// Each incoming entry is checked against every existing entry; the ones
/// that match nothing are appended in their original order.
pub fn merge_entries(existing: Vec<ShortcutEntry>, incoming: Vec<ShortcutEntry>) -> MergeResult {
    let mut seen = SeenKeys::default();
    for entry in &existing {
        seen.insert(entry);
    }

    let mut entries = existing;
    let mut added = 0;
    let mut skipped = 0;

    for entry in incoming {
        if seen.contains(&entry) {
            debug!(
                "Skipping duplicate shortcut {:?} ({})",
                entry.name, entry.executable_path
            );
            skipped += 1;
            continue;
        }
        entries.push(entry);
        added += 1;
    }

    info!(
        "Merge complete: {} added, {} skipped as duplicates, {} total",
        added,
        skipped,
        entries.len()
    );

    MergeResult {
        entries,
        added,
        skipped_duplicates: skipped,
    }
}

fn path_key(path: &str) -> String {
    normalize_path(path).to_lowercase()
}

/// Names are compared in their cleaned form, the form they are written in.
fn name_key(name: &str) -> String {
    if name.trim().is_empty() {
        return String::new();
    }
    clean_title(name).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, exe: &str) -> ShortcutEntry {
        ShortcutEntry::new(name, exe, r"C:\G")
    }

    #[test]
    fn test_merge_into_empty() {
        let incoming = vec![entry("A", r"C:\G\a.exe"), entry("B", r"C:\G\b.exe")];
        let result = merge_entries(Vec::new(), incoming.clone());

        assert_eq!(result.entries, incoming);
        assert_eq!(result.added, 2);
        assert_eq!(result.skipped_duplicates, 0);
    }

    #[test]
    fn test_merge_with_itself_adds_nothing() {
        let existing = vec![
            entry("A", r"C:\G\a.exe"),
            entry("B", r"C:\G\b.exe"),
            entry("C", r"C:\G\c.exe"),
        ];
        let result = merge_entries(existing.clone(), existing.clone());

        assert_eq!(result.entries, existing);
        assert_eq!(result.added, 0);
        assert_eq!(result.skipped_duplicates, 3);
    }

    #[test]
    fn test_same_path_different_case_is_duplicate() {
        let existing = vec![entry("Game A", r"C:\G\a.exe")];
        let result = merge_entries(existing, vec![entry("Game A (Remastered)", r"c:\g\a.exe")]);

        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].name, "Game A");
        assert_eq!(result.skipped_duplicates, 1);
    }

    #[test]
    fn test_same_name_different_path_is_duplicate() {
        let existing = vec![entry("Game A", r"C:\G\a.exe")];
        let result = merge_entries(existing, vec![entry("game a", r"C:\G\b.exe")]);

        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.added, 0);
        assert_eq!(result.skipped_duplicates, 1);
    }

    #[test]
    fn test_quoted_and_forward_slash_paths_match() {
        let existing = vec![entry("Old", r#""C:\G\a.exe""#)];
        let result = merge_entries(existing, vec![entry("New", "c:/g/a.exe")]);
        assert_eq!(result.added, 0);
    }

    #[test]
    fn test_existing_first_new_appended_in_order() {
        let existing = vec![entry("Z", r"C:\G\z.exe")];
        let incoming = vec![
            entry("B", r"C:\G\b.exe"),
            entry("Z", r"C:\G\other.exe"),
            entry("A", r"C:\G\a.exe"),
        ];
        let result = merge_entries(existing, incoming);

        let names: Vec<_> = result.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Z", "B", "A"]);
        assert_eq!(result.added, 2);
        assert_eq!(result.skipped_duplicates, 1);
    }

    #[test]
    fn test_incoming_entries_not_compared_with_each_other() {
        let incoming = vec![entry("Game", r"C:\G\a.exe"), entry("Game", r"C:\G\b.exe")];
        let result = merge_entries(Vec::new(), incoming.clone());

        assert_eq!(result.entries, incoming);
        assert_eq!(result.added, 2);
        assert_eq!(result.skipped_duplicates, 0);
    }

    #[test]
    fn test_accented_existing_name_matches_cleaned_name() {
        let existing = vec![entry("Pokémon", r"C:\G\old.exe")];
        let result = merge_entries(existing, vec![entry("Pokemon", r"C:\G\new.exe")]);

        assert_eq!(result.added, 0);
        assert_eq!(result.skipped_duplicates, 1);
    }
}
