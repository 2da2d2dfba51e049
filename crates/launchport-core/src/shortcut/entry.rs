//! Shortcut entries and the candidate records they are built from.

use super::sanitize::clean_title_or;
use crate::config::ImportDefaults;
use crate::error::{ImportError, Result};
use serde::{Deserialize, Serialize};

/// Tags written when nothing else was configured.
pub fn default_tags() -> Vec<String> {
    vec![
        ImportDefaults::SOURCE_NAME.to_string(),
        ImportDefaults::SOURCE_CATEGORY.to_string(),
    ]
}

/// One non-native application shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutEntry {
    /// Display name (shown in the launcher library).
    pub name: String,
    /// Executable path, stored unquoted.
    pub executable_path: String,
    /// Working directory, stored unquoted.
    pub start_directory: String,
    /// Extra command-line arguments.
    pub launch_options: String,
    /// Category tags, written in order.
    pub tags: Vec<String>,
}

impl ShortcutEntry {
    /// Create an entry with no launch options and the default tags.
    pub fn new(
        name: impl Into<String>,
        executable_path: impl Into<String>,
        start_directory: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            executable_path: executable_path.into(),
            start_directory: start_directory.into(),
            launch_options: String::new(),
            tags: default_tags(),
        }
    }

    /// Set the launch options.
    pub fn with_launch_options(mut self, launch_options: impl Into<String>) -> Self {
        self.launch_options = launch_options.into();
        self
    }

    /// Replace the tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Build an entry from a validated candidate, cleaning its title.
    pub fn from_candidate(
        candidate: &CandidateRecord,
        tags: &[String],
        placeholder_name: &str,
    ) -> Result<Self> {
        candidate.validate()?;
        Ok(Self {
            name: clean_title_or(&candidate.name, placeholder_name),
            executable_path: candidate.executable_path.trim().to_string(),
            start_directory: candidate.start_directory.trim().to_string(),
            launch_options: candidate
                .launch_options
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            tags: tags.to_vec(),
        })
    }

    /// Whether the three fields a launcher needs are all present.
    pub fn is_launchable(&self) -> bool {
        !self.name.is_empty()
            && !self.executable_path.is_empty()
            && !self.start_directory.is_empty()
    }
}

/// An application record handed over by the external installation source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub executable_path: String,
    pub start_directory: String,
    #[serde(default)]
    pub launch_options: Option<String>,
}

impl CandidateRecord {
    pub fn new(
        name: impl Into<String>,
        executable_path: impl Into<String>,
        start_directory: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            executable_path: executable_path.into(),
            start_directory: start_directory.into(),
            launch_options: None,
        }
    }

    pub fn with_launch_options(mut self, launch_options: impl Into<String>) -> Self {
        self.launch_options = Some(launch_options.into());
        self
    }

    /// Check the fields the importer relies on.
    ///
    /// Path existence is the source's responsibility and is not checked here.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("executable_path", &self.executable_path),
            ("start_directory", &self.start_directory),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ImportError::Validation {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_defaults() {
        let entry = ShortcutEntry::new("Game", r"C:\G\game.exe", r"C:\G");
        assert_eq!(entry.launch_options, "");
        assert_eq!(entry.tags, default_tags());
        assert!(entry.is_launchable());
    }

    #[test]
    fn test_is_launchable_requires_all_fields() {
        assert!(!ShortcutEntry::new("", "a.exe", "dir").is_launchable());
        assert!(!ShortcutEntry::new("Game", "", "dir").is_launchable());
        assert!(!ShortcutEntry::new("Game", "a.exe", "").is_launchable());
    }

    #[test]
    fn test_from_candidate_cleans_title() {
        let candidate = CandidateRecord::new("  Café™ ", r" C:\G\cafe.exe ", r"C:\G")
            .with_launch_options(" -windowed ");
        let tags = vec!["Source".to_string(), "Category".to_string()];

        let entry = ShortcutEntry::from_candidate(&candidate, &tags, "Unknown Game").unwrap();

        assert_eq!(entry.name, "Cafe");
        assert_eq!(entry.executable_path, r"C:\G\cafe.exe");
        assert_eq!(entry.launch_options, "-windowed");
        assert_eq!(entry.tags, tags);
    }

    #[test]
    fn test_from_candidate_uses_placeholder() {
        let candidate = CandidateRecord::new("™", r"C:\G\x.exe", r"C:\G");
        let entry = ShortcutEntry::from_candidate(&candidate, &default_tags(), "Untitled").unwrap();
        assert_eq!(entry.name, "Untitled");
    }

    #[test]
    fn test_candidate_validation() {
        let err = CandidateRecord::new("Game", "  ", r"C:\G")
            .validate()
            .unwrap_err();
        match err {
            ImportError::Validation { field, .. } => assert_eq!(field, "executable_path"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_candidate_deserialize_without_launch_options() {
        let candidate: CandidateRecord = serde_json::from_str(
            r#"{"name":"Game","executable_path":"C:\\G\\g.exe","start_directory":"C:\\G"}"#,
        )
        .unwrap();
        assert_eq!(candidate.launch_options, None);
        assert_eq!(candidate.executable_path, r"C:\G\g.exe");
    }
}
