//! launchport - import external application records into a launcher's
//! binary shortcut list.
//!
//! The crate is built around a codec for the shortcut-list format
//! ([`shortcut`]). Around it sit a duplicate-aware merge ([`merge`]), atomic
//! file handling ([`atomic`]) and an end-to-end [`ShortcutImporter`] driven by
//! an explicit [`ImportConfig`].
//!
//! # Example
//!
//! ```rust,no_run
//! use launchport::{CandidateRecord, ImportConfig, ShortcutImporter};
//!
//! fn main() -> launchport::Result<()> {
//!     let config = ImportConfig::new("/home/me/.steam/steam/userdata/1234/config/shortcuts.vdf");
//!     let importer = ShortcutImporter::new(config)?;
//!
//!     let report = importer.import(&[CandidateRecord::new(
//!         "Some Game",
//!         r"C:\Games\Some Game\game.exe",
//!         r"C:\Games\Some Game",
//!     )])?;
//!     println!("Added {} shortcuts ({} duplicates)", report.added, report.skipped_duplicates);
//!
//!     Ok(())
//! }
//! ```

pub mod atomic;
pub mod config;
pub mod error;
pub mod import;
pub mod merge;
pub mod platform;
pub mod shortcut;

// Re-export commonly used types
pub use config::{AppConfig, FormatConfig, ImportConfig, ImportDefaults};
pub use error::{ImportError, Result};
pub use import::{load_candidates, ImportReport, ShortcutImporter};
pub use merge::{merge_entries, MergeResult};
pub use shortcut::{
    clean_title, decode_shortcuts, encode_shortcuts, write_shortcuts_file, CandidateRecord,
    DecodeIssue, DecodeOutcome, DecodeStatus, EncodeOptions, ShortcutEntry,
};
