//! Platform abstraction layer.
//!
//! All `#[cfg]` blocks for OS-specific behavior live in this module rather
//! than being scattered through the codec and importer.
//!
//! - `paths` - Launcher install roots and per-account shortcut-list paths

pub mod paths;

pub use paths::{default_launcher_roots, find_shortcut_files, shortcut_file_for};
