//! Codec for the launcher's binary shortcut list.
//!
//! Provides:
//! - [`decode_shortcuts`]: best-effort reader returning a [`DecodeOutcome`]
//! - [`encode_shortcuts`] / [`write_shortcuts_file`]: byte-exact writer
//! - Title cleaning and path quoting used by the writer
//!
//! The codec holds no configuration of its own; the only setting it takes is
//! an [`EncodeOptions`] value.
//!
//! # Example
//!
//! ```rust
//! use launchport::shortcut::{decode_shortcuts, encode_shortcuts, EncodeOptions, ShortcutEntry};
//!
//! let entries = vec![ShortcutEntry::new("Game", r"C:\Games\game.exe", r"C:\Games")];
//! let bytes = encode_shortcuts(&entries, &EncodeOptions::default()).unwrap();
//!
//! let decoded = decode_shortcuts(&bytes);
//! assert!(decoded.is_complete());
//! assert_eq!(decoded.entries[0].executable_path, r"C:\Games\game.exe");
//! ```

mod decoder;
mod encoder;
mod entry;
pub mod format;
mod sanitize;

pub use decoder::{decode_shortcuts, DecodeOutcome, DecodeStatus};
pub use encoder::{encode_shortcuts, write_shortcuts_file, EncodeOptions};
pub use entry::{default_tags, CandidateRecord, ShortcutEntry};
pub use format::DecodeIssue;
pub use sanitize::{
    ascii_safe, clean_title, clean_title_or, is_absolute_windows_path, normalize_path,
    quote_path, unquote_path,
};
