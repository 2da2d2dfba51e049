//! Best-effort reader for the binary shortcut list.
//!
//! Decoding never fails. A damaged or truncated file yields every entry that
//! was fully parsed before the damage, together with a [`DecodeStatus`]
//! describing where parsing stopped.

use super::entry::ShortcutEntry;
use super::format::{keys, ByteReader, DecodeIssue, INT32, MAP_END, MAP_START, STRING};
use super::sanitize::unquote_path;
use crate::config::FormatConfig;
use tracing::{debug, warn};

/// How far decoding got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeStatus {
    /// The whole list was read up to the root map's end marker.
    #[default]
    Complete,
    /// Parsing stopped early; the entries before `issue` were kept.
    Partial(DecodeIssue),
}

/// Entries recovered from a shortcut list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOutcome {
    /// Launchable entries, in file order.
    pub entries: Vec<ShortcutEntry>,
    /// Entry maps that were read but lacked a name, executable or start dir.
    pub discarded: usize,
    pub status: DecodeStatus,
}

impl DecodeOutcome {
    pub fn is_complete(&self) -> bool {
        self.status == DecodeStatus::Complete
    }

    /// The issue that stopped decoding, if any.
    pub fn issue(&self) -> Option<DecodeIssue> {
        match self.status {
            DecodeStatus::Complete => None,
            DecodeStatus::Partial(issue) => Some(issue),
        }
    }

    pub fn into_entries(self) -> Vec<ShortcutEntry> {
        self.entries
    }
}

/// Decode a shortcut list held in memory.
///
/// Only the display name, executable and start directory are recovered;
/// launch options come back empty and tags take their defaults. An empty
/// input is a fresh install and decodes to zero entries.
pub fn decode_shortcuts(bytes: &[u8]) -> DecodeOutcome {
    let mut outcome = DecodeOutcome::default();
    if bytes.is_empty() {
        return outcome;
    }

    let mut reader = ByteReader::new(bytes);
    if let Err(issue) = read_root_header(&mut reader) {
        warn!("Shortcut list has no usable header: {}", issue);
        outcome.status = DecodeStatus::Partial(issue);
        return outcome;
    }

    loop {
        match next_entry(&mut reader) {
            Ok(Some(entry)) if entry.is_launchable() => outcome.entries.push(entry),
            Ok(Some(entry)) => {
                debug!("Discarding incomplete shortcut entry {:?}", entry.name);
                outcome.discarded += 1;
            }
            Ok(None) => break,
            Err(issue) => {
                warn!(
                    "Shortcut list decode stopped after {} entries: {}",
                    outcome.entries.len(),
                    issue
                );
                outcome.status = DecodeStatus::Partial(issue);
                break;
            }
        }
    }

    debug!(
        "Decoded {} shortcut entries ({} discarded)",
        outcome.entries.len(),
        outcome.discarded
    );
    outcome
}

fn read_root_header(reader: &mut ByteReader<'_>) -> Result<(), DecodeIssue> {
    let offset = reader.position();
    if reader.read_u8()? != MAP_START {
        return Err(DecodeIssue::InvalidHeader { offset });
    }
    let key = reader.read_cstr()?;
    if !key.eq_ignore_ascii_case(FormatConfig::ROOT_KEY.as_bytes()) {
        return Err(DecodeIssue::InvalidHeader { offset });
    }
    Ok(())
}

/// Read the next entry map, or `None` at the root's end marker.
fn next_entry(reader: &mut ByteReader<'_>) -> Result<Option<ShortcutEntry>, DecodeIssue> {
    let offset = reader.position();
    match reader.read_u8()? {
        MAP_START => {
            // The positional index key carries no identity.
            reader.read_cstr()?;
            read_entry_fields(reader).map(Some)
        }
        MAP_END => Ok(None),
        marker => Err(DecodeIssue::UnexpectedMarker { marker, offset }),
    }
}

fn read_entry_fields(reader: &mut ByteReader<'_>) -> Result<ShortcutEntry, DecodeIssue> {
    let mut entry = ShortcutEntry::new(String::new(), String::new(), String::new());

    loop {
        let offset = reader.position();
        match reader.read_u8()? {
            STRING => {
                let key = reader.read_cstr()?;
                let value = String::from_utf8_lossy(reader.read_cstr()?);
                if key.eq_ignore_ascii_case(keys::APP_NAME.as_bytes()) {
                    entry.name = value.into_owned();
                } else if key.eq_ignore_ascii_case(keys::EXE.as_bytes()) {
                    entry.executable_path = unquote_path(&value).to_string();
                } else if key.eq_ignore_ascii_case(keys::START_DIR.as_bytes()) {
                    entry.start_directory = unquote_path(&value).to_string();
                }
            }
            INT32 => {
                reader.read_cstr()?;
                reader.skip(4)?;
            }
            MAP_START => {
                reader.read_cstr()?;
                skip_nested_map(reader)?;
            }
            MAP_END => return Ok(entry),
            marker => return Err(DecodeIssue::UnexpectedMarker { marker, offset }),
        }
    }
}

/// Skip a nested map whose start marker and key were already consumed.
///
/// Depth rises on each inner map start and falls on each map end, so
/// arbitrarily nested unknown fields are passed over without interpretation.
fn skip_nested_map(reader: &mut ByteReader<'_>) -> Result<(), DecodeIssue> {
    let mut depth = 1usize;
    while depth > 0 {
        let offset = reader.position();
        match reader.read_u8()? {
            MAP_START => {
                reader.read_cstr()?;
                depth += 1;
            }
            STRING => {
                reader.read_cstr()?;
                reader.read_cstr()?;
            }
            INT32 => {
                reader.read_cstr()?;
                reader.skip(4)?;
            }
            MAP_END => depth -= 1,
            marker => return Err(DecodeIssue::UnexpectedMarker { marker, offset }),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-assembled list with one entry in the layout the launcher writes.
    fn single_entry_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"\x00shortcuts\x00");
        bytes.extend_from_slice(b"\x000\x00");
        bytes.extend_from_slice(b"\x01appname\x00Game A\x00");
        bytes.extend_from_slice(b"\x01exe\x00\"C:\\G\\a.exe\"\x00");
        bytes.extend_from_slice(b"\x01StartDir\x00\"C:\\G\"\x00");
        bytes.extend_from_slice(b"\x01icon\x00\x00");
        bytes.extend_from_slice(b"\x02hidden\x00\x00\x00\x00\x00");
        bytes.extend_from_slice(b"\x00tags\x00\x010\x00Fav\x00\x08");
        bytes.extend_from_slice(b"\x08");
        bytes.extend_from_slice(b"\x08");
        bytes
    }

    #[test]
    fn test_decode_empty_input() {
        let outcome = decode_shortcuts(&[]);
        assert!(outcome.is_complete());
        assert!(outcome.entries.is_empty());
    }

    #[test]
    fn test_decode_empty_list() {
        let outcome = decode_shortcuts(b"\x00shortcuts\x00\x08\x08");
        assert!(outcome.is_complete());
        assert!(outcome.entries.is_empty());
    }

    #[test]
    fn test_decode_single_entry_strips_quotes() {
        let outcome = decode_shortcuts(&single_entry_bytes());
        assert!(outcome.is_complete());
        assert_eq!(outcome.entries.len(), 1);

        let entry = &outcome.entries[0];
        assert_eq!(entry.name, "Game A");
        assert_eq!(entry.executable_path, r"C:\G\a.exe");
        assert_eq!(entry.start_directory, r"C:\G");
        assert_eq!(entry.launch_options, "");
    }

    #[test]
    fn test_decode_accepts_capitalized_keys() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"\x00Shortcuts\x00\x000\x00");
        bytes.extend_from_slice(b"\x01AppName\x00Old\x00");
        bytes.extend_from_slice(b"\x01Exe\x00/usr/bin/old\x00");
        bytes.extend_from_slice(b"\x01StartDir\x00/usr/bin\x00\x08\x08");

        let outcome = decode_shortcuts(&bytes);
        assert!(outcome.is_complete());
        assert_eq!(outcome.entries[0].name, "Old");
        assert_eq!(outcome.entries[0].executable_path, "/usr/bin/old");
    }

    #[test]
    fn test_decode_skips_deeply_nested_maps() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"\x00shortcuts\x00\x000\x00");
        bytes.extend_from_slice(b"\x01appname\x00Nested\x00");
        bytes.extend_from_slice(b"\x00extra\x00\x00inner\x00\x01k\x00v\x00");
        bytes.extend_from_slice(b"\x02n\x00\x08\x00\x00\x00\x08\x08");
        bytes.extend_from_slice(b"\x01exe\x00x.exe\x00\x01StartDir\x00dir\x00\x08\x08");

        let outcome = decode_shortcuts(&bytes);
        assert!(outcome.is_complete());
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(outcome.entries[0].executable_path, "x.exe");
    }

    #[test]
    fn test_decode_discards_incomplete_entries() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"\x00shortcuts\x00");
        bytes.extend_from_slice(b"\x000\x00\x01appname\x00NoExe\x00\x08");
        bytes.extend_from_slice(b"\x001\x00\x01appname\x00Ok\x00\x01exe\x00a\x00\x01StartDir\x00b\x00\x08");
        bytes.extend_from_slice(b"\x08");

        let outcome = decode_shortcuts(&bytes);
        assert!(outcome.is_complete());
        assert_eq!(outcome.discarded, 1);
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(outcome.entries[0].name, "Ok");
    }

    #[test]
    fn test_decode_truncated_keeps_earlier_entries() {
        let mut bytes = single_entry_bytes();
        bytes.pop();
        bytes.extend_from_slice(b"\x001\x00\x01appname\x00Cut");

        let outcome = decode_shortcuts(&bytes);
        assert_eq!(outcome.entries.len(), 1);
        assert!(matches!(outcome.issue(), Some(DecodeIssue::Truncated { .. })));
    }

    #[test]
    fn test_decode_missing_root_end_is_partial() {
        let mut bytes = single_entry_bytes();
        bytes.pop();

        let outcome = decode_shortcuts(&bytes);
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(
            outcome.status,
            DecodeStatus::Partial(DecodeIssue::Truncated {
                offset: bytes.len()
            })
        );
    }

    #[test]
    fn test_decode_unknown_marker() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"\x00shortcuts\x00\x000\x00\x07big\x00");

        let outcome = decode_shortcuts(&bytes);
        assert!(outcome.entries.is_empty());
        assert_eq!(
            outcome.issue(),
            Some(DecodeIssue::UnexpectedMarker {
                marker: 0x07,
                offset: 14
            })
        );
    }

    #[test]
    fn test_decode_invalid_header() {
        let outcome = decode_shortcuts(b"\x00library\x00\x08");
        assert_eq!(
            outcome.issue(),
            Some(DecodeIssue::InvalidHeader { offset: 0 })
        );

        let outcome = decode_shortcuts(b"garbage");
        assert_eq!(
            outcome.issue(),
            Some(DecodeIssue::InvalidHeader { offset: 0 })
        );
    }
}
