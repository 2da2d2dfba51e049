//! Byte-level primitives of the binary shortcut-list format.
//!
//! The format is a nested key/value map. Every field starts with a one-byte
//! type marker followed by a null-terminated key:
//!
//! | marker | meaning   | payload after the key          |
//! |--------|-----------|--------------------------------|
//! | `0x00` | map start | fields, then `0x08`            |
//! | `0x01` | string    | null-terminated value          |
//! | `0x02` | int32     | 4 bytes, little-endian         |
//! | `0x08` | map end   | none (no key either)           |

use thiserror::Error;

pub const MAP_START: u8 = 0x00;
pub const STRING: u8 = 0x01;
pub const INT32: u8 = 0x02;
pub const MAP_END: u8 = 0x08;

/// Terminator after every key and string value.
pub const NUL: u8 = 0x00;

/// Value of the `hidden` field. Imported entries are never hidden.
pub const HIDDEN_FLAG: u32 = 0;

/// Field keys of one entry, in the order they are written.
pub mod keys {
    pub const APP_NAME: &str = "appname";
    pub const EXE: &str = "exe";
    pub const START_DIR: &str = "StartDir";
    pub const ICON: &str = "icon";
    pub const SHORTCUT_PATH: &str = "ShortcutPath";
    pub const LAUNCH_OPTIONS: &str = "LaunchOptions";
    pub const HIDDEN: &str = "hidden";
    pub const TAGS: &str = "tags";
}

/// Where and why decoding stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeIssue {
    #[error("missing or unrecognized root header at byte {offset}")]
    InvalidHeader { offset: usize },

    #[error("input ends unexpectedly at byte {offset}")]
    Truncated { offset: usize },

    #[error("unexpected marker 0x{marker:02x} at byte {offset}")]
    UnexpectedMarker { marker: u8, offset: usize },
}

/// Forward-only cursor over an in-memory shortcut list.
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeIssue> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or(DecodeIssue::Truncated { offset: self.pos })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Read up to the next NUL and consume it. The NUL is not returned.
    pub fn read_cstr(&mut self) -> Result<&'a [u8], DecodeIssue> {
        let rest = &self.data[self.pos..];
        let len = rest
            .iter()
            .position(|&b| b == NUL)
            .ok_or(DecodeIssue::Truncated {
                offset: self.data.len(),
            })?;
        self.pos += len + 1;
        Ok(&rest[..len])
    }

    pub fn skip(&mut self, len: usize) -> Result<(), DecodeIssue> {
        if self.data.len() - self.pos < len {
            return Err(DecodeIssue::Truncated {
                offset: self.data.len(),
            });
        }
        self.pos += len;
        Ok(())
    }
}

/// Field writers for building a shortcut list in memory.
///
/// Callers must pass keys and values without interior NUL bytes.
pub(crate) trait WriteFieldExt {
    fn begin_map(&mut self, key: &str);
    fn end_map(&mut self);
    fn write_string_field(&mut self, key: &str, value: &str);
    fn write_int32_field(&mut self, key: &str, value: u32);
}

impl WriteFieldExt for Vec<u8> {
    fn begin_map(&mut self, key: &str) {
        self.push(MAP_START);
        push_cstr(self, key);
    }

    fn end_map(&mut self) {
        self.push(MAP_END);
    }

    fn write_string_field(&mut self, key: &str, value: &str) {
        self.push(STRING);
        push_cstr(self, key);
        push_cstr(self, value);
    }

    fn write_int32_field(&mut self, key: &str, value: u32) {
        self.push(INT32);
        push_cstr(self, key);
        self.extend_from_slice(&value.to_le_bytes());
    }
}

fn push_cstr(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(s.as_bytes());
    buf.push(NUL);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_field_layout() {
        let mut buf = Vec::new();
        buf.write_string_field("exe", "a");
        assert_eq!(buf, [STRING, b'e', b'x', b'e', NUL, b'a', NUL]);
    }

    #[test]
    fn test_empty_string_is_single_terminator() {
        let mut buf = Vec::new();
        buf.write_string_field("icon", "");
        assert_eq!(buf, b"\x01icon\x00\x00");
    }

    #[test]
    fn test_int32_field_is_little_endian() {
        let mut buf = Vec::new();
        buf.write_int32_field("n", 0x0403_0201);
        assert_eq!(buf, [INT32, b'n', NUL, 0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_reader_cstr_and_skip() {
        let data = b"key\x00\x01\x02\x03\x04tail";
        let mut reader = ByteReader::new(data);
        assert_eq!(reader.read_cstr().unwrap(), b"key");
        reader.skip(4).unwrap();
        assert_eq!(reader.position(), 8);
        assert_eq!(reader.read_u8().unwrap(), b't');
    }

    #[test]
    fn test_reader_reports_truncation() {
        let mut reader = ByteReader::new(b"abc");
        assert_eq!(
            reader.read_cstr(),
            Err(DecodeIssue::Truncated { offset: 3 })
        );
        assert_eq!(reader.skip(4), Err(DecodeIssue::Truncated { offset: 3 }));
        reader.skip(3).unwrap();
        assert_eq!(reader.read_u8(), Err(DecodeIssue::Truncated { offset: 3 }));
    }
}
