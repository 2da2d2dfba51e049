//! ASCII-safe cleaning of titles and field values.
//!
//! Older readers of the shortcut list choke on non-ASCII payloads, so every
//! value is folded to printable ASCII before it is encoded.

use crate::config::ImportDefaults;
use regex::Regex;
use std::sync::LazyLock;

/// Regex for runs of whitespace.
static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Regex for a drive-letter (`C:\`) or UNC (`\\`) prefix.
static ABSOLUTE_WINDOWS_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Za-z]:\\|\\\\)").unwrap());

/// Clean a display title, substituting the default placeholder when nothing
/// printable is left.
///
/// # Examples
///
/// ```
/// use launchport::shortcut::clean_title;
///
/// assert_eq!(clean_title("Pokémon™ Legends"), "Pokemon Legends");
/// assert_eq!(clean_title("“Quoted” — Edition…"), "\"Quoted\" - Edition...");
/// assert_eq!(clean_title("™©"), "Unknown Game");
/// ```
pub fn clean_title(title: &str) -> String {
    clean_title_or(title, ImportDefaults::PLACEHOLDER_NAME)
}

/// Clean a display title.
///
/// # Rules Applied
/// 1. Strip trademark, registered and service marks
/// 2. Normalize smart quotes to ASCII quotes
/// 3. Normalize dashes, ellipsis, bullets and the multiplication sign
/// 4. Transliterate accented Latin letters to their base letter
/// 5. Drop anything outside printable ASCII
/// 6. Collapse whitespace and trim
/// 7. Fall back to `placeholder` (itself cleaned) when empty
pub fn clean_title_or(title: &str, placeholder: &str) -> String {
    let cleaned = collapse_whitespace(&ascii_safe(title));
    if !cleaned.is_empty() {
        return cleaned;
    }

    let placeholder = collapse_whitespace(&ascii_safe(placeholder));
    if placeholder.is_empty() {
        ImportDefaults::PLACEHOLDER_NAME.to_string()
    } else {
        placeholder
    }
}

/// Fold a value to printable ASCII without touching its spacing.
pub fn ascii_safe(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        fold_char(c, &mut out);
    }
    out
}

/// Strip one pair of wrapping double quotes.
pub fn unquote_path(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
}

/// Unquote a path and, when it is an absolute Windows path, normalize its
/// separators to backslashes.
pub fn normalize_path(value: &str) -> String {
    let unquoted = unquote_path(value);
    let backslashed = unquoted.replace('/', "\\");
    if is_absolute_windows_path(&backslashed) {
        backslashed
    } else {
        unquoted.to_string()
    }
}

/// Produce the on-disk form of an `exe` or `StartDir` value.
///
/// Absolute Windows paths are wrapped in double quotes; anything else is
/// written as is.
pub fn quote_path(value: &str) -> String {
    let normalized = normalize_path(value);
    if is_absolute_windows_path(&normalized) {
        format!("\"{}\"", normalized)
    } else {
        normalized
    }
}

/// Whether `value` starts with a drive letter or UNC prefix.
pub fn is_absolute_windows_path(value: &str) -> bool {
    ABSOLUTE_WINDOWS_PATH.is_match(value)
}

fn collapse_whitespace(value: &str) -> String {
    WHITESPACE_RUNS.replace_all(value, " ").trim().to_string()
}

fn fold_char(c: char, out: &mut String) {
    match c {
        '\u{2122}' | '\u{00AE}' | '\u{2120}' | '\u{00A9}' => {}
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{00B4}' => {
            out.push('\'')
        }
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{00AB}'
        | '\u{00BB}' => out.push('"'),
        '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{FE58}' | '\u{FE63}' | '\u{FF0D}' => {
            out.push('-')
        }
        '\u{2026}' => out.push_str("..."),
        '\u{2022}' | '\u{2023}' | '\u{2043}' | '\u{2219}' | '\u{25CF}' => out.push('*'),
        '\u{00D7}' => out.push('x'),
        ' '..='~' => out.push(c),
        c if c.is_whitespace() => out.push(' '),
        c => {
            if let Some(base) = latin_base(c) {
                out.push_str(base);
            }
        }
    }
}

/// Base letters for Latin-1 Supplement and Latin Extended-A.
fn latin_base(c: char) -> Option<&'static str> {
    let base = match c {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => "A",
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'Æ' => "AE",
        'æ' => "ae",
        'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => "C",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'Ð' | 'Ď' | 'Đ' => "D",
        'ð' | 'ď' | 'đ' => "d",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => "E",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => "G",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'Ĥ' | 'Ħ' => "H",
        'ĥ' | 'ħ' => "h",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => "I",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'Ĳ' => "IJ",
        'ĳ' => "ij",
        'Ĵ' => "J",
        'ĵ' => "j",
        'Ķ' => "K",
        'ķ' | 'ĸ' => "k",
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => "L",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' | 'Ŋ' => "N",
        'ñ' | 'ń' | 'ņ' | 'ň' | 'ŉ' | 'ŋ' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ŏ' | 'Ő' => "O",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'Œ' => "OE",
        'œ' => "oe",
        'Ŕ' | 'Ŗ' | 'Ř' => "R",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'Ś' | 'Ŝ' | 'Ş' | 'Š' => "S",
        'ś' | 'ŝ' | 'ş' | 'š' | 'ſ' => "s",
        'ß' => "ss",
        'Ţ' | 'Ť' | 'Ŧ' => "T",
        'ţ' | 'ť' | 'ŧ' => "t",
        'Þ' => "TH",
        'þ' => "th",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => "U",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'Ŵ' => "W",
        'ŵ' => "w",
        'Ý' | 'Ŷ' | 'Ÿ' => "Y",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'Ź' | 'Ż' | 'Ž' => "Z",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strips_marks() {
        assert_eq!(clean_title("Halo™: Reach®"), "Halo: Reach");
        assert_eq!(clean_title("Brand℠ Game"), "Brand Game");
    }

    #[test]
    fn test_normalizes_punctuation() {
        assert_eq!(clean_title("Assassin’s Creed"), "Assassin's Creed");
        assert_eq!(clean_title("Part 1 – The Start"), "Part 1 - The Start");
        assert_eq!(clean_title("Wait…"), "Wait...");
        assert_eq!(clean_title("• Bullet"), "* Bullet");
        assert_eq!(clean_title("2×2"), "2x2");
    }

    #[test]
    fn test_transliterates_accents() {
        assert_eq!(clean_title("Ōkami HD"), "Okami HD");
        assert_eq!(clean_title("Señor Café Ÿ"), "Senor Cafe Y");
        assert_eq!(clean_title("Łódź"), "Lodz");
    }

    #[test]
    fn test_drops_unprintable_and_collapses_whitespace() {
        assert_eq!(clean_title("  Final\tFantasy \u{00A0} VII\n"), "Final Fantasy VII");
        assert_eq!(clean_title("ドラゴン Quest"), "Quest");
        assert_eq!(clean_title("Bell\u{0007}"), "Bell");
    }

    #[test]
    fn test_empty_title_uses_placeholder() {
        assert_eq!(clean_title("™©"), "Unknown Game");
        assert_eq!(clean_title("   "), "Unknown Game");
        assert_eq!(clean_title_or("日本", "Untitled"), "Untitled");
        assert_eq!(clean_title_or("日本", "日本"), "Unknown Game");
    }

    #[test]
    fn test_ascii_safe_keeps_spacing() {
        assert_eq!(ascii_safe("-fullscreen  -w 1920"), "-fullscreen  -w 1920");
        assert_eq!(ascii_safe("a\u{0000}b"), "ab");
    }

    #[test]
    fn test_quote_path() {
        assert_eq!(quote_path(r"C:\Games\a.exe"), r#""C:\Games\a.exe""#);
        assert_eq!(quote_path("C:/Games/a.exe"), r#""C:\Games\a.exe""#);
        assert_eq!(quote_path(r"\\server\share\a.exe"), r#""\\server\share\a.exe""#);
        assert_eq!(quote_path("//server/share"), r#""\\server\share""#);
        assert_eq!(quote_path(r#""D:\already""#), r#""D:\already""#);
        assert_eq!(quote_path("game.exe"), "game.exe");
        assert_eq!(quote_path("/usr/bin/game"), "/usr/bin/game");
    }

    #[test]
    fn test_unquote_path() {
        assert_eq!(unquote_path(r#""C:\a.exe""#), r"C:\a.exe");
        assert_eq!(unquote_path(r"C:\a.exe"), r"C:\a.exe");
        assert_eq!(unquote_path(r#""C:\a.exe" -x"#), r#""C:\a.exe" -x"#);
        assert_eq!(unquote_path("\""), "\"");
    }

    proptest! {
        #[test]
        fn clean_title_is_idempotent(title in "\\PC{0,40}") {
            let once = clean_title(&title);
            prop_assert_eq!(clean_title(&once), once.clone());
        }

        #[test]
        fn clean_title_is_printable_ascii(title in "\\PC{0,40}") {
            let cleaned = clean_title(&title);
            prop_assert!(!cleaned.is_empty());
            prop_assert!(cleaned.bytes().all(|b| (0x20..=0x7e).contains(&b)));
        }
    }
}
