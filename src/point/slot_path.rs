//! Slot path escaping
//!
//! Slot names reserve `$` as an escape marker: `$XX` is one byte-sized
//! character as two hex digits, `$uXXXX` is one UTF-16 code unit.
//!
//! @module point/slot_path

const ESCAPE: char = '$';
const SEPARATOR: char = '/';
const ADDR_SEPARATOR: char = '.';

/// Decode every `$XX` and `$uXXXX` escape in a single left-to-right pass.
///
/// A `$` that does not start a well-formed escape is kept literally.
pub fn unescape(path: &str) -> String {
    let chars: Vec<char> = path.chars().collect();
    let mut out = String::with_capacity(path.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch == ESCAPE {
            if let Some((unit, len)) = read_wide(&chars, i) {
                // Pair a high surrogate with the low surrogate that follows it
                if let Some((low, low_len)) = read_wide(&chars, i + len) {
                    let mut pair = char::decode_utf16([unit, low]);
                    if let Some(Ok(decoded)) = pair.next() {
                        if pair.next().is_none() {
                            out.push(decoded);
                            i += len + low_len;
                            continue;
                        }
                    }
                }
                if let Some(decoded) = char::from_u32(u32::from(unit)) {
                    out.push(decoded);
                    i += len;
                    continue;
                }
            }
            if let Some(byte) = read_hex(&chars, i + 1, 2) {
                out.push(char::from(byte as u8));
                i += 3;
                continue;
            }
        }
        out.push(ch);
        i += 1;
    }

    out
}

/// Encode a slot name so that `unescape(escape(s)) == s`.
///
/// ASCII letters, digits and `_` pass through; everything else is escaped.
pub fn escape(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            out.push(ch);
        } else if (ch as u32) <= 0xFF {
            out.push_str(&format!("{}{:02x}", ESCAPE, ch as u32));
        } else {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("{}u{:04x}", ESCAPE, unit));
            }
        }
    }
    out
}

/// Convert a source-relative slot path into an address suffix.
///
/// `/` becomes `.`, each `$` drops itself and the two characters after
/// it, and anything else that is not ASCII alphanumeric is dropped.
pub fn path_to_addr_suffix(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut chars = path.chars();

    while let Some(ch) = chars.next() {
        if ch == SEPARATOR {
            out.push(ADDR_SEPARATOR);
        } else if ch == ESCAPE {
            chars.next();
            chars.next();
        } else if ch.is_ascii_alphanumeric() {
            out.push(ch);
        }
    }

    out
}

/// Parse `count` hex digits starting at `start`
fn read_hex(chars: &[char], start: usize, count: usize) -> Option<u32> {
    let digits = chars.get(start..start + count)?;
    digits
        .iter()
        .try_fold(0u32, |acc, c| c.to_digit(16).map(|d| acc * 16 + d))
}

/// Parse a `$uXXXX` escape at `start`, returning the code unit and its length
fn read_wide(chars: &[char], start: usize) -> Option<(u16, usize)> {
    if chars.get(start) != Some(&ESCAPE) || chars.get(start + 1) != Some(&'u') {
        return None;
    }
    let unit = read_hex(chars, start + 2, 4)?;
    Some((unit as u16, 6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_basic() {
        assert_eq!(unescape("/Drivers/AHU$201"), "/Drivers/AHU 1");
        assert_eq!(unescape("Zone$2dTemp"), "Zone-Temp");
        assert_eq!(unescape("$2F$2f"), "//");
        assert_eq!(unescape("plain"), "plain");
    }

    #[test]
    fn test_unescape_trailing_dollar_is_literal() {
        assert_eq!(unescape("cost$"), "cost$");
        assert_eq!(unescape("cost$4"), "cost$4");
        assert_eq!(unescape("cost$41"), "costA");
    }

    #[test]
    fn test_unescape_non_hex_is_literal() {
        assert_eq!(unescape("a$zzb"), "a$zzb");
    }

    #[test]
    fn test_unescape_single_pass() {
        // "$2441" decodes "$24" to "$" and leaves "41" alone
        assert_eq!(unescape("$2441"), "$41");
    }

    #[test]
    fn test_unescape_wide() {
        assert_eq!(unescape("T$u00b0"), "T°");
        assert_eq!(unescape("$u6e29$u5ea6"), "温度");
        assert_eq!(unescape("$ud83c$udf21"), "🌡");
    }

    #[test]
    fn test_escape_round_trip() {
        let samples = [
            "AHU 1",
            "Zone-Temp (SP)",
            "a/b.c$d",
            "100%",
            "temp °F",
            "温度",
            "🌡 sensor",
            "$41",
            "",
        ];
        for s in samples {
            let escaped = escape(s);
            assert!(
                escaped
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$'),
                "escaped form of {:?} is {:?}",
                s,
                escaped
            );
            assert_eq!(unescape(&escaped), s);
        }
    }

    #[test]
    fn test_suffix_conversion() {
        assert_eq!(path_to_addr_suffix("points/ZoneTemp"), "points.ZoneTemp");
        assert_eq!(path_to_addr_suffix("Zone$20Temp"), "ZoneTemp");
        assert_eq!(path_to_addr_suffix("Fan_Status-1"), "FanStatus1");
        assert_eq!(path_to_addr_suffix("a/b$2f/c"), "a.b.c");
    }

    #[test]
    fn test_suffix_purity() {
        let inputs = [
            "weird!@#/path$20with/üñí/çødé",
            "$",
            "$u00b0F/x",
            "日本/語",
            "a..b//c",
        ];
        for input in inputs {
            let suffix = path_to_addr_suffix(input);
            assert!(
                suffix
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '.'),
                "{:?} -> {:?}",
                input,
                suffix
            );
        }
    }
}
