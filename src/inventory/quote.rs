use anyhow::{bail, Context, Result};
use std::fmt::Write;
use unicode_general_category::{get_general_category, GeneralCategory};

fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    // Letters, marks, numbers, punctuation and symbols only
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

/// Wraps `value` in double quotes, escaping backslashes, quotes and every
/// non-printable character.
///
/// # Example
/// ```rust
/// use cogrs_inventory::inventory::quote::quote;
/// assert_eq!(quote("say \"hi\"\n"), r#""say \"hi\"\n""#);
/// ```
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');

    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\u{07}' => quoted.push_str("\\a"),
            '\u{08}' => quoted.push_str("\\b"),
            '\u{0c}' => quoted.push_str("\\f"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{0b}' => quoted.push_str("\\v"),
            c if is_printable(c) => quoted.push(c),
            c if (c as u32) < 0x80 => {
                let _ = write!(quoted, "\\x{:02x}", c as u32);
            }
            c if (c as u32) < 0x10000 => {
                let _ = write!(quoted, "\\u{:04x}", c as u32);
            }
            c => {
                let _ = write!(quoted, "\\U{:08x}", c as u32);
            }
        }
    }

    quoted.push('"');
    quoted
}

fn take_hex(chars: &mut std::str::Chars<'_>, digits: usize) -> Result<u32> {
    let hex: String = chars.by_ref().take(digits).collect();
    if hex.len() != digits {
        bail!("Truncated escape sequence: {hex}");
    }
    u32::from_str_radix(&hex, 16).with_context(|| format!("Invalid hex escape: {hex}"))
}

fn push_char(bytes: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

/// Reverses [`quote`]. Also accepts octal escapes and `\xNN` bytes above
/// 0x7f as long as the decoded bytes form valid UTF-8.
pub fn unquote(quoted: &str) -> Result<String> {
    let inner = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .with_context(|| format!("Value is not double quoted: {quoted}"))?;

    let mut bytes: Vec<u8> = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(escape) = chars.next() else {
                    bail!("Dangling backslash in {quoted}");
                };
                match escape {
                    'a' => bytes.push(0x07),
                    'b' => bytes.push(0x08),
                    'f' => bytes.push(0x0c),
                    'n' => bytes.push(b'\n'),
                    'r' => bytes.push(b'\r'),
                    't' => bytes.push(b'\t'),
                    'v' => bytes.push(0x0b),
                    '\\' => bytes.push(b'\\'),
                    '"' => bytes.push(b'"'),
                    '\'' => bytes.push(b'\''),
                    'x' => bytes.push(take_hex(&mut chars, 2)? as u8),
                    'u' | 'U' => {
                        let digits = if escape == 'u' { 4 } else { 8 };
                        let code = take_hex(&mut chars, digits)?;
                        let c = char::from_u32(code)
                            .with_context(|| format!("Invalid code point: {code:#x}"))?;
                        push_char(&mut bytes, c);
                    }
                    '0'..='7' => {
                        let rest: String = chars.by_ref().take(2).collect();
                        let octal = format!("{escape}{rest}");
                        let value = u32::from_str_radix(&octal, 8)
                            .with_context(|| format!("Invalid octal escape: {octal}"))?;
                        if octal.len() != 3 || value > 0xff {
                            bail!("Invalid octal escape: {octal}");
                        }
                        bytes.push(value as u8);
                    }
                    other => bail!("Unknown escape sequence: \\{other}"),
                }
            }
            '"' => bail!("Unescaped quote in {quoted}"),
            c => push_char(&mut bytes, c),
        }
    }

    String::from_utf8(bytes).context("Unquoted value is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote("deploy"), "\"deploy\"");
        assert_eq!(quote(""), "\"\"");
    }

    #[test]
    fn test_quote_escapes_quotes_and_backslashes() {
        assert_eq!(quote(r#"C:\path "x""#), r#""C:\\path \"x\"""#);
    }

    #[test]
    fn test_quote_control_characters() {
        assert_eq!(quote("a\tb\nc"), r#""a\tb\nc""#);
        assert_eq!(quote("\u{1b}[0m"), r#""\x1b[0m""#);
        assert_eq!(quote("\u{7f}"), r#""\x7f""#);
        assert_eq!(quote("\u{07}\u{08}\u{0b}\u{0c}\r"), r#""\a\b\v\f\r""#);
    }

    #[test]
    fn test_quote_unicode() {
        assert_eq!(quote("héllo ☃"), "\"héllo ☃\"");
        assert_eq!(quote("a\u{a0}b"), r#""a\u00a0b""#);
        assert_eq!(quote("\u{feff}"), r#""\ufeff""#);
        assert_eq!(quote("\u{e0001}"), r#""\U000e0001""#);
        assert_eq!(quote("\u{2066}ltr\u{2069}"), r#""\u2066ltr\u2069""#);
        assert_eq!(quote("\u{600}"), r#""\u0600""#);
        assert_eq!(quote("\u{e000}"), r#""\ue000""#);
        assert_eq!(quote("\u{378}"), r#""\u0378""#);
        assert_eq!(quote("\u{2028}"), r#""\u2028""#);
        assert_eq!(quote("\u{f0000}"), r#""\U000f0000""#);
    }

    #[test]
    fn test_round_trip() {
        let values = [
            "plain",
            r#"quote " and backslash \"#,
            "tab\tnewline\nbell\u{07}",
            "\u{1b}\u{0}\u{7f}",
            "nbsp\u{a0} bom\u{feff} tag\u{e0001}",
            "ünïcødé ✓",
            "isolate\u{2066}x\u{2069} private\u{e000} unassigned\u{378}",
        ];

        for value in values {
            assert_eq!(unquote(&quote(value)).unwrap(), value);
        }
    }

    #[test]
    fn test_unquote_octal_and_high_bytes() {
        assert_eq!(unquote(r#""\101\x42""#).unwrap(), "AB");
        assert_eq!(unquote(r#""\xc3\xa9""#).unwrap(), "é");
    }

    #[test]
    fn test_unquote_rejects_malformed() {
        assert!(unquote("no quotes").is_err());
        assert!(unquote(r#""dangling\""#).is_err());
        assert!(unquote(r#""bad \q escape""#).is_err());
        assert!(unquote(r#""short \x4""#).is_err());
        assert!(unquote(r#""inner " quote""#).is_err());
        assert!(unquote(r#""\xff""#).is_err());
    }
}
