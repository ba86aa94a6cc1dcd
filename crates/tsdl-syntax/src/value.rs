//! Decoded token values.
//!
//! The scanner produces raw token text; the semantic value (escape sequences
//! resolved, numbers parsed) is decoded once here and stored on the token.

use std::sync::Arc;

/// The semantic value of a token.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TokenValue {
    #[default]
    None,
    Number(f64),
    String(Arc<str>),
    Boolean(bool),
    Regex(Arc<str>),
    Identifier(Arc<str>),
}

impl TokenValue {
    /// String form of the value, used as a symbol-table key.
    pub fn value_text(&self) -> String {
        match self {
            TokenValue::None => String::new(),
            TokenValue::Number(n) => number_to_text(*n),
            TokenValue::Boolean(b) => b.to_string(),
            TokenValue::String(s) | TokenValue::Regex(s) | TokenValue::Identifier(s) => {
                s.to_string()
            }
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            TokenValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Render a number the way the source language prints it.
pub fn number_to_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == value.trunc() && value.abs() < 1e21 {
        return format!("{value:.0}");
    }
    format!("{value}")
}

/// Parse numeric literal text: decimal (with fraction/exponent), hex, legacy octal.
pub fn decode_numeric(text: &str) -> f64 {
    let bytes = text.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' && matches!(bytes[1], b'x' | b'X') {
        return radix_value(&text[2..], 16);
    }
    if bytes.len() > 1 && bytes[0] == b'0' && bytes[1..].iter().all(|b| (b'0'..=b'7').contains(b))
    {
        return radix_value(&text[1..], 8);
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

fn radix_value(digits: &str, radix: u32) -> f64 {
    digits.chars().fold(0.0, |acc, ch| match ch.to_digit(radix) {
        Some(d) => acc * f64::from(radix) + f64::from(d),
        None => acc,
    })
}

/// Resolve a quoted string literal's escape sequences.
///
/// `text` includes the surrounding quotes; an unterminated literal decodes
/// whatever follows the opening quote.
pub fn decode_string(text: &str) -> String {
    let mut chars = text.chars();
    let quote = chars.next();
    let mut body: &str = chars.as_str();
    if let (Some(q), Some(last)) = (quote, body.chars().last()) {
        if last == q && !body.is_empty() && !ends_with_escape(body) {
            body = &body[..body.len() - last.len_utf8()];
        }
    }
    decode_escapes(body)
}

fn ends_with_escape(body: &str) -> bool {
    let trailing = body[..body.len().saturating_sub(1)]
        .bytes()
        .rev()
        .take_while(|&b| b == b'\\')
        .count();
    trailing % 2 == 1
}

/// Resolve `\uXXXX` escapes in an identifier.
pub fn decode_identifier(text: &str) -> String {
    if !text.contains('\\') {
        return text.to_string();
    }
    decode_escapes(text)
}

fn decode_escapes(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !chars.peek().is_some_and(char::is_ascii_digit) => out.push('\0'),
            'x' => push_hex_escape(&mut out, &mut chars, 2, 'x'),
            'u' => push_hex_escape(&mut out, &mut chars, 4, 'u'),
            // Line continuation
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }
    out
}

fn push_hex_escape(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    digits: usize,
    marker: char,
) {
    let mut collected = String::with_capacity(digits);
    for _ in 0..digits {
        match chars.peek() {
            Some(ch) if ch.is_ascii_hexdigit() => {
                collected.push(*ch);
                chars.next();
            }
            _ => break,
        }
    }
    let decoded = (collected.len() == digits)
        .then(|| u32::from_str_radix(&collected, 16).ok())
        .flatten()
        .and_then(char::from_u32);
    match decoded {
        Some(ch) => out.push(ch),
        None => {
            out.push(marker);
            out.push_str(&collected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_forms() {
        assert_eq!(decode_numeric("42"), 42.0);
        assert_eq!(decode_numeric("0x1F"), 31.0);
        assert_eq!(decode_numeric("017"), 15.0);
        assert_eq!(decode_numeric("1.5e3"), 1500.0);
        assert_eq!(decode_numeric(".5"), 0.5);
    }

    #[test]
    fn number_text_drops_integral_fraction() {
        assert_eq!(number_to_text(6.0), "6");
        assert_eq!(number_to_text(0.25), "0.25");
        assert_eq!(number_to_text(-3.0), "-3");
    }

    #[test]
    fn string_escapes() {
        assert_eq!(decode_string(r#""a\nb""#), "a\nb");
        assert_eq!(decode_string(r"'\x41B'"), "AB");
        assert_eq!(decode_string("'line\\\r\ncontinued'"), "linecontinued");
        assert_eq!(decode_string(r#""\"""#), "\"");
        assert_eq!(decode_string(r"'\q'"), "q");
    }

    #[test]
    fn identifier_escapes() {
        assert_eq!(decode_identifier(r"\u0061bc"), "abc");
        assert_eq!(decode_identifier("plain"), "plain");
    }
}
