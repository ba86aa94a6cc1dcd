//! Character classification for identifiers and numbers.

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$' || (!ch.is_ascii() && ch.is_alphabetic())
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch)
        || ch.is_ascii_digit()
        || (!ch.is_ascii() && ch.is_alphanumeric())
        || matches!(ch, '\u{200C}' | '\u{200D}')
}

#[inline]
pub const fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub const fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_characters() {
        assert!(is_identifier_start('$'));
        assert!(is_identifier_start('é'));
        assert!(!is_identifier_start('1'));
        assert!(is_identifier_part('1'));
        assert!(!is_identifier_part('-'));
    }
}
