//! Percent-escaping of attribute and style token text.
//!
//! The escape set is the one `encodeURIComponent` uses, plus `~`: letters,
//! digits and `- _ . ! * ' ( )` pass through, every other byte of the UTF-8
//! encoding becomes `%XX`. Escaping `~` guarantees the zone separator never
//! appears literally inside a token.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::CodecError;

const TOKEN_ESCAPE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Escapes `text` for use inside a token.
pub fn escape(text: &str) -> String {
    utf8_percent_encode(text, TOKEN_ESCAPE_SET).to_string()
}

/// Reverses [`escape`]. Escapes that do not form valid UTF-8 are rejected.
pub fn unescape(text: &str) -> Result<String, CodecError> {
    percent_decode_str(text)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| CodecError::MalformedToken(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_uri_component_escaping() {
        assert_eq!(escape("a b"), "a%20b");
        assert_eq!(escape("#ff0000"), "%23ff0000");
        assert_eq!(escape("x-_.!*'()"), "x-_.!*'()");
        assert_eq!(escape("é"), "%C3%A9");
    }

    #[test]
    fn test_tilde_is_escaped() {
        assert_eq!(escape("a~b"), "a%7Eb");
        assert_eq!(unescape("a%7Eb").unwrap(), "a~b");
    }

    #[test]
    fn test_unescape_roundtrip() {
        let text = "Zürich / 50% ~ done";
        assert_eq!(unescape(&escape(text)).unwrap(), text);
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        assert!(matches!(unescape("%FF"), Err(CodecError::MalformedToken(_))));
    }
}
