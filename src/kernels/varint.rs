//! This module contains the kernels for the URL-safe variable-length integer
//! encoding used by every coordinate in a permalink.
//!
//! Each output character carries 5 payload bits, least-significant group first.
//! Bit 5 of a character's alphabet index is the continuation flag: it is set on
//! every group except the last. The 64-character alphabet deliberately excludes
//! the structural separators `~ ' ( )`, so varint runs can be embedded in the
//! geometry and feature grammars without escaping.

use num_traits::{AsPrimitive, PrimInt, Unsigned};

use crate::bridge::format::ALPHABET;
use crate::error::CodecError;
use crate::kernels::zigzag;

const PAYLOAD_BITS: u32 = 5;
const PAYLOAD_MASK: u32 = 0x1F;
const CONTINUATION_BIT: u32 = 0x20;

/// Reverse lookup from ASCII byte to alphabet index, `-1` for bytes outside it.
const LOOKUP: [i8; 128] = build_lookup();

const fn build_lookup() -> [i8; 128] {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    table
}

/// Returns the alphabet index of `byte`, or `None` if it is not a code character.
#[inline]
pub fn symbol_index(byte: u8) -> Option<u32> {
    match LOOKUP.get(byte as usize) {
        Some(&index) if index >= 0 => Some(index as u32),
        _ => None,
    }
}

//==================================================================================
// 1. Public API for Single-Value Operations
//==================================================================================

/// Encodes a single unsigned integer, appending its characters to `out`.
///
/// Zero produces exactly one character, the alphabet's first symbol.
pub fn encode_unsigned<T>(value: T, out: &mut String)
where
    T: PrimInt + Unsigned + AsPrimitive<usize>,
{
    let group_mask = T::from(PAYLOAD_MASK).unwrap_or_else(T::max_value);
    let threshold = T::from(CONTINUATION_BIT).unwrap_or_else(T::max_value);

    let mut current = value;
    while current >= threshold {
        let group: usize = (current & group_mask).as_();
        out.push(ALPHABET[group | CONTINUATION_BIT as usize] as char);
        current = current >> PAYLOAD_BITS as usize;
    }
    let last: usize = current.as_();
    out.push(ALPHABET[last] as char);
}

/// Encodes a signed 32-bit integer through the zig-zag transform.
pub fn encode_signed(value: i32, out: &mut String) {
    encode_unsigned(zigzag::encode_val(value), out);
}

/// Decodes one unsigned code starting at byte `pos` of `text`.
///
/// Returns the value and the position just past the last character consumed.
/// Groups beyond the 32nd bit wrap exactly as 32-bit shifts do.
pub fn decode_unsigned(text: &str, pos: usize) -> Result<(u32, usize), CodecError> {
    let bytes = text.as_bytes();
    let mut result: u32 = 0;
    let mut shift: u32 = 0;
    let mut cursor = pos;

    loop {
        let byte = *bytes.get(cursor).ok_or_else(|| {
            CodecError::UnexpectedEnd(format!(
                "varint starting at position {} is truncated",
                pos
            ))
        })?;
        let index = symbol_index(byte).ok_or_else(|| CodecError::InvalidAlphabetCharacter {
            character: text[cursor..].chars().next().unwrap_or(byte as char),
            position: cursor,
        })?;
        cursor += 1;

        result |= (index & PAYLOAD_MASK).wrapping_shl(shift);
        shift += PAYLOAD_BITS;

        if index & CONTINUATION_BIT == 0 {
            return Ok((result, cursor));
        }
    }
}

/// Decodes one signed code starting at byte `pos` of `text`.
pub fn decode_signed(text: &str, pos: usize) -> Result<(i32, usize), CodecError> {
    let (code, next) = decode_unsigned(text, pos)?;
    Ok((zigzag::decode_val(code), next))
}

//==================================================================================
// 2. Sequential Reader
//==================================================================================

/// Reads successive signed codes from a run of varint text.
#[derive(Debug, Clone)]
pub struct VarintReader<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> VarintReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// `true` once every character has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.text.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn read_signed(&mut self) -> Result<i32, CodecError> {
        let (value, next) = decode_signed(self.text, self.pos)?;
        self.pos = next;
        Ok(value)
    }

    pub fn read_unsigned(&mut self) -> Result<u32, CodecError> {
        let (value, next) = decode_unsigned(self.text, self.pos)?;
        self.pos = next;
        Ok(value)
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn encoded_signed(value: i32) -> String {
        let mut out = String::new();
        encode_signed(value, &mut out);
        out
    }

    #[test]
    fn test_zero_is_first_symbol() {
        let mut out = String::new();
        encode_unsigned(0u32, &mut out);
        assert_eq!(out, ".");
    }

    #[test]
    fn test_known_unsigned_codes() {
        let cases: [(u32, &str); 5] = [(1, "-"), (31, "0"), (32, "1-"), (33, "2-"), (1024, "11-")];
        for (value, expected) in cases {
            let mut out = String::new();
            encode_unsigned(value, &mut out);
            assert_eq!(out, expected, "encoding {}", value);
            assert_eq!(decode_unsigned(&out, 0).unwrap(), (value, out.len()));
        }
    }

    #[test]
    fn test_generic_widths_agree() {
        for value in [0u64, 5, 31, 32, 4095, 1 << 20] {
            let mut wide = String::new();
            encode_unsigned(value, &mut wide);
            let mut narrow = String::new();
            encode_unsigned(value as u32, &mut narrow);
            assert_eq!(wide, narrow);
        }
    }

    #[test]
    fn test_small_deltas_are_one_character() {
        for value in -1..=1 {
            assert_eq!(encoded_signed(value).len(), 1);
        }
    }

    #[test]
    fn test_length_is_monotonic_in_magnitude() {
        let mut previous = 0;
        for magnitude in 0..5000 {
            let len = encoded_signed(magnitude).len().max(encoded_signed(-magnitude).len());
            assert!(len >= previous, "length shrank at {}", magnitude);
            previous = len;
        }
    }

    #[test]
    fn test_signed_extremes_roundtrip() {
        for value in [i32::MIN, i32::MAX, -1, 0, 1, 1 << 30, -(1 << 30) - 1] {
            let text = encoded_signed(value);
            assert_eq!(decode_signed(&text, 0).unwrap(), (value, text.len()));
        }
    }

    #[test]
    fn test_random_signed_roundtrip() {
        let mut rng = rand::rng();
        for _ in 0..2000 {
            let value: i32 = rng.random();
            let text = encoded_signed(value);
            assert!(text.bytes().all(|b| symbol_index(b).is_some()));
            assert_eq!(decode_signed(&text, 0).unwrap().0, value);
        }
    }

    #[test]
    fn test_structural_characters_are_not_symbols() {
        for byte in [b'~', b'\'', b'(', b')'] {
            assert_eq!(symbol_index(byte), None);
        }
    }

    #[test]
    fn test_invalid_character_is_rejected() {
        let result = decode_unsigned("1(", 0);
        assert!(matches!(
            result,
            Err(CodecError::InvalidAlphabetCharacter { character: '(', position: 1 })
        ));
    }

    #[test]
    fn test_truncated_continuation_is_rejected() {
        // '1' has the continuation bit set and nothing follows it.
        assert!(matches!(decode_unsigned("1", 0), Err(CodecError::UnexpectedEnd(_))));
    }

    #[test]
    fn test_reader_consumes_sequence() {
        let mut text = String::new();
        for value in [3, -7, 1000, 0] {
            encode_signed(value, &mut text);
        }
        let mut reader = VarintReader::new(&text);
        let mut decoded = Vec::new();
        while !reader.is_exhausted() {
            decoded.push(reader.read_signed().unwrap());
        }
        assert_eq!(decoded, vec![3, -7, 1000, 0]);
        assert_eq!(reader.position(), text.len());
    }
}
