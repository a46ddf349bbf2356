//! This module contains the pure, stateless kernels for Zig-zag encoding and
//! decoding of 32-bit signed integers.
//!
//! Zig-zag is a lossless, bitwise mapping of signed integers to unsigned
//! integers that interleaves negative and positive magnitudes
//! (0, -1, 1, -2, 2, ... -> 0, 1, 2, 3, 4, ...), so that small deltas of either
//! sign produce short varint codes.
//!
//! All arithmetic follows 32-bit two's-complement semantics: shifts wrap rather
//! than promote, which keeps the produced strings byte-identical to permalinks
//! written by other implementations of the format.

/// Encodes a single signed integer: shift left by one, then complement the
/// result if the input was negative.
#[inline]
pub fn encode_val(n: i32) -> u32 {
    (n.wrapping_shl(1) ^ (n >> 31)) as u32
}

/// Decodes a single zig-zag code: odd codes are complemented after the shift,
/// even codes are shifted only.
#[inline]
pub fn decode_val(n: u32) -> i32 {
    let shifted = (n >> 1) as i32;
    if n & 1 == 1 {
        !shifted
    } else {
        shifted
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
