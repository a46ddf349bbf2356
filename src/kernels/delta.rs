//! This module contains the coordinate delta codec: the stateful layer between
//! flat coordinate buffers and varint text.
//!
//! Every vertex is written as the zig-zag varint of its quantized offset from
//! the previously written vertex (the *cursor*). Pairs need no separator since
//! each code is self-delimiting.
//!
//! The cursor belongs to a single top-level geometry encode or decode: callers
//! reset it once at the start of a geometry and then let it run across every
//! ring and part of that geometry. Resetting between parts desynchronizes
//! every coordinate after the first part.

use crate::error::CodecError;
use crate::kernels::varint::{self, VarintReader};

/// Converts a float to a 32-bit integer the way a 32-bit shift does: truncate,
/// then wrap modulo 2^32.
fn to_int32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let wrapped = value.trunc().rem_euclid(4_294_967_296.0);
    if wrapped >= 2_147_483_648.0 {
        (wrapped - 4_294_967_296.0) as i32
    } else {
        wrapped as i32
    }
}

/// Delta codec holding the running cursor and the quantization factor.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateCodec {
    accuracy: f64,
    prev_x: i32,
    prev_y: i32,
}

impl Default for CoordinateCodec {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl CoordinateCodec {
    pub fn new(accuracy: f64) -> Self {
        Self {
            accuracy,
            prev_x: 0,
            prev_y: 0,
        }
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// The last written or read quantized vertex.
    pub fn cursor(&self) -> (i32, i32) {
        (self.prev_x, self.prev_y)
    }

    /// Moves the cursor back to the origin. Call once per top-level geometry.
    pub fn reset(&mut self) {
        self.prev_x = 0;
        self.prev_y = 0;
    }

    #[inline]
    fn quantize(&self, raw: f64) -> i32 {
        to_int32((raw / self.accuracy).floor())
    }

    /// Encodes the vertices of `flat_coordinates[offset..end]`, stepping by
    /// `stride` and reading the first two ordinates of each vertex.
    pub fn encode(
        &mut self,
        flat_coordinates: &[f64],
        stride: usize,
        offset: usize,
        end: usize,
    ) -> String {
        let mut out = String::new();
        self.encode_into(flat_coordinates, stride, offset, end, &mut out);
        out
    }

    /// Same as [`encode`](Self::encode), appending to an existing buffer.
    pub fn encode_into(
        &mut self,
        flat_coordinates: &[f64],
        stride: usize,
        offset: usize,
        end: usize,
        out: &mut String,
    ) {
        if stride < 2 {
            return;
        }
        let end = end.min(flat_coordinates.len());
        let mut i = offset;
        while i + 1 < end {
            let x = self.quantize(flat_coordinates[i]);
            let y = self.quantize(flat_coordinates[i + 1]);
            varint::encode_signed(x.wrapping_sub(self.prev_x), out);
            varint::encode_signed(y.wrapping_sub(self.prev_y), out);
            self.prev_x = x;
            self.prev_y = y;
            i += stride;
        }
    }

    /// Decodes a whole run of coordinate text into a new stride-2 buffer.
    pub fn decode(&mut self, text: &str) -> Result<Vec<f64>, CodecError> {
        let mut flat_coordinates = Vec::new();
        self.decode_into(text, &mut flat_coordinates)?;
        Ok(flat_coordinates)
    }

    /// Decodes a whole run of coordinate text, appending `x, y` pairs to
    /// `flat_coordinates`. Multi-part readers pass the same buffer for every part.
    pub fn decode_into(&mut self, text: &str, flat_coordinates: &mut Vec<f64>) -> Result<(), CodecError> {
        let mut reader = VarintReader::new(text);
        while !reader.is_exhausted() {
            let dx = reader.read_signed()?;
            if reader.is_exhausted() {
                return Err(CodecError::UnexpectedEnd(format!(
                    "coordinate at position {} has no y component",
                    reader.position()
                )));
            }
            let dy = reader.read_signed()?;
            self.prev_x = self.prev_x.wrapping_add(dx);
            self.prev_y = self.prev_y.wrapping_add(dy);
            flat_coordinates.push(f64::from(self.prev_x) * self.accuracy);
            flat_coordinates.push(f64::from(self.prev_y) * self.accuracy);
        }
        Ok(())
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let original = vec![0.0, 0.0, 1.0, 1.0, 2.0, 0.0, -150.0, 42.0];
        let mut codec = CoordinateCodec::default();
        let text = codec.encode(&original, 2, 0, original.len());

        let mut decoder = CoordinateCodec::default();
        assert_eq!(decoder.decode(&text).unwrap(), original);
        assert_eq!(decoder.cursor(), (-150, 42));
    }

    #[test]
    fn test_deltas_are_relative_to_cursor() {
        let mut codec = CoordinateCodec::default();
        // (5, 10) then (6, 10): the second vertex is a (1, 0) delta.
        let text = codec.encode(&[5.0, 10.0, 6.0, 10.0], 2, 0, 4);
        let mut expected = String::new();
        for delta in [5, 10, 1, 0] {
            varint::encode_signed(delta, &mut expected);
        }
        assert_eq!(text, expected);
    }

    #[test]
    fn test_cursor_carries_across_parts() {
        let flat = [10.0, 10.0, 11.0, 11.0, 20.0, 20.0];
        let mut encoder = CoordinateCodec::default();
        let first = encoder.encode(&flat, 2, 0, 4);
        let second = encoder.encode(&flat, 2, 4, 6);

        let mut decoder = CoordinateCodec::default();
        let mut out = Vec::new();
        decoder.decode_into(&first, &mut out).unwrap();
        decoder.decode_into(&second, &mut out).unwrap();
        assert_eq!(out, flat.to_vec());

        // Decoding the second part from a reset cursor yields the raw delta instead.
        let mut fresh = CoordinateCodec::default();
        assert_eq!(fresh.decode(&second).unwrap(), vec![9.0, 9.0]);
    }

    #[test]
    fn test_accuracy_quantizes_with_floor() {
        let mut codec = CoordinateCodec::new(10.0);
        let text = codec.encode(&[15.0, -15.0, 29.0, 31.0], 2, 0, 4);
        let mut decoder = CoordinateCodec::new(10.0);
        assert_eq!(decoder.decode(&text).unwrap(), vec![10.0, -20.0, 20.0, 30.0]);
    }

    #[test]
    fn test_stride_above_two_drops_extra_ordinates() {
        let xyz = [1.0, 2.0, 99.0, 3.0, 4.0, 98.0];
        let mut codec = CoordinateCodec::default();
        let text = codec.encode(&xyz, 3, 0, xyz.len());
        let mut decoder = CoordinateCodec::default();
        assert_eq!(decoder.decode(&text).unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_dangling_x_is_rejected() {
        let mut text = String::new();
        varint::encode_signed(4, &mut text);
        let mut decoder = CoordinateCodec::default();
        assert!(matches!(decoder.decode(&text), Err(CodecError::UnexpectedEnd(_))));
    }

    #[test]
    fn test_to_int32_wraps() {
        assert_eq!(to_int32(2_147_483_648.0), i32::MIN);
        assert_eq!(to_int32(-2_147_483_649.0), i32::MAX);
        assert_eq!(to_int32(-3.7), -3);
    }
}
