//! This module serves as the home of the pure, low-level kernels the grammars
//! are built on. None of them know about geometries, features or styles.
//!
//! Dependency order, leaves first: `zigzag` -> `varint` -> `delta`.
//! `escape` is independent and only used by the token grammars.

/// Signed-to-unsigned bijection keeping small magnitudes small.
pub mod zigzag;

/// 64-symbol, continuation-bit terminated integer codes.
pub mod varint;

/// Cursor-based coordinate delta compression.
pub mod delta;

/// Percent-escaping of token text.
pub mod escape;

pub use delta::CoordinateCodec;
