// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the public-facing API of the permalink codec. It owns the
// wire constants and exposes stateless encode/decode calls over the host model.
//
// Data Flow (Encoding):
//
//   1. [Stateless API (encode_features)]  -> Receives `&[Feature]` + `CodecConfig`
//         |
//         `-> builds a fresh `CoordinateCodec` (cursor at the origin)
//
//   2. [grammar::feature]                 -> one record per feature
//         |
//         `-> grammar::geometry (tag + coordinate runs)
//         `-> grammar::tokens   (attribute block)
//         `-> grammar::style    (style block)
//
//   3. [kernels]                          -> delta -> zigzag -> varint
//
// Decoding runs the same layers in reverse and stops at the first error.
//
// ====================================================================================
pub mod format;
pub mod stateless_api;

pub use stateless_api::{
    decode_feature, decode_features, decode_geometry, decode_style, encode_feature,
    encode_features, encode_geometry, encode_style,
};
