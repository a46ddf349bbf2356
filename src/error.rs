// In: src/error.rs

//! This module defines the single, unified error type for the permalink codec.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! All decode-path errors are terminal for the record being parsed: the first
//! error is surfaced and the decode call is aborted.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    // =========================================================================
    // === Grammar Errors (structure of the permalink text)
    // =========================================================================
    #[error("Malformed prefix: expected '{expected}', found '{found}'")]
    MalformedPrefix { expected: String, found: String },

    #[error("Malformed trailer: missing closing parenthesis in '{0}'")]
    MalformedTrailer(String),

    #[error("Unknown geometry tag: '{0}'")]
    UnknownGeometryTag(char),

    #[error("Malformed token: '{0}' does not split into exactly one key and one value")]
    MalformedToken(String),

    // =========================================================================
    // === Low-Level Kernel Errors
    // =========================================================================
    #[error("Invalid alphabet character '{character}' at position {position}")]
    InvalidAlphabetCharacter { character: char, position: usize },

    #[error("Unexpected end of input: {0}")]
    UnexpectedEnd(String),

    // =========================================================================
    // === Style Errors
    // =========================================================================
    #[error("Invalid value '{value}' for style property '{key}'")]
    InvalidStyleValue { key: String, value: String },

    #[error("Invalid color: '{0}'")]
    InvalidColor(String),

    // =========================================================================
    // === Encoding & Configuration Errors
    // =========================================================================
    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometryType(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An error from the Serde JSON library, raised when loading a configuration
    /// or exchanging features as JSON.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

#[cfg(feature = "python")]
impl From<CodecError> for pyo3::PyErr {
    fn from(err: CodecError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
