//! `key*value` tokens shared by the attribute and style blocks.
//!
//! A block is a list of tokens joined by `'`. Each token is percent-escaped on
//! the way out and percent-decoded before it is split on `*` on the way in.

use crate::bridge::format::{
    ATTRIBUTE_REPLACEMENT, ATTRIBUTE_RESERVED, KEY_VALUE_SEPARATOR, PART_SEPARATOR,
};
use crate::error::CodecError;
use crate::kernels::escape;

/// Builds one escaped token.
pub fn encode_token(key: &str, value: &str) -> String {
    let mut token = escape::escape(key);
    token.push(KEY_VALUE_SEPARATOR);
    token.push_str(&escape::escape(value));
    token
}

/// Replaces the characters that would collide with the grammar with `_`.
/// Lossy: the original characters are not recovered on decode.
pub fn sanitize_attribute(text: &str) -> String {
    text.chars()
        .map(|c| {
            if ATTRIBUTE_RESERVED.contains(&c) {
                ATTRIBUTE_REPLACEMENT
            } else {
                c
            }
        })
        .collect()
}

/// Joins encoded tokens into a block.
pub fn join_tokens<I>(tokens: I) -> String
where
    I: IntoIterator<Item = String>,
{
    tokens
        .into_iter()
        .collect::<Vec<_>>()
        .join(&PART_SEPARATOR.to_string())
}

/// Splits a block into decoded `(key, value)` pairs. An empty block has no tokens.
pub fn parse_tokens(block: &str) -> Result<Vec<(String, String)>, CodecError> {
    if block.is_empty() {
        return Ok(Vec::new());
    }
    block
        .split(PART_SEPARATOR)
        .map(|raw| {
            let token = escape::unescape(raw)?;
            let mut parts = token.split(KEY_VALUE_SEPARATOR);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) => Ok((key.to_string(), value.to_string())),
                _ => Err(CodecError::MalformedToken(raw.to_string())),
            }
        })
        .collect()
}
