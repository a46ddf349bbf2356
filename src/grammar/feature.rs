//! The feature grammar: geometry, attribute and style zones in one record, and
//! records concatenated into a collection.
//!
//! ```text
//! record     := geometry-without-closer [ "~" attributes ] [ "~" styles ] ")"
//! collection := "" | "F" record*
//! ```
//!
//! A record is parsed in one forward pass: geometry up to the first `~` (or
//! the closer), then attribute tokens up to the next `~` (or the closer), then
//! style tokens up to the closer. There is no backtracking.

use crate::bridge::format::{CLOSE, COLLECTION_PREFIX, OPEN, ZONE_SEPARATOR};
use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::grammar::geometry::{read_geometry, write_geometry};
use crate::grammar::style::{read_style, write_style};
use crate::grammar::tokens::{encode_token, join_tokens, parse_tokens, sanitize_attribute};
use crate::kernels::CoordinateCodec;
use crate::types::{Feature, Properties};

//==================================================================================
// 1. Single Records
//==================================================================================

/// Writes one feature record.
pub fn write_feature(
    feature: &Feature,
    config: &CodecConfig,
    codec: &mut CoordinateCodec,
) -> Result<String, CodecError> {
    let mut out = write_geometry(&feature.geometry, codec)?;
    out.pop();

    let attributes = join_tokens(
        feature
            .properties
            .iter()
            .filter(|(key, _)| *key != feature.geometry_name)
            .map(|(key, value)| encode_token(&sanitize_attribute(key), &sanitize_attribute(value))),
    );

    // Every resolved style lands in one block; on read, later keys win.
    let shape_class = feature.geometry.shape_class();
    let style_block = join_tokens(
        feature
            .resolve_styles(config.resolution)
            .iter()
            .map(|style| write_style(style, shape_class))
            .filter(|block| !block.is_empty()),
    );

    if !attributes.is_empty() || !style_block.is_empty() {
        out.push(ZONE_SEPARATOR);
        out.push_str(&attributes);
    }
    if !style_block.is_empty() {
        out.push(ZONE_SEPARATOR);
        out.push_str(&style_block);
    }
    out.push(CLOSE);
    Ok(out)
}

/// Reads one feature record. The record must end with its own closer.
pub fn read_feature(
    text: &str,
    config: &CodecConfig,
    codec: &mut CoordinateCodec,
) -> Result<Feature, CodecError> {
    let inner = text
        .strip_suffix(CLOSE)
        .ok_or_else(|| CodecError::MalformedTrailer(text.to_string()))?;

    let mut zones = inner.splitn(3, ZONE_SEPARATOR);
    let geometry_zone = zones.next().unwrap_or_default();
    let attribute_zone = zones.next();
    let style_zone = zones.next();

    let mut geometry_text = String::with_capacity(geometry_zone.len() + 1);
    geometry_text.push_str(geometry_zone);
    geometry_text.push(CLOSE);
    let geometry = read_geometry(&geometry_text, codec)?;

    let mut feature = Feature::new(geometry).with_geometry_name(config.geometry_name.as_str());

    if let Some(block) = attribute_zone {
        let properties: Properties = parse_tokens(block)?.into_iter().collect();
        feature.properties = properties;
    }

    if let Some(block) = style_zone.filter(|block| !block.is_empty()) {
        let style = read_style(block)?;
        if !style.is_empty() {
            feature.styles.push(style);
        }
    }

    Ok(feature)
}

//==================================================================================
// 2. Collections
//==================================================================================

/// Writes a collection: empty for no features, else `F` and every record.
pub fn write_features(
    features: &[Feature],
    config: &CodecConfig,
    codec: &mut CoordinateCodec,
) -> Result<String, CodecError> {
    if features.is_empty() {
        return Ok(String::new());
    }
    let mut out = String::new();
    out.push(COLLECTION_PREFIX);
    for feature in features {
        out.push_str(&write_feature(feature, config, codec)?);
    }
    Ok(out)
}

/// Finds the closer of the record starting at `text[0]`: the first `)` not
/// immediately followed by `(`. This is a linear scan, not bracket matching;
/// it relies on token text never containing a literal parenthesis.
fn record_end(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let close = CLOSE as u8;
    let open = OPEN as u8;
    (0..bytes.len()).find(|&i| bytes[i] == close && bytes.get(i + 1) != Some(&open))
}

/// Reads a collection written by [`write_features`].
pub fn read_features(
    text: &str,
    config: &CodecConfig,
    codec: &mut CoordinateCodec,
) -> Result<Vec<Feature>, CodecError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let mut rest = text
        .strip_prefix(COLLECTION_PREFIX)
        .ok_or_else(|| CodecError::MalformedPrefix {
            expected: COLLECTION_PREFIX.to_string(),
            found: text.chars().take(1).collect(),
        })?;

    let mut features = Vec::new();
    while !rest.is_empty() {
        let end = record_end(rest).ok_or_else(|| CodecError::MalformedTrailer(rest.to_string()))?;
        let (record, tail) = rest.split_at(end + 1);
        log::trace!("reading feature record #{}: {}", features.len(), record);
        features.push(read_feature(record, config, codec)?);
        rest = tail;
    }
    Ok(features)
}
