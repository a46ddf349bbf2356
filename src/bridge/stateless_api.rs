// In: src/bridge/stateless_api.rs

//! The stateless public API. Each call validates the configuration, builds a
//! fresh coordinate codec for itself and hands it to the grammar layer, so no
//! two calls ever share a cursor.

use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::grammar;
use crate::kernels::CoordinateCodec;
use crate::log_metric;
use crate::types::{Feature, Geometry, ShapeClass, Style};

fn codec_for(config: &CodecConfig) -> Result<CoordinateCodec, CodecError> {
    config.validate()?;
    Ok(CoordinateCodec::new(config.accuracy))
}

/// Encodes a single geometry.
pub fn encode_geometry(geometry: &Geometry, config: &CodecConfig) -> Result<String, CodecError> {
    let mut codec = codec_for(config)?;
    grammar::geometry::write_geometry(geometry, &mut codec)
}

/// Decodes a single geometry.
pub fn decode_geometry(text: &str, config: &CodecConfig) -> Result<Geometry, CodecError> {
    let mut codec = codec_for(config)?;
    grammar::geometry::read_geometry(text, &mut codec)
}

/// Encodes one feature record (no collection prefix).
pub fn encode_feature(feature: &Feature, config: &CodecConfig) -> Result<String, CodecError> {
    let mut codec = codec_for(config)?;
    grammar::feature::write_feature(feature, config, &mut codec)
}

/// Decodes one feature record (no collection prefix).
pub fn decode_feature(text: &str, config: &CodecConfig) -> Result<Feature, CodecError> {
    let mut codec = codec_for(config)?;
    grammar::feature::read_feature(text, config, &mut codec)
}

/// Encodes a feature collection. No features give an empty string.
pub fn encode_features(features: &[Feature], config: &CodecConfig) -> Result<String, CodecError> {
    let mut codec = codec_for(config)?;
    let text = grammar::feature::write_features(features, config, &mut codec)?;
    log_metric!(
        "event" = "encode_features",
        "features" = features.len(),
        "chars" = text.len()
    );
    Ok(text)
}

/// Decodes a feature collection.
pub fn decode_features(text: &str, config: &CodecConfig) -> Result<Vec<Feature>, CodecError> {
    let mut codec = codec_for(config)?;
    let features = grammar::feature::read_features(text, config, &mut codec)?;
    log_metric!(
        "event" = "decode_features",
        "features" = features.len(),
        "chars" = text.len()
    );
    Ok(features)
}

/// Serializes the parts of a style that apply to `shape_class`.
pub fn encode_style(style: &Style, shape_class: ShapeClass) -> String {
    grammar::style::write_style(style, Some(shape_class))
}

/// Parses a style token block.
pub fn decode_style(block: &str) -> Result<Style, CodecError> {
    grammar::style::read_style(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_is_rejected_before_work() {
        let config = CodecConfig::with_accuracy(0.0);
        assert!(matches!(
            encode_geometry(&Geometry::point(1.0, 1.0), &config),
            Err(CodecError::InvalidConfig(_))
        ));
        assert!(matches!(decode_features("F", &config), Err(CodecError::InvalidConfig(_))));
    }

    #[test]
    fn test_accuracy_shortens_output() {
        let line = Geometry::line_string(&[[123456.0, 654321.0], [123556.0, 654421.0]]);
        let fine = encode_geometry(&line, &CodecConfig::default()).unwrap();
        let coarse = encode_geometry(&line, &CodecConfig::with_accuracy(100.0)).unwrap();
        assert!(coarse.len() < fine.len());
        let decoded = decode_geometry(&coarse, &CodecConfig::with_accuracy(100.0)).unwrap();
        assert_eq!(decoded, Geometry::line_string(&[[123400.0, 654300.0], [123500.0, 654400.0]]));
    }

    #[test]
    fn test_style_helpers() {
        let block = "pointRadius*5'fillColor*ff0000";
        let style = decode_style(block).unwrap();
        assert_eq!(encode_style(&style, ShapeClass::Point), block);
        assert_eq!(encode_style(&style, ShapeClass::Polygon), "");
    }
}
