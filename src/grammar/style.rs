//! The style grammar: a reduced style model as `key*value` tokens.
//!
//! The shape class of the owning geometry decides what is written:
//!
//! - polygon: `fillColor`, then `strokeColor` / `strokeWidth`
//! - line: `strokeColor` / `strokeWidth`
//! - point: `pointRadius`, then the marker's own fill and stroke tokens
//! - any: `fontSize` / `fontColor` for a text label
//!
//! Reading collects every known key first and only then rebuilds the
//! sub-records, so token order does not matter. Unknown keys are ignored.

use crate::bridge::format::{
    DEFAULT_FONT_FAMILY, KEY_FILL_COLOR, KEY_FONT_COLOR, KEY_FONT_SIZE, KEY_POINT_RADIUS,
    KEY_STROKE_COLOR, KEY_STROKE_WIDTH,
};
use crate::error::CodecError;
use crate::grammar::tokens::{encode_token, join_tokens, parse_tokens, sanitize_attribute};
use crate::types::{CircleStyle, Color, Fill, ShapeClass, Stroke, Style, TextStyle};

//==================================================================================
// 1. Writing
//==================================================================================

fn push_fill(tokens: &mut Vec<String>, fill: Option<&Fill>, key: &str) {
    if let Some(fill) = fill {
        tokens.push(encode_token(key, &fill.color.to_hex()));
    }
}

fn push_stroke(tokens: &mut Vec<String>, stroke: Option<&Stroke>) {
    match stroke {
        Some(stroke) if stroke.width.is_finite() => {
            tokens.push(encode_token(KEY_STROKE_COLOR, &stroke.color.to_hex()));
            tokens.push(encode_token(KEY_STROKE_WIDTH, &stroke.width.to_string()));
        }
        Some(stroke) => log::debug!("skipping stroke with non-finite width {}", stroke.width),
        None => {}
    }
}

/// The size token of a CSS font shorthand: its second space-separated word,
/// provided the shorthand has at least three (`"bold 12px sans-serif"` ->
/// `"12px"`). Runs of spaces are not collapsed, so an empty second word gives
/// no size.
fn font_size(font: &str) -> Option<&str> {
    let words: Vec<&str> = font.split(' ').collect();
    match words.as_slice() {
        [_, size, _, ..] if !size.is_empty() => Some(*size),
        _ => None,
    }
}

/// Serializes the parts of `style` relevant to `shape_class`. Returns an empty
/// string when nothing applies.
pub fn write_style(style: &Style, shape_class: Option<ShapeClass>) -> String {
    let mut tokens = Vec::new();

    match shape_class {
        Some(ShapeClass::Polygon) => {
            push_fill(&mut tokens, style.fill.as_ref(), KEY_FILL_COLOR);
            push_stroke(&mut tokens, style.stroke.as_ref());
        }
        Some(ShapeClass::Line) => push_stroke(&mut tokens, style.stroke.as_ref()),
        Some(ShapeClass::Point) => {
            match &style.image {
                Some(image) if image.radius.is_finite() => {
                    tokens.push(encode_token(KEY_POINT_RADIUS, &image.radius.to_string()));
                    push_fill(&mut tokens, image.fill.as_ref(), KEY_FILL_COLOR);
                    push_stroke(&mut tokens, image.stroke.as_ref());
                }
                Some(image) => log::debug!("skipping point marker with non-finite radius {}", image.radius),
                None => {}
            }
        }
        None => {}
    }

    if let Some(text) = &style.text {
        if let Some(size) = text.font.as_deref().and_then(font_size) {
            // Free text: same replacement as attribute values.
            tokens.push(encode_token(KEY_FONT_SIZE, &sanitize_attribute(size)));
        }
        push_fill(&mut tokens, text.fill.as_ref(), KEY_FONT_COLOR);
    }

    join_tokens(tokens)
}

//==================================================================================
// 2. Reading
//==================================================================================

/// Every known key, as parsed from a block. A key seen twice keeps its last value.
#[derive(Debug, Default)]
struct StyleKeys {
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    stroke_width: Option<f64>,
    point_radius: Option<f64>,
    font_size: Option<String>,
    font_color: Option<Color>,
}

fn parse_number(key: &str, value: &str) -> Result<f64, CodecError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| CodecError::InvalidStyleValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}

/// Colors that are not six hex digits drop the sub-style they belong to.
fn parse_color(key: &str, value: &str) -> Option<Color> {
    match Color::from_hex(value) {
        Ok(color) => Some(color),
        Err(err) => {
            log::debug!("dropping style property '{}': {}", key, err);
            None
        }
    }
}

impl StyleKeys {
    fn collect(block: &str) -> Result<Self, CodecError> {
        let mut keys = StyleKeys::default();
        for (key, value) in parse_tokens(block)? {
            match key.as_str() {
                KEY_FILL_COLOR => keys.fill_color = parse_color(&key, &value),
                KEY_STROKE_COLOR => keys.stroke_color = parse_color(&key, &value),
                KEY_STROKE_WIDTH => keys.stroke_width = Some(parse_number(&key, &value)?),
                KEY_POINT_RADIUS => keys.point_radius = Some(parse_number(&key, &value)?),
                KEY_FONT_SIZE => keys.font_size = Some(value),
                KEY_FONT_COLOR => keys.font_color = parse_color(&key, &value),
                _ => log::debug!("ignoring unknown style key '{}'", key),
            }
        }
        Ok(keys)
    }

    fn into_style(self) -> Style {
        let mut style = Style {
            fill: self.fill_color.map(Fill::new),
            stroke: match (self.stroke_color, self.stroke_width) {
                (Some(color), Some(width)) => Some(Stroke::new(color, width)),
                _ => None,
            },
            image: None,
            text: None,
        };

        if let Some(radius) = self.point_radius {
            if style.fill.is_some() {
                style.image = Some(CircleStyle {
                    radius,
                    fill: style.fill.take(),
                    stroke: style.stroke.take(),
                });
            } else {
                log::debug!("dropping point radius {} without a fill color", radius);
            }
        }

        if let (Some(size), Some(color)) = (self.font_size, self.font_color) {
            style.text = Some(TextStyle {
                font: Some(format!("{} {}", size, DEFAULT_FONT_FAMILY)),
                fill: Some(Fill::new(color)),
            });
        }

        style
    }
}

/// Rebuilds a style from a token block.
pub fn read_style(block: &str) -> Result<Style, CodecError> {
    Ok(StyleKeys::collect(block)?.into_style())
}
