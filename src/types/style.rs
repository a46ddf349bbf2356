//! The reduced drawing-style model carried by permalinks.
//!
//! Which sub-records matter depends on the shape class of the owning geometry:
//! polygons use `fill` and `stroke`, lines use `stroke`, points use `image`
//! (a circle marker with its own fill and stroke). `text` applies to all.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CodecError;

/// RGBA color with 8-bit components. Only RGB travels on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color (alpha = 255).
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Six lowercase hex digits, alpha dropped.
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parses six hex digits, with or without a leading `#`. The result is opaque.
    pub fn from_hex(text: &str) -> Result<Self, CodecError> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CodecError::InvalidColor(text.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| CodecError::InvalidColor(text.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Fill {
    pub color: Color,
}

impl Fill {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// Circle marker drawn at point vertices.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CircleStyle {
    pub radius: f64,
    #[serde(default)]
    pub fill: Option<Fill>,
    #[serde(default)]
    pub stroke: Option<Stroke>,
}

/// Label style. `font` is a CSS font shorthand such as `"bold 12px sans-serif"`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default)]
    pub fill: Option<Fill>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Style {
    #[serde(default)]
    pub fill: Option<Fill>,
    #[serde(default)]
    pub stroke: Option<Stroke>,
    #[serde(default)]
    pub image: Option<CircleStyle>,
    #[serde(default)]
    pub text: Option<TextStyle>,
}

impl Style {
    /// `true` if no sub-record is set.
    pub fn is_empty(&self) -> bool {
        self.fill.is_none() && self.stroke.is_none() && self.image.is_none() && self.text.is_none()
    }
}
