//! The geometry grammar: one-letter tag, parenthesised coordinate runs.
//!
//! | Shape           | Wire form                                   |
//! |-----------------|---------------------------------------------|
//! | Point           | `p(` run `)`                                |
//! | LineString      | `l(` run `)`                                |
//! | MultiPoint      | `P(` run `)`                                |
//! | MultiLineString | `L(` run `'` run `'` ... `)`                |
//! | Polygon         | `a(` ring `'` ring `'` ... `)`              |
//! | MultiPolygon    | `A(` rings `)(` rings `)` ... with `'`-joined rings |
//!
//! Polygon rings are written without their closing vertex; the reader
//! re-appends a copy of each ring's own first vertex.
//!
//! Every reader and writer resets the coordinate cursor before it starts and
//! lets it run, unreset, across all rings and parts of the geometry.

use crate::bridge::format::{
    CLOSE, GROUP_SEPARATOR, OPEN, PART_SEPARATOR, TAG_LINE_STRING, TAG_MULTI_LINE_STRING,
    TAG_MULTI_POINT, TAG_MULTI_POLYGON, TAG_POINT, TAG_POLYGON,
};
use crate::error::CodecError;
use crate::kernels::CoordinateCodec;
use crate::types::{Geometry, GeometryType};

type Reader = fn(&str, &mut CoordinateCodec) -> Result<Geometry, CodecError>;

/// Tag-to-reader dispatch table.
const READERS: [(char, Reader); 6] = [
    (TAG_POINT, read_point),
    (TAG_LINE_STRING, read_line_string),
    (TAG_POLYGON, read_polygon),
    (TAG_MULTI_POINT, read_multi_point),
    (TAG_MULTI_LINE_STRING, read_multi_line_string),
    (TAG_MULTI_POLYGON, read_multi_polygon),
];

/// The wire tag of a geometry type, `None` if the type cannot be written.
pub fn tag_for(geometry_type: GeometryType) -> Option<char> {
    match geometry_type {
        GeometryType::Point => Some(TAG_POINT),
        GeometryType::LineString => Some(TAG_LINE_STRING),
        GeometryType::Polygon => Some(TAG_POLYGON),
        GeometryType::MultiPoint => Some(TAG_MULTI_POINT),
        GeometryType::MultiLineString => Some(TAG_MULTI_LINE_STRING),
        GeometryType::MultiPolygon => Some(TAG_MULTI_POLYGON),
        GeometryType::GeometryCollection => None,
    }
}

//==================================================================================
// 1. Reading
//==================================================================================

/// Reads one geometry, dispatching on its first character.
pub fn read_geometry(text: &str, codec: &mut CoordinateCodec) -> Result<Geometry, CodecError> {
    let tag = text.chars().next().ok_or_else(|| CodecError::MalformedPrefix {
        expected: "<tag>(".to_string(),
        found: String::new(),
    })?;
    let (_, reader) = READERS
        .iter()
        .find(|(candidate, _)| *candidate == tag)
        .ok_or(CodecError::UnknownGeometryTag(tag))?;
    log::trace!("reading geometry with tag '{}' ({} chars)", tag, text.len());
    reader(text, codec)
}

/// Validates `tag(` ... `)` and returns what lies between.
fn body(text: &str, tag: char) -> Result<&str, CodecError> {
    let mut chars = text.chars();
    if chars.next() != Some(tag) || chars.next() != Some(OPEN) {
        return Err(CodecError::MalformedPrefix {
            expected: format!("{}{}", tag, OPEN),
            found: text.chars().take(2).collect(),
        });
    }
    if text.len() < 3 || !text.ends_with(CLOSE) {
        return Err(CodecError::MalformedTrailer(text.to_string()));
    }
    Ok(&text[2..text.len() - 1])
}

/// Splits on `separator`, treating an empty body as having no parts.
fn parts<'a>(body: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> {
    body.split(separator).filter(move |_| !body.is_empty())
}

/// Decodes `'`-separated rings into `flat`, closing each ring on its own first
/// vertex and recording ring ends.
fn read_rings(
    rings: &str,
    codec: &mut CoordinateCodec,
    flat: &mut Vec<f64>,
    ends: &mut Vec<usize>,
) -> Result<(), CodecError> {
    let separator = PART_SEPARATOR.to_string();
    for ring in parts(rings, &separator) {
        let start = flat.len();
        codec.decode_into(ring, flat)?;
        if flat.len() > start {
            let (x, y) = (flat[start], flat[start + 1]);
            flat.push(x);
            flat.push(y);
        }
        ends.push(flat.len());
    }
    Ok(())
}

fn read_point(text: &str, codec: &mut CoordinateCodec) -> Result<Geometry, CodecError> {
    codec.reset();
    let flat_coordinates = codec.decode(body(text, TAG_POINT)?)?;
    Ok(Geometry::Point {
        flat_coordinates,
        stride: 2,
    })
}

fn read_line_string(text: &str, codec: &mut CoordinateCodec) -> Result<Geometry, CodecError> {
    codec.reset();
    let flat_coordinates = codec.decode(body(text, TAG_LINE_STRING)?)?;
    Ok(Geometry::LineString {
        flat_coordinates,
        stride: 2,
    })
}

fn read_multi_point(text: &str, codec: &mut CoordinateCodec) -> Result<Geometry, CodecError> {
    codec.reset();
    let flat_coordinates = codec.decode(body(text, TAG_MULTI_POINT)?)?;
    Ok(Geometry::MultiPoint {
        flat_coordinates,
        stride: 2,
    })
}

fn read_multi_line_string(text: &str, codec: &mut CoordinateCodec) -> Result<Geometry, CodecError> {
    codec.reset();
    let lines = body(text, TAG_MULTI_LINE_STRING)?;
    let separator = PART_SEPARATOR.to_string();
    let mut flat_coordinates = Vec::new();
    let mut ends = Vec::new();
    for line in parts(lines, &separator) {
        codec.decode_into(line, &mut flat_coordinates)?;
        ends.push(flat_coordinates.len());
    }
    Ok(Geometry::MultiLineString {
        flat_coordinates,
        stride: 2,
        ends,
    })
}

fn read_polygon(text: &str, codec: &mut CoordinateCodec) -> Result<Geometry, CodecError> {
    codec.reset();
    let rings = body(text, TAG_POLYGON)?;
    let mut flat_coordinates = Vec::new();
    let mut ends = Vec::new();
    read_rings(rings, codec, &mut flat_coordinates, &mut ends)?;
    Ok(Geometry::Polygon {
        flat_coordinates,
        stride: 2,
        ends,
    })
}

fn read_multi_polygon(text: &str, codec: &mut CoordinateCodec) -> Result<Geometry, CodecError> {
    codec.reset();
    let groups = body(text, TAG_MULTI_POLYGON)?;
    let mut flat_coordinates = Vec::new();
    let mut endss = Vec::new();
    for rings in parts(groups, GROUP_SEPARATOR) {
        let mut ends = Vec::new();
        read_rings(rings, codec, &mut flat_coordinates, &mut ends)?;
        endss.push(ends);
    }
    Ok(Geometry::MultiPolygon {
        flat_coordinates,
        stride: 2,
        endss,
    })
}

//==================================================================================
// 2. Writing
//==================================================================================

/// Writes one geometry, dispatching on its shape.
pub fn write_geometry(geometry: &Geometry, codec: &mut CoordinateCodec) -> Result<String, CodecError> {
    let tag = tag_for(geometry.geometry_type())
        .ok_or_else(|| CodecError::UnsupportedGeometryType(geometry.geometry_type().to_string()))?;
    codec.reset();

    let body = match geometry {
        Geometry::Point { flat_coordinates, stride }
        | Geometry::LineString { flat_coordinates, stride }
        | Geometry::MultiPoint { flat_coordinates, stride } => {
            codec.encode(flat_coordinates, *stride, 0, flat_coordinates.len())
        }
        Geometry::MultiLineString {
            flat_coordinates,
            stride,
            ends,
        } => write_parts(codec, flat_coordinates, *stride, 0, ends, false).0,
        Geometry::Polygon {
            flat_coordinates,
            stride,
            ends,
        } => write_parts(codec, flat_coordinates, *stride, 0, ends, true).0,
        Geometry::MultiPolygon {
            flat_coordinates,
            stride,
            endss,
        } => {
            let mut offset = 0;
            let mut groups = Vec::with_capacity(endss.len());
            for ends in endss {
                let (rings, next) = write_parts(codec, flat_coordinates, *stride, offset, ends, true);
                groups.push(rings);
                offset = next;
            }
            groups.join(GROUP_SEPARATOR)
        }
        Geometry::GeometryCollection { .. } => {
            return Err(CodecError::UnsupportedGeometryType(
                geometry.geometry_type().to_string(),
            ))
        }
    };

    let mut out = String::with_capacity(body.len() + 3);
    out.push(tag);
    out.push(OPEN);
    out.push_str(&body);
    out.push(CLOSE);
    Ok(out)
}

/// Encodes consecutive parts ending at `ends`, joined by `'`. Ring parts drop
/// their closing vertex. Returns the text and the offset after the last part.
fn write_parts(
    codec: &mut CoordinateCodec,
    flat_coordinates: &[f64],
    stride: usize,
    mut offset: usize,
    ends: &[usize],
    rings: bool,
) -> (String, usize) {
    let mut out = String::new();
    for (i, &end) in ends.iter().enumerate() {
        if i > 0 {
            out.push(PART_SEPARATOR);
        }
        let stop = if rings { end.saturating_sub(stride) } else { end };
        codec.encode_into(flat_coordinates, stride, offset, stop, &mut out);
        offset = end;
    }
    (out, offset)
}
