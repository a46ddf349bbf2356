//! This module defines the in-memory geometry model the codec reads from and
//! writes to: flat, stride-interleaved coordinate buffers with external part
//! boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical shape tags a host geometry can carry.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

/// The three-way grouping that decides which style properties apply.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShapeClass {
    Point,
    Line,
    Polygon,
}

impl GeometryType {
    /// The shape class of this type, `None` for heterogeneous collections.
    pub fn shape_class(&self) -> Option<ShapeClass> {
        match self {
            Self::Point | Self::MultiPoint => Some(ShapeClass::Point),
            Self::LineString | Self::MultiLineString => Some(ShapeClass::Line),
            Self::Polygon | Self::MultiPolygon => Some(ShapeClass::Polygon),
            Self::GeometryCollection => None,
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

fn default_stride() -> usize {
    2
}

/// A host geometry.
///
/// Ring-bearing variants record the end offset (into `flat_coordinates`) of
/// every ring or part. Polygon rings are stored closed: the last vertex of each
/// ring repeats its first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        flat_coordinates: Vec<f64>,
        #[serde(default = "default_stride")]
        stride: usize,
    },
    LineString {
        flat_coordinates: Vec<f64>,
        #[serde(default = "default_stride")]
        stride: usize,
    },
    Polygon {
        flat_coordinates: Vec<f64>,
        #[serde(default = "default_stride")]
        stride: usize,
        ends: Vec<usize>,
    },
    MultiPoint {
        flat_coordinates: Vec<f64>,
        #[serde(default = "default_stride")]
        stride: usize,
    },
    MultiLineString {
        flat_coordinates: Vec<f64>,
        #[serde(default = "default_stride")]
        stride: usize,
        ends: Vec<usize>,
    },
    MultiPolygon {
        flat_coordinates: Vec<f64>,
        #[serde(default = "default_stride")]
        stride: usize,
        endss: Vec<Vec<usize>>,
    },
    /// Part of the host model but not representable on the wire.
    GeometryCollection { geometries: Vec<Geometry> },
}

/// Appends the vertices of `ring` to `flat`, repeating the first vertex at the
/// end unless the ring is already closed.
fn push_closed_ring(flat: &mut Vec<f64>, ring: &[[f64; 2]]) {
    for vertex in ring {
        flat.extend_from_slice(vertex);
    }
    if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
        if ring.len() > 1 && first != last {
            flat.extend_from_slice(first);
        }
    }
}

fn flatten(vertices: &[[f64; 2]]) -> Vec<f64> {
    vertices.iter().flat_map(|v| v.iter().copied()).collect()
}

impl Geometry {
    //==============================================================================
    // Constructors
    //==============================================================================

    pub fn point(x: f64, y: f64) -> Self {
        Self::Point {
            flat_coordinates: vec![x, y],
            stride: 2,
        }
    }

    pub fn line_string(vertices: &[[f64; 2]]) -> Self {
        Self::LineString {
            flat_coordinates: flatten(vertices),
            stride: 2,
        }
    }

    pub fn multi_point(vertices: &[[f64; 2]]) -> Self {
        Self::MultiPoint {
            flat_coordinates: flatten(vertices),
            stride: 2,
        }
    }

    pub fn multi_line_string(lines: &[Vec<[f64; 2]>]) -> Self {
        let mut flat_coordinates = Vec::new();
        let mut ends = Vec::with_capacity(lines.len());
        for line in lines {
            flat_coordinates.extend(flatten(line));
            ends.push(flat_coordinates.len());
        }
        Self::MultiLineString {
            flat_coordinates,
            stride: 2,
            ends,
        }
    }

    /// Builds a polygon from its rings, outer ring first. Rings given without
    /// their closing vertex are closed.
    pub fn polygon(rings: &[Vec<[f64; 2]>]) -> Self {
        let mut flat_coordinates = Vec::new();
        let mut ends = Vec::with_capacity(rings.len());
        for ring in rings {
            push_closed_ring(&mut flat_coordinates, ring);
            ends.push(flat_coordinates.len());
        }
        Self::Polygon {
            flat_coordinates,
            stride: 2,
            ends,
        }
    }

    pub fn multi_polygon(polygons: &[Vec<Vec<[f64; 2]>>]) -> Self {
        let mut flat_coordinates = Vec::new();
        let mut endss = Vec::with_capacity(polygons.len());
        for rings in polygons {
            let mut ends = Vec::with_capacity(rings.len());
            for ring in rings {
                push_closed_ring(&mut flat_coordinates, ring);
                ends.push(flat_coordinates.len());
            }
            endss.push(ends);
        }
        Self::MultiPolygon {
            flat_coordinates,
            stride: 2,
            endss,
        }
    }

    //==============================================================================
    // Accessors
    //==============================================================================

    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Self::Point { .. } => GeometryType::Point,
            Self::LineString { .. } => GeometryType::LineString,
            Self::Polygon { .. } => GeometryType::Polygon,
            Self::MultiPoint { .. } => GeometryType::MultiPoint,
            Self::MultiLineString { .. } => GeometryType::MultiLineString,
            Self::MultiPolygon { .. } => GeometryType::MultiPolygon,
            Self::GeometryCollection { .. } => GeometryType::GeometryCollection,
        }
    }

    pub fn shape_class(&self) -> Option<ShapeClass> {
        self.geometry_type().shape_class()
    }

    /// The flat coordinate buffer; empty for collections.
    pub fn flat_coordinates(&self) -> &[f64] {
        match self {
            Self::Point { flat_coordinates, .. }
            | Self::LineString { flat_coordinates, .. }
            | Self::Polygon { flat_coordinates, .. }
            | Self::MultiPoint { flat_coordinates, .. }
            | Self::MultiLineString { flat_coordinates, .. }
            | Self::MultiPolygon { flat_coordinates, .. } => flat_coordinates,
            Self::GeometryCollection { .. } => &[],
        }
    }

    pub fn stride(&self) -> usize {
        match self {
            Self::Point { stride, .. }
            | Self::LineString { stride, .. }
            | Self::Polygon { stride, .. }
            | Self::MultiPoint { stride, .. }
            | Self::MultiLineString { stride, .. }
            | Self::MultiPolygon { stride, .. } => *stride,
            Self::GeometryCollection { .. } => default_stride(),
        }
    }

    /// Ring or part end offsets of polygons and multi-line strings.
    pub fn ends(&self) -> &[usize] {
        match self {
            Self::Polygon { ends, .. } | Self::MultiLineString { ends, .. } => ends,
            _ => &[],
        }
    }

    /// Per-polygon ring end offsets of a multi-polygon.
    pub fn endss(&self) -> &[Vec<usize>] {
        match self {
            Self::MultiPolygon { endss, .. } => endss,
            _ => &[],
        }
    }

    /// The (x, y) of every vertex, ignoring ordinates beyond the second.
    pub fn coordinates(&self) -> Vec<[f64; 2]> {
        let stride = self.stride();
        if stride < 2 {
            return Vec::new();
        }
        self.flat_coordinates()
            .chunks_exact(stride)
            .map(|vertex| [vertex[0], vertex[1]])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_constructor_closes_rings() {
        let polygon = Geometry::polygon(&[vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]]);
        assert_eq!(polygon.ends(), &[10]);
        let coords = polygon.coordinates();
        assert_eq!(coords.len(), 5);
        assert_eq!(coords.first(), coords.last());
    }

    #[test]
    fn test_closed_ring_is_not_closed_twice() {
        let ring = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
        let polygon = Geometry::polygon(&[ring]);
        assert_eq!(polygon.coordinates().len(), 4);
    }

    #[test]
    fn test_multi_polygon_offsets_are_global() {
        let square = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];
        let geometry = Geometry::multi_polygon(&[vec![square.clone()], vec![square]]);
        assert_eq!(geometry.endss(), &[vec![8], vec![16]]);
    }

    #[test]
    fn test_shape_classes() {
        assert_eq!(Geometry::point(0.0, 0.0).shape_class(), Some(ShapeClass::Point));
        assert_eq!(Geometry::multi_point(&[]).shape_class(), Some(ShapeClass::Point));
        assert_eq!(Geometry::multi_line_string(&[]).shape_class(), Some(ShapeClass::Line));
        assert_eq!(Geometry::multi_polygon(&[]).shape_class(), Some(ShapeClass::Polygon));
        let collection = Geometry::GeometryCollection { geometries: vec![] };
        assert_eq!(collection.shape_class(), None);
    }

    #[test]
    fn test_json_defaults_stride() {
        let geometry: Geometry =
            serde_json::from_str(r#"{"type":"Point","flat_coordinates":[5.0,10.0]}"#).unwrap();
        assert_eq!(geometry, Geometry::point(5.0, 10.0));
    }
}
