//! This module defines the core, strongly-typed in-memory model the codec
//! consumes and produces: geometries, features with their property maps, and
//! the reduced style model.

pub mod feature;
pub mod geometry;
pub mod style;

// Re-export the main types for easier access.
pub use feature::{Feature, Properties};
pub use geometry::{Geometry, GeometryType, ShapeClass};
pub use style::{CircleStyle, Color, Fill, Stroke, Style, TextStyle};
