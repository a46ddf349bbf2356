//! The text grammars layered on the kernels.
//!
//! Dependency order, leaves first: `tokens` and `geometry` -> `style` ->
//! `feature`. Every entry point takes the coordinate codec by mutable
//! reference; the cursor it carries is scoped to one top-level geometry.

pub mod feature;
pub mod geometry;
pub mod style;
pub mod tokens;
