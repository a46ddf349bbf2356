//! This file is the root of the `permalink_codec` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`kernels`, `grammar`, etc.)
//!     and re-exporting the handful of names most callers need.
//! 2.  Defining the `#[pymodule]` which acts as the entry point when the library
//!     is built with the `python` feature and imported into Python.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[doc(hidden)]
pub use log as __log;

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod config;
pub mod error;
pub mod grammar;
pub mod kernels;
pub mod traits;
pub mod types;

#[cfg(feature = "python")]
mod ffi;

pub use bridge::{
    decode_feature, decode_features, decode_geometry, decode_style, encode_feature,
    encode_features, encode_geometry, encode_style,
};
pub use config::CodecConfig;
pub use error::CodecError;
pub use traits::StyleResolver;
pub use types::{
    CircleStyle, Color, Feature, Fill, Geometry, GeometryType, Properties, ShapeClass, Stroke,
    Style, TextStyle,
};

//==================================================================================
// 2. Python Module Definition
//==================================================================================
#[cfg(feature = "python")]
use pyo3::prelude::*;

/// The `permalink_codec` Python module, containing all exposed Rust functions.
#[cfg(feature = "python")]
#[pymodule]
fn permalink_codec(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::python::encode_features_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::python::decode_features_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::python::encode_geometry_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::python::decode_geometry_py, m)?)?;

    // --- Expose the custom error type ---
    m.add(
        "PermalinkError",
        m.py().get_type_bound::<pyo3::exceptions::PyValueError>(),
    )?;

    // --- Expose version string as a module attribute ---
    m.add("__version__", VERSION)?;

    m.add_function(wrap_pyfunction!(ffi::python::enable_verbose_logging_py, m)?)?;

    Ok(())
}
