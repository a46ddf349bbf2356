//! Foreign-language bindings. Only compiled with the `python` feature.

pub mod python;
