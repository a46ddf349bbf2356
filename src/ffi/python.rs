// In: src/ffi/python.rs

use log::LevelFilter;
use pyo3::prelude::*;
use std::fs::OpenOptions;
use std::sync::Once;

use crate::bridge;
use crate::config::CodecConfig;
use crate::types::{Feature, Geometry};

//==================================================================================
// I. Stateless Codec API
//==================================================================================
// Features and geometries cross the boundary as JSON documents in the shape of
// the `serde` derives on the model types. The codec work itself runs with the
// GIL released.

/// Encodes a JSON array of features into a permalink collection string.
#[pyfunction]
#[pyo3(name = "encode_features", signature = (features_json, accuracy = 1.0))]
pub fn encode_features_py(py: Python<'_>, features_json: &str, accuracy: f64) -> PyResult<String> {
    let features: Vec<Feature> = serde_json::from_str(features_json)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
    let config = CodecConfig::with_accuracy(accuracy);
    let text = py.allow_threads(|| bridge::encode_features(&features, &config))?;
    Ok(text)
}

/// Decodes a permalink collection string into a JSON array of features.
#[pyfunction]
#[pyo3(name = "decode_features", signature = (text, accuracy = 1.0))]
pub fn decode_features_py(py: Python<'_>, text: &str, accuracy: f64) -> PyResult<String> {
    let config = CodecConfig::with_accuracy(accuracy);
    let features = py.allow_threads(|| bridge::decode_features(text, &config))?;
    let json = serde_json::to_string(&features)
        .map_err(|e| pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))?;
    Ok(json)
}

/// Encodes a single JSON geometry.
#[pyfunction]
#[pyo3(name = "encode_geometry", signature = (geometry_json, accuracy = 1.0))]
pub fn encode_geometry_py(py: Python<'_>, geometry_json: &str, accuracy: f64) -> PyResult<String> {
    let geometry: Geometry = serde_json::from_str(geometry_json)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
    let config = CodecConfig::with_accuracy(accuracy);
    let text = py.allow_threads(|| bridge::encode_geometry(&geometry, &config))?;
    Ok(text)
}

/// Decodes a single geometry string into JSON.
#[pyfunction]
#[pyo3(name = "decode_geometry", signature = (text, accuracy = 1.0))]
pub fn decode_geometry_py(py: Python<'_>, text: &str, accuracy: f64) -> PyResult<String> {
    let config = CodecConfig::with_accuracy(accuracy);
    let geometry = py.allow_threads(|| bridge::decode_geometry(text, &config))?;
    let json = serde_json::to_string(&geometry)
        .map_err(|e| pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))?;
    Ok(json)
}

//==================================================================================
// II. Logging
//==================================================================================

static INIT_LOGGER: Once = Once::new();

#[pyfunction]
#[pyo3(name = "enable_verbose_logging", signature = (log_file = None))]
pub fn enable_verbose_logging_py(log_file: Option<String>) -> PyResult<()> {
    let file = match log_file {
        Some(filename) => Some(
            OpenOptions::new()
                .append(true)
                .create(true)
                .open(&filename)
                .map_err(|e| {
                    pyo3::exceptions::PyIOError::new_err(format!(
                        "Could not open log file '{}' in append mode: {}",
                        filename, e
                    ))
                })?,
        ),
        None => None,
    };

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Debug);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
    Ok(())
}
