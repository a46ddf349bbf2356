// In: src/config.rs

//! The single source of truth for codec configuration.
//!
//! `CodecConfig` is created once at the application boundary (from a JSON
//! document, Python keyword arguments, or `CodecConfig::default()`) and then
//! passed by reference to every encode/decode entry point.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// The property key a feature's geometry is bound to unless told otherwise.
pub const DEFAULT_GEOMETRY_NAME: &str = "geometry";

/// Options recognised by the geometry and feature codecs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct CodecConfig {
    /// Coordinates are divided by this before quantization on encode and
    /// multiplied by it on decode. Larger values give shorter strings on a
    /// coarser grid.
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,

    /// Render resolution handed to a feature's style resolver when its styles
    /// are serialized.
    #[serde(default = "default_resolution")]
    pub resolution: f64,

    /// Property key bound to the geometry of decoded features.
    #[serde(default = "default_geometry_name")]
    pub geometry_name: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            accuracy: default_accuracy(),
            resolution: default_resolution(),
            geometry_name: default_geometry_name(),
        }
    }
}

impl CodecConfig {
    /// A default configuration with the given accuracy.
    pub fn with_accuracy(accuracy: f64) -> Self {
        Self {
            accuracy,
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON; absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        let config: CodecConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the codec cannot honour.
    pub fn validate(&self) -> Result<(), CodecError> {
        if !self.accuracy.is_finite() || self.accuracy <= 0.0 {
            return Err(CodecError::InvalidConfig(format!(
                "accuracy must be a positive, finite number, got {}",
                self.accuracy
            )));
        }
        if !self.resolution.is_finite() {
            return Err(CodecError::InvalidConfig(format!(
                "resolution must be finite, got {}",
                self.resolution
            )));
        }
        if self.geometry_name.is_empty() {
            return Err(CodecError::InvalidConfig(
                "geometry_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Helper for `serde` to provide a default for `accuracy`.
fn default_accuracy() -> f64 {
    1.0
}

/// Helper for `serde` to provide a default for `resolution`.
fn default_resolution() -> f64 {
    1.0
}

fn default_geometry_name() -> String {
    DEFAULT_GEOMETRY_NAME.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_fills_defaults() {
        let config = CodecConfig::from_json(r#"{"accuracy": 10}"#).unwrap();
        assert_eq!(config.accuracy, 10.0);
        assert_eq!(config.resolution, 1.0);
        assert_eq!(config.geometry_name, "geometry");
    }

    #[test]
    fn test_from_json_empty_object_is_default() {
        let config = CodecConfig::from_json("{}").unwrap();
        assert_eq!(config, CodecConfig::default());
    }

    #[test]
    fn test_rejects_non_positive_accuracy() {
        assert!(matches!(
            CodecConfig::with_accuracy(0.0).validate(),
            Err(CodecError::InvalidConfig(_))
        ));
        assert!(matches!(
            CodecConfig::from_json(r#"{"accuracy": -2}"#),
            Err(CodecError::InvalidConfig(_))
        ));
        assert!(CodecConfig::with_accuracy(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            CodecConfig::from_json("{accuracy"),
            Err(CodecError::SerdeJson(_))
        ));
    }
}
