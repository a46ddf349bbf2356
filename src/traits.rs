//! This module defines the traits at the seam between the codec and the host
//! feature model.

use crate::types::{Feature, Style};

/// Produces the styles of a feature for a given render resolution.
///
/// Hosts attach one to a [`Feature`] when its look is computed rather than
/// stored; the feature encoder calls it with the configured resolution.
pub trait StyleResolver: Send + Sync {
    fn resolve(&self, feature: &Feature, resolution: f64) -> Vec<Style>;
}

impl<F> StyleResolver for F
where
    F: Fn(&Feature, f64) -> Vec<Style> + Send + Sync,
{
    fn resolve(&self, feature: &Feature, resolution: f64) -> Vec<Style> {
        self(feature, resolution)
    }
}
