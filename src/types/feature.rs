//! Features: a geometry, a string property map and optional styles.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

use crate::config::DEFAULT_GEOMETRY_NAME;
use crate::traits::StyleResolver;
use crate::types::{Geometry, Style};

//==================================================================================
// I. Properties
//==================================================================================

/// Insertion-ordered string map. Order does not affect equality of meaning,
/// but it is kept so that encoding the same feature twice yields the same text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, keeping its original position if it already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Properties::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct PropertiesVisitor;

impl<'de> Visitor<'de> for PropertiesVisitor {
    type Value = Properties;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of string keys to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Properties, A::Error> {
        let mut properties = Properties::new();
        while let Some((key, value)) = access.next_entry::<String, String>()? {
            properties.insert(key, value);
        }
        Ok(properties)
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PropertiesVisitor)
    }
}

//==================================================================================
// II. Feature
//==================================================================================

fn default_geometry_name() -> String {
    DEFAULT_GEOMETRY_NAME.to_string()
}

/// A map feature as the host model exposes it.
#[derive(Clone, Serialize, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    /// Property key the geometry is bound to; never written as an attribute.
    #[serde(default = "default_geometry_name")]
    pub geometry_name: String,
    #[serde(default)]
    pub properties: Properties,
    /// Static styles, used when no resolver is attached.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<Style>,
    #[serde(skip)]
    style_resolver: Option<Arc<dyn StyleResolver>>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            geometry_name: default_geometry_name(),
            properties: Properties::new(),
            styles: Vec::new(),
            style_resolver: None,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key, value);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.styles.push(style);
        self
    }

    pub fn with_geometry_name(mut self, name: impl Into<String>) -> Self {
        self.geometry_name = name.into();
        self
    }

    /// Attaches a resolver; it takes precedence over the static styles.
    pub fn with_style_resolver(mut self, resolver: impl StyleResolver + 'static) -> Self {
        self.style_resolver = Some(Arc::new(resolver));
        self
    }

    pub fn has_style_resolver(&self) -> bool {
        self.style_resolver.is_some()
    }

    /// The styles in effect at `resolution`.
    pub fn resolve_styles(&self, resolution: f64) -> Vec<Style> {
        match &self.style_resolver {
            Some(resolver) => resolver.resolve(self, resolution),
            None => self.styles.clone(),
        }
    }
}

impl fmt::Debug for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feature")
            .field("geometry", &self.geometry)
            .field("geometry_name", &self.geometry_name)
            .field("properties", &self.properties)
            .field("styles", &self.styles)
            .field("style_resolver", &self.style_resolver.is_some())
            .finish()
    }
}

/// Resolvers are compared by identity.
impl PartialEq for Feature {
    fn eq(&self, other: &Self) -> bool {
        let same_resolver = match (&self.style_resolver, &other.style_resolver) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        same_resolver
            && self.geometry == other.geometry
            && self.geometry_name == other.geometry_name
            && self.properties == other.properties
            && self.styles == other.styles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Fill};

    #[test]
    fn test_insert_keeps_position() {
        let mut properties = Properties::new();
        properties.insert("a", "1");
        properties.insert("b", "2");
        assert_eq!(properties.insert("a", "3"), Some("1".to_string()));
        let keys: Vec<_> = properties.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(properties.get("a"), Some("3"));
    }

    #[test]
    fn test_properties_json_preserves_order() {
        let properties: Properties = [("z", "1"), ("a", "2")].into_iter().collect();
        let json = serde_json::to_string(&properties).unwrap();
        assert_eq!(json, r#"{"z":"1","a":"2"}"#);
        let back: Properties = serde_json::from_str(&json).unwrap();
        assert_eq!(back, properties);
    }

    #[test]
    fn test_resolver_overrides_static_styles() {
        let red = Style {
            fill: Some(Fill::new(Color::rgb(255, 0, 0))),
            ..Style::default()
        };
        let feature = Feature::new(Geometry::point(0.0, 0.0)).with_style(Style::default());
        assert_eq!(feature.resolve_styles(1.0), vec![Style::default()]);

        let dynamic = feature.with_style_resolver(move |_: &Feature, resolution: f64| {
            if resolution > 10.0 {
                Vec::new()
            } else {
                vec![red.clone()]
            }
        });
        assert!(dynamic.has_style_resolver());
        assert_eq!(dynamic.resolve_styles(1.0).len(), 1);
        assert!(dynamic.resolve_styles(100.0).is_empty());
    }

    #[test]
    fn test_feature_json_defaults() {
        let feature: Feature = serde_json::from_str(
            r#"{"geometry":{"type":"Point","flat_coordinates":[1.0,2.0]},"properties":{"name":"A"}}"#,
        )
        .unwrap();
        assert_eq!(feature.geometry_name, "geometry");
        assert_eq!(feature.properties.get("name"), Some("A"));
        assert!(feature.styles.is_empty());
    }
}
