//! Map layers and the layer-skeleton supplier seam.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// MapLibre layer types.
///
/// Types this crate does not know by name (`sky`, `color-relief`, ...) are
/// kept verbatim in [`LayerType::Other`], so templates written for newer
/// renderers still load and serialize unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayerType {
    Background,
    Fill,
    Line,
    Symbol,
    Raster,
    Circle,
    FillExtrusion,
    Heatmap,
    Hillshade,
    Other(String),
}

impl LayerType {
    /// Symbol layers carry labels and icons; they are what `hideLabels` removes.
    pub fn is_label(&self) -> bool {
        matches!(self, LayerType::Symbol)
    }

    /// The style-document spelling of this type.
    pub fn as_str(&self) -> &str {
        match self {
            LayerType::Background => "background",
            LayerType::Fill => "fill",
            LayerType::Line => "line",
            LayerType::Symbol => "symbol",
            LayerType::Raster => "raster",
            LayerType::Circle => "circle",
            LayerType::FillExtrusion => "fill-extrusion",
            LayerType::Heatmap => "heatmap",
            LayerType::Hillshade => "hillshade",
            LayerType::Other(name) => name,
        }
    }
}

impl From<&str> for LayerType {
    fn from(name: &str) -> Self {
        match name {
            "background" => LayerType::Background,
            "fill" => LayerType::Fill,
            "line" => LayerType::Line,
            "symbol" => LayerType::Symbol,
            "raster" => LayerType::Raster,
            "circle" => LayerType::Circle,
            "fill-extrusion" => LayerType::FillExtrusion,
            "heatmap" => LayerType::Heatmap,
            "hillshade" => LayerType::Hillshade,
            other => LayerType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for LayerType {
    fn from(name: String) -> Self {
        LayerType::from(name.as_str())
    }
}

impl From<LayerType> for String {
    fn from(kind: LayerType) -> Self {
        match kind {
            LayerType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// One style layer: identity plus arbitrary drawing properties.
///
/// `properties` holds everything besides `id`, `type` and `source`
/// (`source-layer`, `filter`, `paint`, `layout`, zoom limits, ...), and
/// serializes flattened next to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LayerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Layer {
    pub fn new(id: impl Into<String>, kind: LayerType) -> Self {
        Self {
            id: id.into(),
            kind,
            source: None,
            properties: Map::new(),
        }
    }

    /// Sets a property, returning the layer for chaining.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// Supplies the ordered layer skeletons a style is decorated from.
///
/// Label-bearing skeletons reference name fields through `language_suffix`
/// (`""` or `"_<lang>"`).
pub trait LayerLibrary: Send + Sync {
    fn layers(&self, language_suffix: &str) -> Vec<Layer>;
}

impl<F> LayerLibrary for F
where
    F: Fn(&str) -> Vec<Layer> + Send + Sync,
{
    fn layers(&self, language_suffix: &str) -> Vec<Layer> {
        self(language_suffix)
    }
}

impl LayerLibrary for Vec<Layer> {
    fn layers(&self, _language_suffix: &str) -> Vec<Layer> {
        self.clone()
    }
}
