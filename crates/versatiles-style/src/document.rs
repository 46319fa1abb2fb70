//! Style documents and their assembly from a template.
//!
//! [`assemble`] is the last step of a build: it copies the template, installs
//! the decorated layers, points every non-background layer at the active
//! source, and fills in identity and endpoint fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, StyleError};
use crate::layer::{Layer, LayerType};
use crate::options::BuilderConfig;

/// Prefix of every generated document's `id` and `name`.
pub const STYLE_ID_PREFIX: &str = "versatiles-";

/// A map style document.
///
/// Fields the builder writes are typed; everything else in the template
/// (`version`, `metadata`, `center`, ...) is carried through `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleDocument {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sources: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyphs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StyleDocument {
    /// Parses a template from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| StyleError::Config {
            path: None,
            message: e.to_string(),
        })
    }

    /// Looks up a source definition by name.
    pub fn source(&self, name: &str) -> Option<&Map<String, Value>> {
        self.sources.get(name).and_then(Value::as_object)
    }

    /// The `tiles` list of the named source, if set.
    pub fn tiles(&self, name: &str) -> Option<Vec<&str>> {
        self.source(name)?
            .get("tiles")?
            .as_array()
            .map(|tiles| tiles.iter().filter_map(Value::as_str).collect())
    }
}

/// Builds the output document for one build call.
///
/// `template` is never modified. The active source is `config.source_name`,
/// falling back to the template's first source. Source keys are never renamed:
/// a requested name the template does not declare only gets an entry when a
/// tiles URL is set, and that entry holds just the `tiles` list.
///
/// Empty endpoint strings count as unset, so they never blank out the
/// template's `glyphs`, `sprite` or `tiles`.
///
/// # Errors
///
/// Returns [`StyleError::MissingSource`] if no source name was requested and
/// the template declares no sources.
pub fn assemble(
    template: &StyleDocument,
    layers: Vec<Layer>,
    builder_id: &str,
    config: &BuilderConfig,
) -> Result<StyleDocument> {
    let mut style = template.clone();
    let source_name = active_source(&style.sources, config.source_name.as_deref())?;
    tracing::debug!(source = %source_name, "active source");

    style.layers = layers
        .into_iter()
        .map(|mut layer| {
            if layer.kind != LayerType::Background {
                layer.source = Some(source_name.clone());
            }
            layer
        })
        .collect();

    style.id = format!("{}{}", STYLE_ID_PREFIX, builder_id);
    style.name = style.id.clone();

    if let Some(url) = non_empty(&config.glyphs_url) {
        style.glyphs = Some(url.to_string());
    }
    if let Some(url) = non_empty(&config.sprite_url) {
        style.sprite = Some(url.to_string());
    }

    let tiles: Vec<String> = config
        .tiles_url
        .as_ref()
        .map(|tiles| tiles.to_vec().into_iter().filter(|url| !url.is_empty()).collect())
        .unwrap_or_default();
    if !tiles.is_empty() {
        let tiles = Value::Array(tiles.into_iter().map(Value::String).collect());
        let source = style
            .sources
            .entry(source_name)
            .or_insert_with(|| Value::Object(Map::new()));
        match source.as_object_mut() {
            Some(map) => {
                map.insert("tiles".to_string(), tiles);
            }
            None => {
                let mut map = Map::new();
                map.insert("tiles".to_string(), tiles);
                *source = Value::Object(map);
            }
        }
    }

    Ok(style)
}

/// The requested source name, or the template's first source key.
fn active_source(sources: &Map<String, Value>, requested: Option<&str>) -> Result<String> {
    match requested {
        Some(name) => Ok(name.to_string()),
        None => sources.keys().next().cloned().ok_or(StyleError::MissingSource),
    }
}

fn non_empty(url: &Option<String>) -> Option<&str> {
    url.as_deref().filter(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TilesUrl;
    use serde_json::json;

    fn template() -> StyleDocument {
        serde_json::from_value(json!({
            "version": 8,
            "name": "template",
            "sources": {
                "osm": { "type": "vector", "maxzoom": 14 },
                "relief": { "type": "raster" }
            },
            "layers": []
        }))
        .unwrap()
    }

    fn layers() -> Vec<Layer> {
        vec![
            Layer::new("background", LayerType::Background),
            Layer::new("water", LayerType::Fill),
            Layer::new("label", LayerType::Symbol),
        ]
    }

    #[test]
    fn test_identity_fields() {
        let style = assemble(&template(), vec![], "basic", &BuilderConfig::default()).unwrap();
        assert_eq!(style.id, "versatiles-basic");
        assert_eq!(style.name, "versatiles-basic");
        assert_eq!(style.extra["version"], json!(8));
    }

    #[test]
    fn test_source_defaults_to_first_key() {
        let style = assemble(&template(), layers(), "x", &BuilderConfig::default()).unwrap();
        assert_eq!(style.layers[0].source, None);
        assert_eq!(style.layers[1].source.as_deref(), Some("osm"));
        assert_eq!(style.layers[2].source.as_deref(), Some("osm"));
    }

    #[test]
    fn test_explicit_existing_source() {
        let config = BuilderConfig {
            source_name: Some("relief".into()),
            ..BuilderConfig::default()
        };
        let style = assemble(&template(), layers(), "x", &config).unwrap();
        assert_eq!(style.layers[1].source.as_deref(), Some("relief"));
        assert!(style.source("osm").is_some());
    }

    #[test]
    fn test_unknown_source_name_keeps_template_sources() {
        let config = BuilderConfig {
            source_name: Some("tiles".into()),
            ..BuilderConfig::default()
        };
        let style = assemble(&template(), layers(), "x", &config).unwrap();
        let keys: Vec<&str> = style.sources.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["osm", "relief"]);
        assert_eq!(style.source("osm").unwrap()["maxzoom"], json!(14));
        assert!(style.source("tiles").is_none());
        assert_eq!(style.layers[1].source.as_deref(), Some("tiles"));
    }

    #[test]
    fn test_unknown_source_name_with_tiles_adds_entry() {
        let config = BuilderConfig {
            source_name: Some("tiles".into()),
            tiles_url: Some(TilesUrl::from("https://x/{z}/{x}/{y}")),
            ..BuilderConfig::default()
        };
        let style = assemble(&template(), layers(), "x", &config).unwrap();
        let keys: Vec<&str> = style.sources.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["osm", "relief", "tiles"]);
        assert_eq!(style.sources["tiles"], json!({ "tiles": ["https://x/{z}/{x}/{y}"] }));
        assert_eq!(style.source("osm"), template().source("osm"));
    }

    #[test]
    fn test_missing_source() {
        let empty = StyleDocument::default();
        let err = assemble(&empty, layers(), "x", &BuilderConfig::default()).unwrap_err();
        assert!(matches!(err, StyleError::MissingSource));

        let config = BuilderConfig {
            source_name: Some("mine".into()),
            ..BuilderConfig::default()
        };
        let style = assemble(&empty, layers(), "x", &config).unwrap();
        assert!(style.sources.is_empty());
        assert_eq!(style.layers[1].source.as_deref(), Some("mine"));
    }

    #[test]
    fn test_endpoints() {
        let config = BuilderConfig {
            glyphs_url: Some("https://g/{fontstack}/{range}.pbf".into()),
            sprite_url: Some("https://s/sprites".into()),
            tiles_url: Some(TilesUrl::from("https://x/{z}/{x}/{y}")),
            ..BuilderConfig::default()
        };
        let style = assemble(&template(), vec![], "x", &config).unwrap();
        assert_eq!(style.glyphs.as_deref(), Some("https://g/{fontstack}/{range}.pbf"));
        assert_eq!(style.sprite.as_deref(), Some("https://s/sprites"));
        assert_eq!(style.tiles("osm"), Some(vec!["https://x/{z}/{x}/{y}"]));
        assert_eq!(style.tiles("relief"), None);
    }

    #[test]
    fn test_tiles_list_kept_in_order() {
        let config = BuilderConfig {
            tiles_url: Some(TilesUrl::from(vec!["a", "b"])),
            ..BuilderConfig::default()
        };
        let style = assemble(&template(), vec![], "x", &config).unwrap();
        assert_eq!(style.tiles("osm"), Some(vec!["a", "b"]));
    }

    #[test]
    fn test_no_endpoints_leaves_fields_unset() {
        let style = assemble(&template(), vec![], "x", &BuilderConfig::default()).unwrap();
        assert_eq!(style.glyphs, None);
        assert_eq!(style.sprite, None);
        let value = serde_json::to_value(&style).unwrap();
        assert!(value.get("glyphs").is_none());
        assert!(value.get("sprite").is_none());
    }

    #[test]
    fn test_empty_endpoints_keep_template_values() {
        let mut template = template();
        template.glyphs = Some("https://g/default".into());
        template.sprite = Some("https://s/default".into());
        let mut with_tiles = template.clone();
        with_tiles.sources["osm"]["tiles"] = json!(["https://t/default"]);

        for tiles in [TilesUrl::from(""), TilesUrl::from(vec!["", ""]), TilesUrl::Many(vec![])] {
            let config = BuilderConfig {
                glyphs_url: Some(String::new()),
                sprite_url: Some(String::new()),
                tiles_url: Some(tiles),
                ..BuilderConfig::default()
            };
            let style = assemble(&with_tiles, vec![], "x", &config).unwrap();
            assert_eq!(style.glyphs.as_deref(), Some("https://g/default"));
            assert_eq!(style.sprite.as_deref(), Some("https://s/default"));
            assert_eq!(style.tiles("osm"), Some(vec!["https://t/default"]));
        }
    }

    #[test]
    fn test_empty_urls_dropped_from_tiles_list() {
        let config = BuilderConfig {
            tiles_url: Some(TilesUrl::from(vec!["", "b"])),
            ..BuilderConfig::default()
        };
        let style = assemble(&template(), vec![], "x", &config).unwrap();
        assert_eq!(style.tiles("osm"), Some(vec!["b"]));
    }

    #[test]
    fn test_unknown_layer_type_survives_assembly() {
        let template = StyleDocument::from_json(
            r##"{
                "version": 8,
                "sources": { "osm": { "type": "vector" } },
                "layers": [
                    { "id": "sky", "type": "sky", "paint": { "sky-color": "#88c6fc" } },
                    { "id": "relief", "type": "color-relief", "source": "osm" }
                ]
            }"##,
        )
        .unwrap();
        assert_eq!(template.layers[0].kind, LayerType::Other("sky".into()));

        let style = assemble(&template, template.layers.clone(), "x", &BuilderConfig::default()).unwrap();
        let value = serde_json::to_value(&style).unwrap();
        assert_eq!(value["layers"][0]["type"], json!("sky"));
        assert_eq!(value["layers"][1]["type"], json!("color-relief"));

        let back: StyleDocument = serde_json::from_value(value).unwrap();
        assert_eq!(back, style);
    }

    #[test]
    fn test_template_untouched() {
        let template = template();
        let before = template.clone();
        let config = BuilderConfig {
            source_name: Some("tiles".into()),
            tiles_url: Some(TilesUrl::from("t")),
            ..BuilderConfig::default()
        };
        let _ = assemble(&template, layers(), "x", &config).unwrap();
        assert_eq!(template, before);
    }
}
