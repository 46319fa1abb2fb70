//! Default template and layer skeletons for the Shortbread vector tile schema.
//!
//! These are what a [`StyleBuilder`](crate::StyleBuilder) uses unless it is
//! given its own template or layer library.

use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};

use crate::document::StyleDocument;
use crate::layer::{Layer, LayerLibrary, LayerType};

/// Name of the template's single vector source.
pub const SOURCE_NAME: &str = "versatiles-shortbread";

pub const DEFAULT_TILES_URL: &str = "https://tiles.versatiles.org/tiles/osm/{z}/{x}/{y}";
pub const DEFAULT_GLYPHS_URL: &str = "https://tiles.versatiles.org/assets/fonts/{fontstack}/{range}.pbf";
pub const DEFAULT_SPRITE_URL: &str = "https://tiles.versatiles.org/assets/sprites/sprites";

static TEMPLATE: Lazy<StyleDocument> = Lazy::new(|| {
    let mut sources = Map::new();
    sources.insert(
        SOURCE_NAME.to_string(),
        json!({
            "type": "vector",
            "scheme": "xyz",
            "tiles": [DEFAULT_TILES_URL],
            "bounds": [-180, -85.0511287798066, 180, 85.0511287798066],
            "minzoom": 0,
            "maxzoom": 14,
            "attribution": "© <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
        }),
    );

    let mut extra = Map::new();
    extra.insert("version".to_string(), json!(8));
    extra.insert(
        "metadata".to_string(),
        json!({
            "license": "https://creativecommons.org/publicdomain/zero/1.0/",
            "maputnik:renderer": "mbgljs",
        }),
    );

    StyleDocument {
        id: String::new(),
        name: "versatiles".to_string(),
        sources,
        glyphs: Some(DEFAULT_GLYPHS_URL.to_string()),
        sprite: Some(DEFAULT_SPRITE_URL.to_string()),
        layers: Vec::new(),
        extra,
    }
});

/// Returns a fresh copy of the Shortbread style template.
pub fn template() -> StyleDocument {
    TEMPLATE.clone()
}

/// Layer skeletons for the Shortbread schema, bottom to top.
///
/// Label layers read the `name<suffix>` property, so `"_de"` selects German
/// names where the tiles carry them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortbreadLayers;

impl LayerLibrary for ShortbreadLayers {
    fn layers(&self, language_suffix: &str) -> Vec<Layer> {
        let mut layers = vec![Layer::new("background", LayerType::Background)];

        layers.push(fill("water-ocean", "ocean", None));
        layers.push(fill("water-area", "water_polygons", None));
        for kind in ["river", "canal", "stream", "ditch"] {
            layers.push(line(
                &format!("water-{}", kind),
                "water_lines",
                Some(json!(["==", "kind", kind])),
            ));
        }

        for kind in [
            "agriculture",
            "forest",
            "grass",
            "park",
            "cemetery",
            "residential",
            "commercial",
            "industrial",
            "sand",
            "glacier",
        ] {
            layers.push(fill(&format!("land-{}", kind), "land", Some(kind_filter(kind))));
        }

        layers.push(
            Layer::new("building", LayerType::Fill)
                .with("source-layer", json!("buildings"))
                .with("minzoom", json!(14)),
        );

        for kind in [
            "motorway",
            "trunk",
            "primary",
            "secondary",
            "tertiary",
            "residential",
            "service",
            "track",
            "pedestrian",
        ] {
            layers.push(line(
                &format!("street-{}", kind),
                "streets",
                Some(json!(["all", ["==", "kind", kind], ["!has", "bridge"], ["!has", "tunnel"]])),
            ));
        }
        layers.push(line("transport-rail", "streets", Some(kind_filter("rail"))));

        layers.push(line(
            "boundary-country",
            "boundaries",
            Some(json!(["all", ["==", "admin_level", 2], ["!=", "maritime", true]])),
        ));
        layers.push(line(
            "boundary-state",
            "boundaries",
            Some(json!(["all", ["==", "admin_level", 4], ["!=", "maritime", true]])),
        ));

        let text_field = format!("{{name{}}}", language_suffix);
        layers.push(
            label("label-street", "street_labels", &text_field, None)
                .with("layout", json!({ "symbol-placement": "line", "text-field": text_field })),
        );
        for kind in ["city", "town", "village", "suburb"] {
            layers.push(label(
                &format!("label-place-{}", kind),
                "place_labels",
                &text_field,
                Some(kind_filter(kind)),
            ));
        }
        layers.push(label(
            "label-boundary-country",
            "boundary_labels",
            &text_field,
            Some(json!(["==", "admin_level", 2])),
        ));

        layers
    }
}

fn kind_filter(kind: &str) -> Value {
    json!(["==", "kind", kind])
}

fn with_filter(layer: Layer, filter: Option<Value>) -> Layer {
    match filter {
        Some(filter) => layer.with("filter", filter),
        None => layer,
    }
}

fn fill(id: &str, source_layer: &str, filter: Option<Value>) -> Layer {
    with_filter(
        Layer::new(id, LayerType::Fill).with("source-layer", json!(source_layer)),
        filter,
    )
}

fn line(id: &str, source_layer: &str, filter: Option<Value>) -> Layer {
    with_filter(
        Layer::new(id, LayerType::Line)
            .with("source-layer", json!(source_layer))
            .with("layout", json!({ "line-cap": "round", "line-join": "round" })),
        filter,
    )
}

fn label(id: &str, source_layer: &str, text_field: &str, filter: Option<Value>) -> Layer {
    with_filter(
        Layer::new(id, LayerType::Symbol)
            .with("source-layer", json!(source_layer))
            .with("layout", json!({ "text-field": text_field })),
        filter,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_template_has_single_vector_source() {
        let template = template();
        assert_eq!(template.sources.len(), 1);
        assert_eq!(template.source(SOURCE_NAME).unwrap()["type"], json!("vector"));
        assert_eq!(template.tiles(SOURCE_NAME), Some(vec![DEFAULT_TILES_URL]));
        assert_eq!(template.extra["version"], json!(8));
        assert!(template.layers.is_empty());
    }

    #[test]
    fn test_layer_ids_unique_and_background_first() {
        let layers = ShortbreadLayers.layers("");
        let ids: HashSet<&str> = layers.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids.len(), layers.len());
        assert_eq!(layers[0].kind, LayerType::Background);
        assert!(layers[1..].iter().all(|l| l.kind != LayerType::Background));
    }

    #[test]
    fn test_labels_on_top() {
        let layers = ShortbreadLayers.layers("");
        let first_label = layers.iter().position(|l| l.kind.is_label()).unwrap();
        assert!(layers[first_label..].iter().all(|l| l.kind.is_label()));
    }

    #[test]
    fn test_language_suffix_in_text_field() {
        let layers = ShortbreadLayers.layers("_en");
        let city = layers.iter().find(|l| l.id == "label-place-city").unwrap();
        assert_eq!(city.get("layout").unwrap()["text-field"], json!("{name_en}"));

        let plain = ShortbreadLayers.layers("");
        let street = plain.iter().find(|l| l.id == "label-street").unwrap();
        assert_eq!(street.get("layout").unwrap()["text-field"], json!("{name}"));
        assert_eq!(street.get("layout").unwrap()["symbol-placement"], json!("line"));
    }
}
