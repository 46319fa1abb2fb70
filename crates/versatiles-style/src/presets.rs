//! Ready-made styles for the Shortbread layers.

use serde_json::json;

use crate::builder::{StyleBuilder, StyleMaker};
use crate::error::Result;
use crate::generator::RuleSet;
use crate::resolve::StyleContext;
use crate::transform::Recolor;

const COLORFUL_COLORS: [(&str, &str); 18] = [
    ("land", "#f9f4ee"),
    ("water", "#beddf3"),
    ("glacier", "#ffffff"),
    ("wood", "#66aa44"),
    ("grass", "#d9d9a5"),
    ("park", "#d9d9a5"),
    ("agriculture", "#f0e7d1"),
    ("residential", "#eae2d6"),
    ("commercial", "#f7deed"),
    ("industrial", "#fff4c2"),
    ("sand", "#fafaed"),
    ("building", "#dfdbd7"),
    ("street", "#ffffff"),
    ("motorway", "#ffcc88"),
    ("trunk", "#ffeeaa"),
    ("rail", "#b1bbc4"),
    ("boundary", "#a6a6c8"),
    ("label", "#333344"),
];

const COLORFUL_FONTS: [(&str, &str); 2] = [
    ("regular", "noto_sans_regular"),
    ("bold", "noto_sans_bold"),
];

/// A warm, full-color style.
pub fn colorful() -> Result<StyleMaker> {
    Ok(configure(StyleBuilder::new("colorful")?).finish())
}

/// [`colorful`] with every color desaturated to gray.
pub fn graybeard() -> Result<StyleMaker> {
    let builder = StyleBuilder::new("graybeard")?;
    Ok(configure(builder)
        .set_color_transformer(
            Recolor {
                saturate: -1.0,
                ..Recolor::default()
            }
            .into(),
        )
        .finish())
}

fn configure(builder: StyleBuilder) -> StyleBuilder {
    builder
        .add_colors(COLORFUL_COLORS)
        .add_fonts(COLORFUL_FONTS)
        .set_layer_style(colorful_rules)
}

fn colorful_rules(ctx: &StyleContext<'_>) -> Result<RuleSet> {
    let land = ctx.color("land")?;
    let water = ctx.color("water")?;
    let street = ctx.color("street")?;
    let label = ctx.color("label")?;
    let building = ctx.color("building")?;

    let mut rules = RuleSet::new();
    rules.try_insert("background", json!({ "paint": { "background-color": land } }))?;

    rules.try_insert("water-{ocean,area}", json!({ "paint": { "fill-color": water } }))?;
    rules.try_insert(
        "water-{river,canal,stream,ditch}",
        json!({ "paint": { "line-color": water, "line-width": 2 } }),
    )?;

    rules.try_insert("land-*", json!({ "paint": { "fill-opacity": 0.8 } }))?;
    rules.try_insert(
        "land-forest",
        json!({ "paint": { "fill-color": ctx.color("wood")?.fade(0.1) } }),
    )?;
    rules.try_insert(
        "land-{grass,park,cemetery}",
        json!({ "paint": { "fill-color": ctx.color("grass")? } }),
    )?;
    for kind in ["agriculture", "residential", "commercial", "industrial", "sand", "glacier"] {
        rules.try_insert(
            format!("land-{}", kind),
            json!({ "paint": { "fill-color": ctx.color(kind)? } }),
        )?;
    }

    rules.try_insert(
        "building",
        json!({ "paint": { "fill-color": building, "fill-outline-color": building.darken(0.1) } }),
    )?;

    rules.try_insert("street-*", json!({ "paint": { "line-color": street, "line-width": 2 } }))?;
    rules.try_insert(
        "street-motorway",
        json!({ "paint": { "line-color": ctx.color("motorway")?, "line-width": 5 } }),
    )?;
    rules.try_insert(
        "street-trunk",
        json!({ "paint": { "line-color": ctx.color("trunk")?, "line-width": 4 } }),
    )?;
    rules.try_insert("street-{primary,secondary}", json!({ "paint": { "line-width": 3 } }))?;
    rules.try_insert(
        "street-{track,pedestrian}",
        json!({ "paint": { "line-color": street.darken(0.1), "line-dasharray": [2, 2] } }),
    )?;
    rules.try_insert(
        "transport-rail",
        json!({ "paint": { "line-color": ctx.color("rail")?, "line-width": 1 } }),
    )?;

    rules.try_insert("boundary-*", json!({ "paint": { "line-color": ctx.color("boundary")? } }))?;
    rules.try_insert("boundary-country", json!({ "paint": { "line-width": 2 } }))?;
    rules.try_insert(
        "boundary-state",
        json!({ "paint": { "line-width": 1, "line-dasharray": [3, 2] } }),
    )?;

    rules.try_insert(
        "label-*",
        json!({
            "layout": { "text-font": [ctx.font("regular")?], "text-size": 12 },
            "paint": {
                "text-color": label,
                "text-halo-color": land.fade(0.2),
                "text-halo-width": 2,
            },
        }),
    )?;
    rules.try_insert(
        "label-place-{city,town}",
        json!({ "layout": { "text-font": [ctx.font("bold")?], "text-size": 16 } }),
    )?;
    rules.try_insert(
        "label-boundary-country",
        json!({
            "layout": { "text-font": [ctx.font("bold")?], "text-transform": "uppercase" },
            "paint": { "text-color": label.lighten(0.3) },
        }),
    )?;

    Ok(rules)
}
