//! Property-based tests for decoration and builds using proptest.

use std::collections::BTreeMap;

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use versatiles_style::{
    decorate, without_labels, Layer, LayerType, RuleSet, StyleBuilder, StyleContext,
    StyleOptions, Surface,
};

// ============================================================================
// Test helpers
// ============================================================================

fn layer_type_strategy() -> impl Strategy<Value = LayerType> {
    prop_oneof![
        Just(LayerType::Background),
        Just(LayerType::Fill),
        Just(LayerType::Line),
        Just(LayerType::Symbol),
        Just(LayerType::Circle),
    ]
}

// Skeletons with unique ids "layer-<n>" and one scalar baseline property.
fn skeletons_strategy() -> impl Strategy<Value = Vec<Layer>> {
    prop::collection::vec((layer_type_strategy(), any::<i32>()), 0..30).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (kind, base))| {
                Layer::new(format!("layer-{}", i), kind)
                    .with("width", json!(base))
                    .with("opacity", json!(1))
            })
            .collect()
    })
}

// Rule entries keyed by plain ids, some of which match no skeleton.
fn rules_strategy() -> impl Strategy<Value = BTreeMap<usize, i32>> {
    prop::collection::btree_map(0usize..40, any::<i32>(), 0..20)
}

fn to_rule_set(rules: &BTreeMap<usize, i32>) -> RuleSet {
    let mut set = RuleSet::new();
    for (index, width) in rules {
        let mut props = Map::new();
        props.insert("width".to_string(), json!(width));
        set.insert(format!("layer-{}", index), props);
    }
    set
}

fn ids(layers: &[Layer]) -> Vec<&str> {
    layers.iter().map(|l| l.id.as_str()).collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Decoration keeps every skeleton, in order.
    #[test]
    fn decorate_preserves_order(skeletons in skeletons_strategy(), rules in rules_strategy()) {
        let out = decorate(&skeletons, &to_rule_set(&rules)).unwrap();
        prop_assert_eq!(ids(&out), ids(&skeletons));
    }

    /// Matched layers carry the rule's values; everything else is the baseline.
    #[test]
    fn decorate_reflects_overrides(skeletons in skeletons_strategy(), rules in rules_strategy()) {
        let out = decorate(&skeletons, &to_rule_set(&rules)).unwrap();
        for (i, (before, after)) in skeletons.iter().zip(&out).enumerate() {
            prop_assert_eq!(&after.kind, &before.kind);
            prop_assert_eq!(after.get("opacity"), before.get("opacity"));
            let expected = match rules.get(&i) {
                Some(width) => json!(width),
                None => before.get("width").cloned().unwrap_or(Value::Null),
            };
            prop_assert_eq!(after.get("width"), Some(&expected));
        }
    }

    /// Decoration never touches its input.
    #[test]
    fn decorate_does_not_mutate_input(skeletons in skeletons_strategy(), rules in rules_strategy()) {
        let before = skeletons.clone();
        let _ = decorate(&skeletons, &to_rule_set(&rules)).unwrap();
        prop_assert_eq!(skeletons, before);
    }

    /// Hiding labels removes exactly the symbol layers.
    #[test]
    fn hide_labels_removes_only_symbols(skeletons in skeletons_strategy()) {
        let symbols = skeletons.iter().filter(|l| l.kind == LayerType::Symbol).count();
        let out = without_labels(skeletons.clone());
        prop_assert_eq!(out.len(), skeletons.len() - symbols);

        let expected: Vec<&str> = skeletons
            .iter()
            .filter(|l| l.kind != LayerType::Symbol)
            .map(|l| l.id.as_str())
            .collect();
        prop_assert_eq!(ids(&out), expected);
    }

    /// A full build with hideLabels drops exactly the symbol skeletons.
    #[test]
    fn build_hide_labels_count(skeletons in skeletons_strategy()) {
        let symbols = skeletons.iter().filter(|l| l.kind == LayerType::Symbol).count();
        let total = skeletons.len();
        let maker = StyleBuilder::new("prop").unwrap().with_layers(skeletons).finish();
        let style = maker.make_with(&StyleOptions::new().hide_labels(true)).unwrap();
        prop_assert_eq!(style.layers.len(), total - symbols);
    }

    /// Unknown names fail with the exact surface and key, only when looked up.
    #[test]
    fn unknown_reference_names_surface_and_key(
        name in "[a-z]{1,12}",
        use_font in any::<bool>(),
        dereference in any::<bool>(),
    ) {
        let lookup = name.clone();
        let maker = StyleBuilder::new("prop")
            .unwrap()
            .with_layers(Vec::<Layer>::new())
            .set_layer_style(move |ctx: &StyleContext<'_>| {
                if dereference {
                    if use_font {
                        ctx.font(&lookup)?;
                    } else {
                        ctx.color(&lookup)?;
                    }
                }
                Ok(RuleSet::new())
            })
            .finish();

        let result = maker.make();
        if dereference {
            let err = result.unwrap_err();
            let surface = if use_font { Surface::Fonts } else { Surface::Colors };
            prop_assert_eq!(err.reference(), Some((surface, name.as_str())));
        } else {
            prop_assert!(result.is_ok());
        }
    }

    /// Options handed out by a maker never alias its state or each other.
    #[test]
    fn options_never_alias(
        colors in prop::collection::btree_map("[a-z]{1,8}", "#[0-9a-f]{6}", 0..10),
        key in "[a-z]{1,8}",
    ) {
        let maker = StyleBuilder::new("prop")
            .unwrap()
            .add_colors(colors.clone())
            .finish();

        let mut first = maker.options();
        let second = maker.options();
        first.colors.insert(key.clone(), "#000000".to_string());
        first.fonts.insert(key, "mutated".to_string());

        prop_assert_eq!(&second.colors, &colors);
        prop_assert!(second.fonts.is_empty());
        let stored = maker.options();
        prop_assert_eq!(&stored.colors, &colors);
    }

    /// Build overrides are visible to that build only.
    #[test]
    fn overrides_do_not_leak(value in "#[0-9a-f]{6}") {
        let maker = StyleBuilder::new("prop")
            .unwrap()
            .add_colors([("land", "#ffffff")])
            .with_layers(vec![Layer::new("land", LayerType::Fill)])
            .set_layer_style(|ctx: &StyleContext<'_>| {
                RuleSet::from_value(json!({ "land": { "color": ctx.color("land")?.hex() } }))
            })
            .finish();

        let overridden = maker.make_with(&StyleOptions::new().color("land", value.clone())).unwrap();
        let expected = Value::String(value);
        prop_assert_eq!(overridden.layers[0].get("color"), Some(&expected));

        let plain = maker.make().unwrap();
        let white = json!("#ffffff");
        prop_assert_eq!(plain.layers[0].get("color"), Some(&white));
    }
}
