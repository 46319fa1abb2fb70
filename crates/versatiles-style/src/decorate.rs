//! Layer decoration: overlaying generated rules onto layer skeletons.
//!
//! [`decorate`] walks the skeletons in order and deep-merges every rule entry
//! whose key matches the skeleton's id. Keys are either exact ids or simple
//! glob patterns:
//!
//! - `*` matches any run of characters (`street-*`)
//! - `{a,b}` matches any listed alternative (`{land,water}-ocean`)
//!
//! Entries are applied in the rule set's insertion order, so a later entry wins
//! over an earlier one on conflicting properties. Entries that match no layer
//! are ignored. Keys always match against the skeleton's id, even after an
//! entry has renamed the layer.
//!
//! An entry may also set the layer's `id`, `type` or `source`. A rule that
//! turns a layer into a `symbol` makes it a label, so `hideLabels` drops it.
//!
//! ```rust
//! use serde_json::json;
//! use versatiles_style::{decorate, Layer, LayerType, RuleSet};
//!
//! let skeletons = vec![
//!     Layer::new("street-primary", LayerType::Line),
//!     Layer::new("street-secondary", LayerType::Line),
//!     Layer::new("water", LayerType::Fill),
//! ];
//! let rules = RuleSet::from_value(json!({
//!     "street-*": { "paint": { "line-color": "#ffffff" } },
//!     "street-primary": { "paint": { "line-width": 3 } },
//! })).unwrap();
//!
//! let layers = decorate(&skeletons, &rules).unwrap();
//! assert_eq!(layers[0].get("paint"), Some(&json!({ "line-color": "#ffffff", "line-width": 3 })));
//! assert_eq!(layers[1].get("paint"), Some(&json!({ "line-color": "#ffffff" })));
//! assert_eq!(layers[2].get("paint"), None);
//! ```

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{Result, StyleError};
use crate::generator::RuleSet;
use crate::layer::{Layer, LayerType};
use crate::util::merge_maps;

/// Matches layer ids against one rule-set key.
#[derive(Debug, Clone)]
pub enum KeyMatcher {
    Exact(String),
    Pattern(Regex),
}

impl KeyMatcher {
    /// Compiles a rule-set key. Keys without `*` or `{` match exactly.
    pub fn new(key: &str) -> Result<Self> {
        if !key.contains('*') && !key.contains('{') {
            return Ok(KeyMatcher::Exact(key.to_string()));
        }
        let pattern = glob_to_regex(key)?;
        Regex::new(&pattern)
            .map(KeyMatcher::Pattern)
            .map_err(|e| StyleError::InvalidRuleSet(format!("bad key pattern '{}': {}", key, e)))
    }

    pub fn matches(&self, id: &str) -> bool {
        match self {
            KeyMatcher::Exact(key) => key == id,
            KeyMatcher::Pattern(re) => re.is_match(id),
        }
    }
}

fn glob_to_regex(glob: &str) -> Result<String> {
    let mut out = String::from("^");
    let mut in_group = false;
    for c in glob.chars() {
        match c {
            '*' => out.push_str(".*"),
            '{' if !in_group => {
                in_group = true;
                out.push_str("(?:");
            }
            '}' if in_group => {
                in_group = false;
                out.push(')');
            }
            ',' if in_group => out.push('|'),
            '{' | '}' => {
                return Err(StyleError::InvalidRuleSet(format!(
                    "unbalanced braces in key pattern '{}'",
                    glob
                )))
            }
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }
    if in_group {
        return Err(StyleError::InvalidRuleSet(format!(
            "unbalanced braces in key pattern '{}'",
            glob
        )));
    }
    out.push('$');
    Ok(out)
}

/// Returns decorated copies of `skeletons`, one per skeleton, in input order.
///
/// The input is not modified. Nested objects in rule entries merge key by key;
/// arrays and scalars replace the skeleton's values.
///
/// # Errors
///
/// Returns [`StyleError::InvalidRuleSet`] if a key pattern cannot be compiled,
/// or if an entry sets `id`, `type` or `source` to a value of the wrong shape.
pub fn decorate(skeletons: &[Layer], rules: &RuleSet) -> Result<Vec<Layer>> {
    let matchers = rules
        .iter()
        .map(|(key, props)| Ok((key, KeyMatcher::new(key)?, props)))
        .collect::<Result<Vec<_>>>()?;
    let mut used = vec![false; matchers.len()];

    let layers = skeletons
        .iter()
        .map(|skeleton| -> Result<Layer> {
            let mut layer = skeleton.clone();
            for (i, (key, matcher, props)) in matchers.iter().enumerate() {
                if matcher.matches(&skeleton.id) {
                    used[i] = true;
                    apply_entry(&mut layer, key, props)?;
                }
            }
            Ok(layer)
        })
        .collect::<Result<Vec<_>>>()?;

    for ((key, _, _), used) in matchers.iter().zip(&used) {
        if !used {
            tracing::debug!(rule = %key, "rule matched no layer");
        }
    }

    Ok(layers)
}

/// Merges one rule entry into `layer`. `id`, `type` and `source` go to the
/// typed fields; everything else deep-merges into the properties.
fn apply_entry(layer: &mut Layer, key: &str, props: &Map<String, Value>) -> Result<()> {
    let mut rest = Map::new();
    for (field, value) in props {
        match field.as_str() {
            "id" => match value {
                Value::String(id) => layer.id = id.clone(),
                other => return Err(bad_field(key, field, other)),
            },
            "type" => match value {
                Value::String(kind) => layer.kind = LayerType::from(kind.as_str()),
                other => return Err(bad_field(key, field, other)),
            },
            "source" => match value {
                Value::String(source) => layer.source = Some(source.clone()),
                Value::Null => layer.source = None,
                other => return Err(bad_field(key, field, other)),
            },
            _ => {
                rest.insert(field.clone(), value.clone());
            }
        }
    }
    if rest.len() < props.len() {
        tracing::debug!(rule = %key, id = %layer.id, kind = %layer.kind, "rule set layer identity");
    }
    merge_maps(&mut layer.properties, rest);
    Ok(())
}

fn bad_field(key: &str, field: &str, value: &Value) -> StyleError {
    StyleError::InvalidRuleSet(format!(
        "rule '{}' sets layer {} to {}, expected a string",
        key, field, value
    ))
}

/// Drops every label (symbol) layer, preserving the order of the rest.
pub fn without_labels(layers: Vec<Layer>) -> Vec<Layer> {
    layers
        .into_iter()
        .filter(|layer| !layer.kind.is_label())
        .collect()
}
