//! Rule generators and the rule sets they produce.
//!
//! A [`LayerStyleGenerator`] turns a [`StyleContext`] into a [`RuleSet`]: a
//! mapping from layer id (or id pattern) to property overrides. Any closure
//! with the right signature is a generator:
//!
//! ```rust
//! use serde_json::json;
//! use versatiles_style::{LayerStyleGenerator, RuleSet, StyleContext};
//! use std::collections::BTreeMap;
//!
//! let generator = |ctx: &StyleContext<'_>| {
//!     RuleSet::from_value(json!({
//!         "water": { "paint": { "fill-color": ctx.color("water")? } },
//!     }))
//! };
//!
//! let colors = BTreeMap::from([("water".to_string(), "#0000ff".to_string())]);
//! let fonts = BTreeMap::new();
//! let rules = generator.generate(&StyleContext::new(&colors, &fonts, "")).unwrap();
//! assert_eq!(rules.len(), 1);
//! ```

use serde_json::{Map, Value};

use crate::error::{Result, StyleError};
use crate::resolve::StyleContext;

/// Property overrides keyed by layer id or id pattern, in insertion order.
///
/// Every entry is a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    entries: Map<String, Value>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a rule set from a JSON object of objects.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidRuleSet`] if `value` is not an object or any
    /// entry is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(StyleError::InvalidRuleSet(format!(
                    "expected an object keyed by layer id, got {}",
                    json_kind(&other)
                )))
            }
        };
        let mut rules = RuleSet::new();
        for (key, entry) in map {
            rules.try_insert(key, entry)?;
        }
        Ok(rules)
    }

    /// Adds (or replaces) the overrides for `key`.
    pub fn insert(&mut self, key: impl Into<String>, properties: Map<String, Value>) -> &mut Self {
        self.entries.insert(key.into(), Value::Object(properties));
        self
    }

    /// Adds an entry given as an arbitrary JSON value, which must be an object.
    pub fn try_insert(&mut self, key: impl Into<String>, properties: Value) -> Result<&mut Self> {
        let key = key.into();
        match properties {
            Value::Object(map) => Ok(self.insert(key, map)),
            other => Err(StyleError::InvalidRuleSet(format!(
                "entry '{}' must be an object, got {}",
                key,
                json_kind(&other)
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Map<String, Value>> {
        self.entries.get(key).and_then(Value::as_object)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Map<String, Value>)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_object().map(|m| (k.as_str(), m)))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Computes per-layer overrides from resolved color and font tokens.
///
/// Called exactly once per build. Errors (including unknown references raised
/// by the context's resolvers) abort the build unmodified.
pub trait LayerStyleGenerator: Send + Sync {
    fn generate(&self, ctx: &StyleContext<'_>) -> Result<RuleSet>;
}

impl<F> LayerStyleGenerator for F
where
    F: Fn(&StyleContext<'_>) -> Result<RuleSet> + Send + Sync,
{
    fn generate(&self, ctx: &StyleContext<'_>) -> Result<RuleSet> {
        self(ctx)
    }
}
