//! Structural merge of JSON values.

use serde_json::{Map, Value};

/// Recursively merges `overlay` into `base`.
///
/// - Objects merge key by key, recursing into nested objects.
/// - Arrays are replaced, never concatenated.
/// - Any other conflict is won by `overlay`.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use versatiles_style::util::deep_merge;
///
/// let mut base = json!({ "paint": { "fill-color": "#fff", "fill-opacity": 1 }, "filter": ["all"] });
/// deep_merge(&mut base, json!({ "paint": { "fill-color": "#000" }, "filter": ["any", true] }));
///
/// assert_eq!(base, json!({
///     "paint": { "fill-color": "#000", "fill-opacity": 1 },
///     "filter": ["any", true],
/// }));
/// ```
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            merge_maps(base_map, overlay_map);
        }
        (base, overlay) => *base = overlay,
    }
}

/// Map-level form of [`deep_merge`].
pub fn merge_maps(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        match base.get_mut(&key) {
            Some(existing) => deep_merge(existing, value),
            None => {
                base.insert(key, value);
            }
        }
    }
}
