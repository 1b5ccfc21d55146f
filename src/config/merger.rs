//! Layering of rule-table YAML documents.
//!
//! Project overrides are applied on top of the built-in rule table.
//!
//! # Merge Rules
//!
//! - Mappings are merged key by key, recursively
//! - Sequences are replaced entirely (a category's `prerequisites` list is
//!   never concatenated)
//! - A `null` in the overlay removes the key from the base, which is how a
//!   project drops a built-in category
//! - Scalars in the overlay replace scalars in the base

use serde_yaml::Value;

/// Apply `overlay` on top of `base`, consuming both.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(mut merged), Value::Mapping(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    merged.remove(&key);
                    continue;
                }
                let next = match merged.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                merged.insert(key, next);
            }
            Value::Mapping(merged)
        }
        (_, overlay) => overlay,
    }
}

/// Merge layers in order; later layers take precedence.
pub fn merge_layers(layers: impl IntoIterator<Item = Value>) -> Value {
    layers
        .into_iter()
        .fold(Value::Mapping(Default::default()), deep_merge)
}
