use serde_yaml::Value;

/// Merge `overlay` into `base`, recursing through mappings.
///
/// Keys present in both sides where both values are mappings are merged key
/// by key; any other collision (scalars, sequences, mixed shapes) replaces
/// the base value wholesale. Sequences are never concatenated.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
