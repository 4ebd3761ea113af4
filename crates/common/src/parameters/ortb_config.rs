//! Merging of caller supplied ORTB config fragments.

use serde_json::{Map, Value as Json};

/// Parses an ORTB config fragment. Invalid JSON or a non-object document is
/// logged and yields `None`.
pub fn parse_ortb_config(raw: &str, scope: &str) -> Option<Map<String, Json>> {
    match serde_json::from_str::<Json>(raw) {
        Ok(Json::Object(object)) => Some(object),
        Ok(other) => {
            log::warn!("Ignoring {scope} ORTB config: expected an object, got {other}");
            None
        }
        Err(e) => {
            log::warn!("Ignoring {scope} ORTB config: {e}");
            None
        }
    }
}

/// Deep-merges `overlay` into `base`.
///
/// Nested objects are merged key by key; any other overlay value replaces the
/// base value. Top-level keys in `protected` are left untouched.
pub fn merge_objects(base: &mut Map<String, Json>, overlay: Map<String, Json>, protected: &[&str]) {
    for (key, value) in overlay {
        if protected.contains(&key.as_str()) {
            log::debug!("ORTB config may not override '{key}'");
            continue;
        }
        merge_value(base, key, value);
    }
}

fn merge_value(base: &mut Map<String, Json>, key: String, value: Json) {
    match (base.get_mut(&key), value) {
        (Some(Json::Object(existing)), Json::Object(incoming)) => {
            for (k, v) in incoming {
                merge_value(existing, k, v);
            }
        }
        (_, value) => {
            base.insert(key, value);
        }
    }
}
