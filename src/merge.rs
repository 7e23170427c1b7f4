use serde_json::{Map, Value};

/// Overlay `overlay` on top of `base`, top-level keys only.
///
/// A key present in `overlay` replaces the base value wholesale, even when both
/// sides are objects: a partial `zinitInit` is not merged field by field.
pub fn overlay(mut base: Map<String, Value>, overlay: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in overlay {
        base.insert(key, value);
    }
    base
}
